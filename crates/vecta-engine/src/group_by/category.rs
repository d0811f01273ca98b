// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::collections::HashMap;

use rayon::prelude::*;
use vecta_column::{DictionaryData, StringColumn};
use vecta_core::EngineConfig;

/// Result of a successful category pre-pass (spec §4.3.4): per-row `Int32`
/// codes plus the dictionary that resolves them, ready to be handed to the
/// integer dispatch path (direct or sparse).
pub struct CategoryBuild {
	pub codes: Vec<i32>,
	pub dictionary: DictionaryData,
}

struct LocalDict {
	codes: Vec<i32>,
	entries: Vec<String>,
}

fn partition_ranges(n: usize, config: &EngineConfig) -> Vec<(usize, usize)> {
	if n == 0 {
		return Vec::new();
	}
	if n < config.parallel_threshold {
		return vec![(0, n)];
	}
	let threads = rayon::current_num_threads().max(1);
	let chunk = n.div_ceil(threads).max(1);
	let mut ranges = Vec::new();
	let mut start = 0;
	while start < n {
		let end = (start + chunk).min(n);
		ranges.push((start, end));
		start = end;
	}
	ranges
}

fn build_local(column: &StringColumn, start: usize, end: usize) -> LocalDict {
	let mut index: HashMap<&str, i32> = HashMap::new();
	let mut entries: Vec<String> = Vec::new();
	let mut codes = Vec::with_capacity(end - start);
	for row in start..end {
		match column.get(row) {
			None => codes.push(0),
			Some(s) => {
				let code = *index.entry(s).or_insert_with(|| {
					entries.push(s.to_string());
					entries.len() as i32
				});
				codes.push(code);
			}
		}
	}
	LocalDict { codes, entries }
}

/// Attempts the category pre-pass over `column`: a single-pass (or, above
/// `parallel_threshold`, parallel chunked) dictionary build that converts a
/// bounded-cardinality string column into `Int32` codes. Returns `None`
/// — falling back to the string Swiss table — once distinct-value count
/// would exceed `cat_cardinality_cap`.
#[tracing::instrument(level = "debug", skip(column, config))]
pub fn try_prepass(column: &StringColumn, config: &EngineConfig) -> Option<CategoryBuild> {
	let n = column.len();
	let ranges = partition_ranges(n, config);
	let locals: Vec<LocalDict> = if ranges.len() <= 1 {
		ranges.iter().map(|&(s, e)| build_local(column, s, e)).collect()
	} else {
		ranges.par_iter().map(|&(s, e)| build_local(column, s, e)).collect()
	};

	let mut dictionary = DictionaryData::new();
	let mut codes = vec![0i32; n];
	for (&(start, _end), local) in ranges.iter().zip(locals.iter()) {
		let mut remap = vec![0i32; local.entries.len() + 1];
		for (local_index, value) in local.entries.iter().enumerate() {
			let global_code = dictionary.intern(value);
			remap[local_index + 1] = global_code;
			if dictionary.len() - 1 > config.cat_cardinality_cap {
				tracing::warn!(
					cap = config.cat_cardinality_cap,
					"category cardinality cap exceeded, falling back to string table"
				);
				return None;
			}
		}
		for (offset, &local_code) in local.codes.iter().enumerate() {
			codes[start + offset] = if local_code == 0 { 0 } else { remap[local_code as usize] };
		}
	}

	Some(CategoryBuild { codes, dictionary })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_codes_reusing_repeated_values() {
		let column = StringColumn::from_values([Some("IT"), Some("IT"), Some("HR"), None], true).unwrap();
		let config = EngineConfig::default();
		let build = try_prepass(&column, &config).unwrap();
		assert_eq!(build.codes[0], build.codes[1]);
		assert_ne!(build.codes[0], build.codes[2]);
		assert_eq!(build.codes[3], 0);
		assert_eq!(build.dictionary.get(build.codes[0]), Some("IT"));
	}

	#[test]
	fn aborts_once_cardinality_cap_exceeded() {
		let values: Vec<Option<&str>> = vec![Some("a"), Some("b"), Some("c")];
		let column = StringColumn::from_values(values, false).unwrap();
		let config = EngineConfig { cat_cardinality_cap: 2, ..EngineConfig::default() };
		assert!(try_prepass(&column, &config).is_none());
	}
}
