// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use vecta_column::{GroupResult, Int32Column};
use vecta_core::EngineConfig;

/// Whether direct addressing (spec §4.3.1) applies to `column`: a single
/// `Int32` key whose value range is small relative to the row count.
/// Returns the `(min, max)` bounds when eligible.
pub fn eligible(column: &Int32Column, config: &EngineConfig) -> Option<(i32, i32)> {
	let mut min = i32::MAX;
	let mut max = i32::MIN;
	let mut any = false;
	for i in 0..column.len() {
		if let Some(v) = column.get(i) {
			min = min.min(v);
			max = max.max(v);
			any = true;
		}
	}
	if !any {
		return None;
	}
	let range = (max as i64 - min as i64 + 1) as u128;
	let threshold = config.dense_range_factor as u128 * column.len().max(1) as u128;
	if range <= threshold { Some((min, max)) } else { None }
}

/// Builds a direct-addressing group result (spec §4.3.1): a histogram over
/// buckets `v - min`, prefix-summed into CSR offsets, then a scatter pass.
/// Produces keys in strictly ascending order, the one strategy the spec
/// guarantees this for.
#[tracing::instrument(level = "debug", skip(column))]
pub fn build(column: &Int32Column, min: i32, max: i32) -> GroupResult {
	let bucket_count = (max as i64 - min as i64 + 1) as usize;
	let mut histogram = vec![0u32; bucket_count];
	let mut null_rows = Vec::new();

	for row in 0..column.len() {
		match column.get(row) {
			Some(v) => histogram[(v as i64 - min as i64) as usize] += 1,
			None => null_rows.push(row as u32),
		}
	}

	// Only non-empty buckets become groups, so keys stay strictly
	// ascending and the output has no empty groups.
	let mut keys = Vec::new();
	let mut bucket_to_group = vec![u32::MAX; bucket_count];
	for (bucket, &count) in histogram.iter().enumerate() {
		if count > 0 {
			bucket_to_group[bucket] = keys.len() as u32;
			keys.push(bucket as i64 + min as i64);
		}
	}

	let group_count = keys.len();
	let mut offsets = vec![0u32; group_count + 1];
	let mut running = 0u32;
	let mut group_cursor = 0usize;
	for &count in &histogram {
		if count > 0 {
			offsets[group_cursor] = running;
			running += count;
			group_cursor += 1;
		}
	}
	offsets[group_count] = running;

	let mut cursor = offsets.clone();
	let mut row_indices = vec![0u32; running as usize];
	for row in 0..column.len() {
		if let Some(v) = column.get(row) {
			let bucket = (v as i64 - min as i64) as usize;
			let group = bucket_to_group[bucket] as usize;
			row_indices[cursor[group] as usize] = row as u32;
			cursor[group] += 1;
		}
	}

	GroupResult::from_parts(keys, false, offsets, row_indices, (!null_rows.is_empty()).then_some(null_rows))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dense_int_group_by_count_matches_scenario_1() {
		let column = Int32Column::from_values([Some(1), Some(1), Some(2), Some(3), Some(3), Some(3)], false).unwrap();
		let config = EngineConfig::default();
		let (min, max) = eligible(&column, &config).expect("small range should be eligible");
		let result = build(&column, min, max);

		assert_eq!(result.keys(), &[1, 2, 3]);
		let counts: Vec<usize> = (0..result.group_count()).map(|g| result.group_rows(g).len()).collect();
		assert_eq!(counts, vec![2, 1, 3]);
	}

	#[test]
	fn keys_are_strictly_ascending() {
		let column = Int32Column::from_values([Some(5), Some(-3), Some(0), Some(5), Some(-3)], false).unwrap();
		let config = EngineConfig::default();
		let (min, max) = eligible(&column, &config).unwrap();
		let result = build(&column, min, max);
		let keys = result.keys().to_vec();
		let mut sorted = keys.clone();
		sorted.sort_unstable();
		assert_eq!(keys, sorted);
		assert!(keys.windows(2).all(|w| w[0] < w[1]));
	}

	#[test]
	fn wide_range_is_not_eligible() {
		let column = Int32Column::from_values([Some(0), Some(1_000_000)], false).unwrap();
		let config = EngineConfig::default();
		assert!(eligible(&column, &config).is_none());
	}
}
