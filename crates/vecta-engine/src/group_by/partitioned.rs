// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use rayon::prelude::*;
use vecta_column::{GroupResult, Int32Column, StringColumn};
use vecta_core::EngineConfig;
use vecta_core::hash;

use crate::group_by::{sparse_int, string_table};

/// Radix-partitions `n` rows by the high bits of each row's hash into `p`
/// buckets (spec §4.3.6). A key always hashes to the same partition, so the
/// per-partition local tables built afterward never need cross-partition
/// merging of groups — concatenation is enough.
fn partition_by<H: Fn(usize) -> Option<u64>>(n: usize, partitions: usize, hash_of: H) -> (Vec<Vec<u32>>, Vec<u32>) {
	let shift = 64 - partitions.trailing_zeros();
	let mut buckets: Vec<Vec<u32>> = vec![Vec::new(); partitions];
	let mut null_rows = Vec::new();
	for row in 0..n {
		match hash_of(row) {
			Some(hash) => buckets[(hash >> shift) as usize].push(row as u32),
			None => null_rows.push(row as u32),
		}
	}
	(buckets, null_rows)
}

fn concatenate(mut parts: Vec<GroupResult>, null_rows: Vec<u32>, keys_are_row_indices: bool) -> GroupResult {
	let total_groups: usize = parts.iter().map(|p| p.group_count()).sum();
	let total_rows: usize = parts.iter().map(|p| p.row_indices().len()).sum();
	let mut result = GroupResult::with_capacity(total_groups, total_rows, keys_are_row_indices);
	for part in parts.drain(..) {
		for g in 0..part.group_count() {
			result.begin_group(part.keys()[g]);
			for &row in part.group_rows(g) {
				result.push_row(row);
			}
		}
	}
	for row in null_rows {
		result.push_null_row(row);
	}
	result
}

/// Partitioned-parallel build for a sparse-integer key (spec §4.3.6). Only
/// eligible when the dispatcher has already confirmed the column has no
/// nulls — this function still separates them defensively.
#[tracing::instrument(level = "debug", skip(column, config))]
pub fn build_int32(column: &Int32Column, config: &EngineConfig) -> GroupResult {
	let n = column.len();
	let partitions = config.partition_count(n);
	let (buckets, null_rows) = partition_by(n, partitions, |row| column.get(row).map(hash::hash_i32));
	let parts: Vec<GroupResult> = buckets.par_iter().map(|rows| sparse_int::build(column, Some(rows))).collect();
	concatenate(parts, null_rows, false)
}

/// Partitioned-parallel build for a string key (spec §4.3.6).
#[tracing::instrument(level = "debug", skip(column, config))]
pub fn build_string(column: &StringColumn, config: &EngineConfig) -> GroupResult {
	let n = column.len();
	let partitions = config.partition_count(n);
	let (buckets, null_rows) =
		partition_by(n, partitions, |row| if column.is_null(row) { None } else { Some(hash::fnv1a(column.as_bytes(row))) });
	let parts: Vec<GroupResult> = buckets.par_iter().map(|rows| string_table::build(column, Some(rows))).collect();
	concatenate(parts, null_rows, true)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partitioned_int_matches_unpartitioned_group_sizes() {
		let values: Vec<Option<i32>> = (0..2000).map(|i| Some(i % 37)).collect();
		let column = Int32Column::from_values(values, false).unwrap();
		let config = EngineConfig { partition_target_size: 64, ..EngineConfig::default() };
		let result = build_int32(&column, &config);
		assert_eq!(result.group_count(), 37);
		let total: usize = (0..result.group_count()).map(|g| result.group_rows(g).len()).sum();
		assert_eq!(total, 2000);
	}

	#[test]
	fn partitioned_string_preserves_row_membership() {
		let values: Vec<Option<&str>> = (0..500).map(|i| Some(if i % 2 == 0 { "even" } else { "odd" })).collect();
		let column = StringColumn::from_values(values, false).unwrap();
		let config = EngineConfig { partition_target_size: 32, ..EngineConfig::default() };
		let result = build_string(&column, &config);
		assert_eq!(result.group_count(), 2);
		let total: usize = (0..result.group_count()).map(|g| result.group_rows(g).len()).sum();
		assert_eq!(total, 500);
	}
}
