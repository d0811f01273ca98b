// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Integration tests for the partitioned-parallel group-by path (spec
//! §4.3.6): radix-partitions rows by hash before building one local table
//! per partition, then concatenates — the result must agree with the
//! single-threaded strategy over the same data.

use vecta_column::{Int32Column, StringColumn};
use vecta_core::EngineConfig;
use vecta_engine::group_by::{partitioned, sparse_int, string_table};

#[test]
fn partitioned_int_matches_single_threaded_group_count_and_sizes() {
	let values: Vec<Option<i32>> = (0..3000).map(|i| Some(i % 53)).collect();
	let column = Int32Column::from_values(values, false).unwrap();

	let single = sparse_int::build(&column, None);
	let config = EngineConfig { partition_target_size: 64, ..EngineConfig::default() };
	let partitioned = partitioned::build_int32(&column, &config);

	assert_eq!(partitioned.group_count(), single.group_count());
	let mut single_sizes: Vec<usize> = (0..single.group_count()).map(|g| single.group_rows(g).len()).collect();
	let mut partitioned_sizes: Vec<usize> = (0..partitioned.group_count()).map(|g| partitioned.group_rows(g).len()).collect();
	single_sizes.sort_unstable();
	partitioned_sizes.sort_unstable();
	assert_eq!(single_sizes, partitioned_sizes);
}

#[test]
fn partitioned_string_preserves_total_row_count_with_nulls() {
	let values: Vec<Option<&str>> =
		(0..600).map(|i| if i % 11 == 0 { None } else { Some(if i % 2 == 0 { "even" } else { "odd" }) }).collect();
	let null_count = values.iter().filter(|v| v.is_none()).count();
	let column = StringColumn::from_values(values, true).unwrap();
	let config = EngineConfig { partition_target_size: 32, ..EngineConfig::default() };
	let result = partitioned::build_string(&column, &config);

	assert_eq!(result.group_count(), 2);
	let grouped_rows: usize = (0..result.group_count()).map(|g| result.group_rows(g).len()).sum();
	let null_rows = result.null_group_indices().map(|r| r.len()).unwrap_or(0);
	assert_eq!(null_rows, null_count);
	assert_eq!(grouped_rows + null_rows, 600);
}
