// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Integration tests for the sparse-integer Swiss-table group-by strategy
//! (spec §4.3.2): open addressing over `Int32` keys, growing by doubling
//! as distinct keys accumulate.

use vecta_column::Int32Column;
use vecta_engine::group_by::sparse_int;

#[test]
fn empty_column_produces_no_groups() {
	let column = Int32Column::from_values(Vec::<Option<i32>>::new(), false).unwrap();
	let result = sparse_int::build(&column, None);
	assert_eq!(result.group_count(), 0);
}

#[test]
fn building_over_a_row_subset_only_visits_those_rows() {
	let column = Int32Column::from_values([Some(1), Some(2), Some(1), Some(3)], false).unwrap();
	let result = sparse_int::build(&column, Some(&[1, 3]));
	assert_eq!(result.group_count(), 2);
	let mut keys = result.keys().to_vec();
	keys.sort_unstable();
	assert_eq!(keys, vec![2, 3]);
}

#[test]
fn negative_keys_hash_and_group_correctly() {
	let column = Int32Column::from_values([Some(-5), Some(-5), Some(i32::MIN), Some(i32::MAX)], false).unwrap();
	let result = sparse_int::build(&column, None);
	assert_eq!(result.group_count(), 3);
}
