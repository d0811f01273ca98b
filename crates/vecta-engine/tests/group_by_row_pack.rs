// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Integration tests for the multi-column row-packed group-by strategy
//! (spec §4.3.5): rows are routed to the null group if *any* selected key
//! column is null; equality is raw-bytes-of-the-packed-row, not a
//! strict fixed-width encoding comparison.

use vecta_column::{Column, Float64Column, Int32Column, StringColumn};
use vecta_engine::group_by::row_pack;

#[test]
fn groups_by_the_combination_of_all_key_columns() {
	let dept = Column::String(StringColumn::from_values([Some("IT"), Some("IT"), Some("HR"), Some("IT")], false).unwrap());
	let level = Column::Int32(Int32Column::from_values([Some(1), Some(2), Some(1), Some(1)], false).unwrap());
	let result = row_pack::build(&[&dept, &level]);
	// (IT,1) x2, (IT,2) x1, (HR,1) x1
	assert_eq!(result.group_count(), 3);
	let total: usize = (0..result.group_count()).map(|g| result.group_rows(g).len()).sum();
	assert_eq!(total, 4);
}

#[test]
fn a_null_in_any_key_column_routes_the_row_to_the_null_group() {
	let a = Column::Int32(Int32Column::from_values([Some(1), None, Some(1)], true).unwrap());
	let b = Column::Int32(Int32Column::from_values([Some(2), Some(2), None], true).unwrap());
	let result = row_pack::build(&[&a, &b]);
	assert_eq!(result.group_count(), 1);
	assert_eq!(result.null_group_indices(), Some(&[1u32, 2u32][..]));
}

#[test]
fn float_keys_compare_by_bit_pattern_not_by_partial_eq() {
	let nan_a = Column::Float64(Float64Column::from_values([Some(f64::NAN), Some(f64::NAN)], false).unwrap());
	let result = row_pack::build(&[&nan_a]);
	// Two NaN cells with identical bit patterns belong to the same group,
	// even though `NAN == NAN` is false under ordinary float equality.
	assert_eq!(result.group_count(), 1);
}
