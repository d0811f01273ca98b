// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Group-by dispatch (spec §4.3): picks among direct addressing, the
//! sparse-integer/string/row-packed Swiss tables, the category pre-pass and
//! the partitioned-parallel variant based on key column count, kind and
//! `EngineConfig`. Mirrors the teacher's dispatch idiom of matching on a
//! small shape enum rather than runtime type inspection.

pub mod category;
pub mod direct;
pub mod partitioned;
pub mod row_pack;
pub mod sparse_int;
pub mod string_table;

use vecta_column::{CategoryColumn, Column, GroupResult, Int32Column, StringColumn};
use vecta_core::{EngineConfig, Error, Result};

/// Selects and runs a group-by strategy for `columns` (spec §4.3). A single
/// column dispatches to one of the integer/string/category paths; more than
/// one always uses the multi-column row-packed table (§4.3.5).
#[tracing::instrument(level = "debug", skip(columns, config))]
pub fn dispatch(columns: &[&Column], config: &EngineConfig) -> Result<GroupResult> {
	match columns {
		[] => Err(Error::InvalidPlan("group-by requires at least one key column".into())),
		[single] => dispatch_single(single, config),
		multi => Ok(row_pack::build(multi)),
	}
}

fn dispatch_single(column: &Column, config: &EngineConfig) -> Result<GroupResult> {
	match column {
		Column::Int32(c) => Ok(dispatch_int32(c, config)),
		Column::Category(c) => Ok(dispatch_category(c)),
		Column::String(c) => Ok(dispatch_string(c, config)),
		other => Err(Error::Unsupported(format!("group-by key of type {} is not supported", other.type_tag()))),
	}
}

fn dispatch_int32(column: &Int32Column, config: &EngineConfig) -> GroupResult {
	if let Some((min, max)) = direct::eligible(column, config) {
		return direct::build(column, min, max);
	}
	let eligible_for_partitioning = column.len() >= EngineConfig::PARTITION_ROW_THRESHOLD && !column.nulls().any_null();
	if eligible_for_partitioning {
		return partitioned::build_int32(column, config);
	}
	sparse_int::build(column, None)
}

fn dispatch_string(column: &StringColumn, config: &EngineConfig) -> GroupResult {
	if let Some(build) = category::try_prepass(column, config) {
		let mut codes = Int32Column::with_capacity(build.codes.len(), true);
		for &code in &build.codes {
			codes.append(if code == 0 { None } else { Some(code) }).expect("codes column is nullable");
		}
		return dispatch_int32(&codes, config).into_representative_keyed();
	}

	let eligible_for_partitioning = column.len() >= EngineConfig::PARTITION_ROW_THRESHOLD && !column.nulls().any_null();
	if eligible_for_partitioning {
		return partitioned::build_string(column, config);
	}
	string_table::build(column, None)
}

fn dispatch_category(column: &CategoryColumn) -> GroupResult {
	let mut codes = Int32Column::with_capacity(column.len(), true);
	for i in 0..column.len() {
		let code = column.code_at(i);
		codes.append(if code == 0 { None } else { Some(code) }).expect("codes column is nullable");
	}
	sparse_int::build(&codes, None).into_representative_keyed()
}
