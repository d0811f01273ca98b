// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Single-pass aggregation kernels consuming a [`GroupResult`] (spec §4.4):
//! `Sum`, `Mean`, `Min`, `Max`, `Count` over each CSR window, plus the
//! trailing null-group row. Key columns are reconstructed alongside the
//! aggregation outputs — either by projecting the stored literal key
//! (direct/sparse-int dispatch) or by reading the representative row back
//! out of the original column (every other dispatch strategy).

use vecta_column::{BoolColumn, Column, Float64Column, Int32Column, Int64Column, StringColumn, TimestampColumn};
use vecta_core::{Error, Result};
use vecta_type::Type;

/// One of the five reducers a `GroupResult` window can be folded through
/// (spec §4.4).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggOp {
	Sum,
	Mean,
	Min,
	Max,
	Count,
}

/// An aggregation definition: apply `op` to `source_columns[source]`,
/// naming the resulting output column `output_name`.
#[derive(Clone, Debug)]
pub struct AggDef {
	pub source: usize,
	pub op: AggOp,
	pub output_name: String,
}

impl AggDef {
	pub fn new(source: usize, op: AggOp, output_name: impl Into<String>) -> Self {
		Self { source, op, output_name: output_name.into() }
	}
}

/// One materialized aggregation output column, named per its [`AggDef`].
pub struct AggOutput {
	pub name: String,
	pub column: Column,
}

/// Runs every `def` in `defs` over `result`'s groups in a single pass each,
/// and reconstructs `key_columns` (in dispatch order) alongside them. The
/// null group, if present, is emitted as one trailing row in both the keys
/// and every aggregation output (spec §4.2, §4.4).
#[tracing::instrument(level = "debug", skip(result, key_columns, source_columns, defs))]
pub fn aggregate(
	result: &vecta_column::GroupResult,
	key_columns: &[&Column],
	source_columns: &[&Column],
	defs: &[AggDef],
) -> Result<(Vec<Column>, Vec<AggOutput>)> {
	let keys = reconstruct_keys(result, key_columns)?;
	let mut outputs = Vec::with_capacity(defs.len());
	for def in defs {
		let source = source_columns
			.get(def.source)
			.copied()
			.ok_or_else(|| Error::column_not_found(format!("aggregation source index {}", def.source)))?;
		outputs.push(AggOutput { name: def.output_name.clone(), column: aggregate_one(result, source, def.op)? });
	}
	Ok((keys, outputs))
}

/// Projects each group's key back into `key_columns.len()` output columns.
fn reconstruct_keys(result: &vecta_column::GroupResult, key_columns: &[&Column]) -> Result<Vec<Column>> {
	let has_null_group = result.has_null_group();
	if !result.keys_are_row_indices() {
		let Some(&column) = key_columns.first() else {
			return Err(Error::InvalidPlan("group-by result has no key columns to reconstruct".into()));
		};
		let Column::Int32(_) = column else {
			return Err(Error::Unsupported("literal group keys are only produced for an Int32 key column".into()));
		};
		let mut out = Int32Column::with_capacity(result.group_count() + has_null_group as usize, true);
		for &key in result.keys() {
			out.append(Some(key as i32))?;
		}
		if has_null_group {
			out.append(None)?;
		}
		return Ok(vec![Column::Int32(out)]);
	}

	let rep_rows: Vec<usize> = (0..result.group_count())
		.map(|g| {
			let (start, _) = result.group_window(g);
			result.row_indices()[start] as usize
		})
		.collect();

	key_columns.iter().map(|&column| project_rows(column, &rep_rows, has_null_group)).collect()
}

/// Materializes `column.get(rows[i])` for each `i`, optionally appending one
/// trailing null row. Category columns preserve their shared dictionary via
/// `clone_subset` rather than round-tripping through decoded strings.
fn project_rows(column: &Column, rows: &[usize], trailing_null: bool) -> Result<Column> {
	Ok(match column {
		Column::Int32(c) => {
			let mut out = Int32Column::with_capacity(rows.len() + trailing_null as usize, true);
			for &r in rows {
				out.append(c.get(r))?;
			}
			if trailing_null {
				out.append(None)?;
			}
			Column::Int32(out)
		}
		Column::Float64(c) => {
			let mut out = Float64Column::with_capacity(rows.len() + trailing_null as usize, true);
			for &r in rows {
				out.append(c.get(r))?;
			}
			if trailing_null {
				out.append(None)?;
			}
			Column::Float64(out)
		}
		Column::Bool(c) => {
			let mut out = BoolColumn::new(true);
			for &r in rows {
				out.append(c.get(r))?;
			}
			if trailing_null {
				out.append(None)?;
			}
			Column::Bool(out)
		}
		Column::Timestamp(c) => {
			let mut out = TimestampColumn::new(true);
			for &r in rows {
				out.append(c.get(r))?;
			}
			if trailing_null {
				out.append(None)?;
			}
			Column::Timestamp(out)
		}
		Column::String(c) => {
			let mut out = StringColumn::new(true);
			for &r in rows {
				out.append(c.get(r))?;
			}
			if trailing_null {
				out.append(None)?;
			}
			Column::String(out)
		}
		Column::Category(c) => {
			let mut out = c.clone_subset(rows)?;
			if trailing_null {
				out.append(None)?;
			}
			Column::Category(out)
		}
		Column::Int64(_) => return Err(Error::Unsupported("Int64 cannot be a group-by key column".into())),
	})
}

/// Folds one `AggDef` over every group window plus the trailing null group.
fn aggregate_one(result: &vecta_column::GroupResult, source: &Column, op: AggOp) -> Result<Column> {
	let group_count = result.group_count();
	let has_null_group = result.has_null_group();
	let total = group_count + has_null_group as usize;
	let row_indices = result.row_indices();

	if op == AggOp::Count {
		let mut out = Int32Column::with_capacity(total, false);
		for g in 0..group_count {
			let (start, end) = result.group_window(g);
			out.append(Some((end - start) as i32))?;
		}
		if let Some(null_rows) = result.null_group_indices() {
			out.append(Some(null_rows.len() as i32))?;
		}
		return Ok(Column::Int32(out));
	}

	match (op, source) {
		(AggOp::Sum, Column::Int32(c)) => {
			let mut out = Int64Column::with_capacity(total);
			for g in 0..group_count {
				let (start, end) = result.group_window(g);
				let (sum, any) = c.compute_sum(row_indices, start, end);
				out.push(any.then_some(sum));
			}
			if let Some(null_rows) = result.null_group_indices() {
				let (sum, any) = c.compute_sum(null_rows, 0, null_rows.len());
				out.push(any.then_some(sum));
			}
			Ok(Column::Int64(out))
		}
		(AggOp::Sum, Column::Float64(c)) => {
			let mut out = Float64Column::with_capacity(total, true);
			for g in 0..group_count {
				let (start, end) = result.group_window(g);
				let (sum, any) = c.compute_sum(row_indices, start, end);
				out.append(any.then_some(sum))?;
			}
			if let Some(null_rows) = result.null_group_indices() {
				let (sum, any) = c.compute_sum(null_rows, 0, null_rows.len());
				out.append(any.then_some(sum))?;
			}
			Ok(Column::Float64(out))
		}
		(AggOp::Mean, Column::Int32(c)) => {
			let mut out = Float64Column::with_capacity(total, true);
			for g in 0..group_count {
				let (start, end) = result.group_window(g);
				out.append(c.compute_mean(row_indices, start, end))?;
			}
			if let Some(null_rows) = result.null_group_indices() {
				out.append(c.compute_mean(null_rows, 0, null_rows.len()))?;
			}
			Ok(Column::Float64(out))
		}
		(AggOp::Mean, Column::Float64(c)) => {
			let mut out = Float64Column::with_capacity(total, true);
			for g in 0..group_count {
				let (start, end) = result.group_window(g);
				out.append(c.compute_mean(row_indices, start, end))?;
			}
			if let Some(null_rows) = result.null_group_indices() {
				out.append(c.compute_mean(null_rows, 0, null_rows.len()))?;
			}
			Ok(Column::Float64(out))
		}
		(AggOp::Min, Column::Int32(c)) => fold_int32(result, c, total, Int32Column::compute_min),
		(AggOp::Max, Column::Int32(c)) => fold_int32(result, c, total, Int32Column::compute_max),
		(AggOp::Min, Column::Float64(c)) => fold_float64(result, c, total, Float64Column::compute_min),
		(AggOp::Max, Column::Float64(c)) => fold_float64(result, c, total, Float64Column::compute_max),
		(_, other) => Err(Error::Unsupported(format!("{op:?} over a {} source column is not supported", other.type_tag()))),
	}
}

fn fold_int32(
	result: &vecta_column::GroupResult,
	c: &Int32Column,
	total: usize,
	f: fn(&Int32Column, &[u32], usize, usize) -> Option<i32>,
) -> Result<Column> {
	let group_count = result.group_count();
	let row_indices = result.row_indices();
	let mut out = Int32Column::with_capacity(total, true);
	for g in 0..group_count {
		let (start, end) = result.group_window(g);
		out.append(f(c, row_indices, start, end))?;
	}
	if let Some(null_rows) = result.null_group_indices() {
		out.append(f(c, null_rows, 0, null_rows.len()))?;
	}
	Ok(Column::Int32(out))
}

fn fold_float64(
	result: &vecta_column::GroupResult,
	c: &Float64Column,
	total: usize,
	f: fn(&Float64Column, &[u32], usize, usize) -> Option<f64>,
) -> Result<Column> {
	let group_count = result.group_count();
	let row_indices = result.row_indices();
	let mut out = Float64Column::with_capacity(total, true);
	for g in 0..group_count {
		let (start, end) = result.group_window(g);
		out.append(f(c, row_indices, start, end))?;
	}
	if let Some(null_rows) = result.null_group_indices() {
		out.append(f(c, null_rows, 0, null_rows.len()))?;
	}
	Ok(Column::Float64(out))
}

/// Reports the output `Type` an `(op, source_kind)` pair would produce,
/// without running the fold — used by the planner to build the aggregate
/// output schema ahead of execution (spec §4.6).
pub fn output_type(op: AggOp, source_kind: Type) -> Result<Type> {
	match (op, source_kind) {
		(AggOp::Count, _) => Ok(Type::Int32),
		(AggOp::Sum, Type::Int32) => Ok(Type::Int64),
		(AggOp::Sum, Type::Float64) => Ok(Type::Float64),
		(AggOp::Mean, Type::Int32 | Type::Float64) => Ok(Type::Float64),
		(AggOp::Min | AggOp::Max, kind @ (Type::Int32 | Type::Float64)) => Ok(kind),
		_ => Err(Error::Unsupported(format!("{op:?} over a {source_kind} source column is not supported"))),
	}
}

#[cfg(test)]
mod tests {
	use vecta_column::{GroupResult, Int32Column, StringColumn};

	use super::*;

	fn scenario_1() -> (GroupResult, Int32Column) {
		let id = Int32Column::from_values([Some(1), Some(1), Some(2), Some(3), Some(3), Some(3)], false).unwrap();
		let result = crate::group_by::sparse_int::build(&id, None);
		(result, id)
	}

	#[test]
	fn dense_group_by_count_matches_scenario_1() {
		let (result, id) = scenario_1();
		let id_col = Column::Int32(id);
		let (keys, outputs) = aggregate(&result, &[&id_col], &[&id_col], &[AggDef::new(0, AggOp::Count, "count")]).unwrap();
		let Column::Int32(keys) = &keys[0] else { panic!("expected Int32 keys") };
		let mut pairs: Vec<(i32, i32)> = (0..keys.len())
			.map(|i| {
				let Column::Int32(count) = &outputs[0].column else { panic!() };
				(keys.get(i).unwrap(), count.get(i).unwrap())
			})
			.collect();
		pairs.sort_unstable();
		assert_eq!(pairs, vec![(1, 2), (2, 1), (3, 3)]);
	}

	#[test]
	fn category_sum_matches_scenario_2() {
		let dept = StringColumn::from_values([Some("IT"), Some("IT"), Some("HR")], false).unwrap();
		let salary = Int32Column::from_values([Some(5000), Some(4000), Some(3000)], false).unwrap();
		let dept_col = Column::String(dept);
		let salary_col = Column::Int32(salary);
		let result = crate::group_by::string_table::build(
			match &dept_col {
				Column::String(c) => c,
				_ => unreachable!(),
			},
			None,
		);
		let (keys, outputs) =
			aggregate(&result, &[&dept_col], &[&salary_col], &[AggDef::new(0, AggOp::Sum, "Total")]).unwrap();
		let Column::String(keys) = &keys[0] else { panic!("expected String keys") };
		let Column::Int64(totals) = &outputs[0].column else { panic!("expected Int64 totals") };
		let mut pairs: Vec<(String, i64)> =
			(0..keys.len()).map(|i| (keys.get(i).unwrap().to_string(), totals.get(i).unwrap())).collect();
		pairs.sort_unstable();
		assert_eq!(pairs, vec![("HR".to_string(), 3000), ("IT".to_string(), 9000)]);
	}

	#[test]
	fn null_group_count_matches_scenario_3() {
		let cat = StringColumn::from_values([Some("A"), None, Some("A"), None], true).unwrap();
		let cat_col = Column::String(cat);
		let result = crate::group_by::string_table::build(
			match &cat_col {
				Column::String(c) => c,
				_ => unreachable!(),
			},
			None,
		);
		assert!(result.has_null_group());
		let (keys, outputs) = aggregate(&result, &[&cat_col], &[&cat_col], &[AggDef::new(0, AggOp::Count, "count")]).unwrap();
		let Column::String(keys) = &keys[0] else { panic!("expected String keys") };
		let Column::Int32(counts) = &outputs[0].column else { panic!("expected Int32 counts") };
		assert_eq!(keys.len(), 2);
		assert_eq!(counts.len(), 2);
		assert!(keys.is_null(1));
		assert_eq!(counts.get(1), Some(2));
		assert_eq!(keys.get(0), Some("A"));
		assert_eq!(counts.get(0), Some(2));
	}

	#[test]
	fn empty_group_mean_is_null() {
		let salary = Float64Column::from_values(Vec::<Option<f64>>::new(), true).unwrap();
		let result = GroupResult::new(false);
		let salary_col = Column::Float64(salary);
		let output = aggregate_one(&result, &salary_col, AggOp::Mean).unwrap();
		assert_eq!(output.len(), 0);
	}

	#[test]
	fn sum_overflow_wraps_modulo_2_pow_64() {
		let values = Int32Column::from_values([Some(i32::MAX), Some(1)], false).unwrap();
		let mut result = GroupResult::new(false);
		result.begin_group(0);
		result.push_row(0);
		result.push_row(1);
		let source = Column::Int32(values);
		let output = aggregate_one(&result, &source, AggOp::Sum).unwrap();
		let Column::Int64(out) = output else { panic!("expected Int64 sum output") };
		assert_eq!(out.get(0), Some(i32::MAX as i64 + 1));
	}
}
