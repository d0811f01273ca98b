// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The physical planner (spec §4.6): lowers each `LogicalPlan` node to the
//! kernels in `group_by`, `aggregate`, `sort`, `filter`, `join` and
//! `arithmetic`, and recognizes the one plan shape eligible for the
//! zero-allocation streaming iterator (`stream.rs`).

use std::cmp::Ordering;
use std::sync::Arc;

use vecta_column::{BoolColumn, Column, Float64Column, Int32Column, StringColumn, TimestampColumn};
use vecta_core::{EngineConfig, Error, Result};
use vecta_type::Value;

use crate::aggregate::{self, AggDef};
use crate::filter::{self, CompareOp};
use crate::group_by;
use crate::join::{self, JoinKind};
use crate::plan::{BinaryOp, Expr, LogicalPlan, Relation};
use crate::sort::{self, SortKey};
use crate::stream::GroupStream;

/// What `collect()` produced: either a fully materialized `Relation`, or —
/// for the one recognized streaming shape — a zero-allocation iterator over
/// it instead (spec §4.6 "Streaming iterator").
pub enum ExecutionOutput {
	Relation(Relation),
	Stream(GroupStream),
}

/// Runs `plan` to completion on the caller's thread, fanning out internally
/// to kernels that use `rayon` (spec §5). Equivalent to `collect()`.
#[tracing::instrument(level = "debug", skip(plan, config))]
pub fn execute(plan: &LogicalPlan, config: &EngineConfig) -> Result<Relation> {
	match execute_streaming(plan, config)? {
		ExecutionOutput::Relation(relation) => Ok(relation),
		ExecutionOutput::Stream(stream) => stream.materialize(),
	}
}

/// Runs `plan`, recognizing the single-column count-group streaming shape
/// (spec §4.6 "Recognizer"). Equivalent to `collect_stream()`.
pub fn execute_streaming(plan: &LogicalPlan, config: &EngineConfig) -> Result<ExecutionOutput> {
	if let LogicalPlan::Aggregate { input, group_exprs, agg_exprs } = plan {
		if let [Expr::Col(key_name)] = group_exprs.as_slice() {
			if let [agg] = agg_exprs.as_slice() {
				if matches!(strip_alias(agg), Expr::Agg(aggregate::AggOp::Count, _)) {
					let relation = execute(input, config)?;
					let key_column = relation.column(key_name)?.clone();
					let result = group_by::dispatch(&[&key_column], config)?;
					let count_name = agg.inferred_name();
					return Ok(ExecutionOutput::Stream(GroupStream::new(key_name.clone(), count_name, key_column, result)));
				}
			}
		}
	}
	Ok(ExecutionOutput::Relation(execute_plan(plan, config)?))
}

fn strip_alias(expr: &Expr) -> &Expr {
	match expr {
		Expr::Alias(inner, _) => strip_alias(inner),
		other => other,
	}
}

fn execute_plan(plan: &LogicalPlan, config: &EngineConfig) -> Result<Relation> {
	match plan {
		LogicalPlan::Scan(relation) => Ok(relation.clone()),
		LogicalPlan::Filter { input, predicate } => execute_filter(input, predicate, config),
		LogicalPlan::Project { input, expressions } => execute_project(input, expressions, config),
		LogicalPlan::Join { left, right, key, kind } => execute_join(left, right, key, *kind, config),
		LogicalPlan::Aggregate { input, group_exprs, agg_exprs } => execute_aggregate(input, group_exprs, agg_exprs, config),
		LogicalPlan::OrderBy { input, keys, ascending } => execute_order_by(input, keys, ascending, config),
	}
}

/// Lowers `Filter` to the vectorized `Col ⊙ Lit` kernel when the predicate
/// has that shape, else falls back to a row-at-a-time evaluator (spec
/// §4.6).
fn execute_filter(input: &LogicalPlan, predicate: &Expr, config: &EngineConfig) -> Result<Relation> {
	let relation = execute_plan(input, config)?;
	let rows = match vectorizable_comparison(predicate) {
		Some((name, op, literal)) => filter::filter_column_literal(relation.column(name)?, op, literal)?,
		None => {
			let mut rows = Vec::new();
			for row in 0..relation.row_count() {
				if let Value::Bool(true) = eval_value(&relation, predicate, row)? {
					rows.push(row as u32);
				}
			}
			rows
		}
	};
	let indices: Vec<usize> = rows.into_iter().map(|r| r as usize).collect();
	rebuild_relation(&relation, &indices)
}

/// Recognizes `Col ⊙ Lit` / `Lit ⊙ Col` predicates eligible for the
/// vectorized filter kernel.
fn vectorizable_comparison(expr: &Expr) -> Option<(&str, CompareOp, &Value)> {
	let Expr::Binary(op, lhs, rhs) = expr else { return None };
	let op = compare_op(*op)?;
	match (lhs.as_ref(), rhs.as_ref()) {
		(Expr::Col(name), Expr::Lit(v)) => Some((name.as_str(), op, v)),
		(Expr::Lit(v), Expr::Col(name)) => Some((name.as_str(), flip(op), v)),
		_ => None,
	}
}

fn compare_op(op: BinaryOp) -> Option<CompareOp> {
	Some(match op {
		BinaryOp::Eq => CompareOp::Eq,
		BinaryOp::Ne => CompareOp::Ne,
		BinaryOp::Lt => CompareOp::Lt,
		BinaryOp::Le => CompareOp::Le,
		BinaryOp::Gt => CompareOp::Gt,
		BinaryOp::Ge => CompareOp::Ge,
		_ => return None,
	})
}

fn flip(op: CompareOp) -> CompareOp {
	match op {
		CompareOp::Lt => CompareOp::Gt,
		CompareOp::Le => CompareOp::Ge,
		CompareOp::Gt => CompareOp::Lt,
		CompareOp::Ge => CompareOp::Le,
		same => same,
	}
}

fn rebuild_relation(relation: &Relation, indices: &[usize]) -> Result<Relation> {
	let mut columns = Vec::with_capacity(relation.columns().len());
	for (name, column) in relation.columns() {
		columns.push((name.to_string(), column.clone_subset(indices)?));
	}
	Relation::new(columns)
}

/// Lowers `Project` to a chained series of arithmetic/comparison kernels,
/// one per output expression (spec §4.6).
fn execute_project(input: &LogicalPlan, expressions: &[Expr], config: &EngineConfig) -> Result<Relation> {
	let relation = execute_plan(input, config)?;
	let mut columns = Vec::with_capacity(expressions.len());
	for expr in expressions {
		columns.push((expr.inferred_name(), eval_column(&relation, expr)?));
	}
	Relation::new(columns)
}

/// Evaluates `expr` over every row of `relation` as a single `Column`,
/// using the arithmetic kernels for `+ − × ÷` and an elementwise builder
/// for comparisons.
fn eval_column(relation: &Relation, expr: &Expr) -> Result<Column> {
	match expr {
		Expr::Col(name) => Ok(relation.column(name)?.clone()),
		Expr::Lit(value) => broadcast_scalar(value, relation.row_count()),
		Expr::Alias(inner, _) => eval_column(relation, inner),
		Expr::Binary(op, lhs, rhs) => {
			let l = eval_column(relation, lhs)?;
			let r = eval_column(relation, rhs)?;
			eval_binary_column(*op, &l, &r)
		}
		Expr::Agg(..) => Err(Error::InvalidPlan("an aggregate expression may only appear in Aggregate.agg_exprs".into())),
	}
}

fn eval_binary_column(op: BinaryOp, l: &Column, r: &Column) -> Result<Column> {
	use vecta_column::ArithOp;
	match op {
		BinaryOp::Add => vecta_column::column_op_column(ArithOp::Add, l, r),
		BinaryOp::Sub => vecta_column::column_op_column(ArithOp::Sub, l, r),
		BinaryOp::Mul => vecta_column::column_op_column(ArithOp::Mul, l, r),
		BinaryOp::Div => vecta_column::column_op_column(ArithOp::Div, l, r),
		BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
			compare_columns(compare_op(op).expect("comparison op"), l, r)
		}
		BinaryOp::And | BinaryOp::Or => logical_columns(op, l, r),
	}
}

fn compare_columns(op: CompareOp, l: &Column, r: &Column) -> Result<Column> {
	if l.len() != r.len() {
		return Err(Error::Unsupported("comparison operands must have equal length".into()));
	}
	let mut out = BoolColumn::new(true);
	for row in 0..l.len() {
		if l.is_null(row) || r.is_null(row) {
			out.append(None)?;
			continue;
		}
		let (lv, rv) = (l.value_at(row), r.value_at(row));
		if lv.type_tag() != rv.type_tag() {
			return Err(Error::Unsupported(format!(
				"cannot compare {:?} against {:?} at row {row}",
				lv.type_tag(),
				rv.type_tag()
			)));
		}
		let ordering = lv.partial_cmp(&rv).expect("type tags already checked equal above");
		out.append(Some(matches_op(op, ordering)))?;
	}
	Ok(Column::Bool(out))
}

fn matches_op(op: CompareOp, ordering: Ordering) -> bool {
	match (op, ordering) {
		(CompareOp::Eq, Ordering::Equal) => true,
		(CompareOp::Ne, o) => o != Ordering::Equal,
		(CompareOp::Lt, Ordering::Less) => true,
		(CompareOp::Le, o) => o != Ordering::Greater,
		(CompareOp::Gt, Ordering::Greater) => true,
		(CompareOp::Ge, o) => o != Ordering::Less,
		_ => false,
	}
}

fn logical_columns(op: BinaryOp, l: &Column, r: &Column) -> Result<Column> {
	let (Column::Bool(lc), Column::Bool(rc)) = (l, r) else {
		return Err(Error::Unsupported("∧/∨ require Bool operands".into()));
	};
	if lc.len() != rc.len() {
		return Err(Error::Unsupported("logical operands must have equal length".into()));
	}
	let mut out = BoolColumn::new(true);
	for row in 0..lc.len() {
		let combined = match (lc.get(row), rc.get(row), op) {
			(Some(a), Some(b), BinaryOp::And) => Some(a && b),
			(Some(a), Some(b), BinaryOp::Or) => Some(a || b),
			(Some(false), _, BinaryOp::And) | (_, Some(false), BinaryOp::And) => Some(false),
			(Some(true), _, BinaryOp::Or) | (_, Some(true), BinaryOp::Or) => Some(true),
			_ => None,
		};
		out.append(combined)?;
	}
	Ok(Column::Bool(out))
}

fn broadcast_scalar(value: &Value, row_count: usize) -> Result<Column> {
	Ok(match value {
		Value::Null => return Err(Error::Unsupported("a bare null literal has no column type to broadcast into".into())),
		Value::Int32(v) => Column::Int32(Int32Column::from_values(std::iter::repeat_n(Some(*v), row_count), true)?),
		Value::Int64(_) => return Err(Error::Unsupported("Int64 literals are not supported in expressions".into())),
		Value::Float64(v) => Column::Float64(Float64Column::from_values(std::iter::repeat_n(Some(*v), row_count), true)?),
		Value::Bool(v) => {
			let mut out = BoolColumn::new(true);
			for _ in 0..row_count {
				out.append(Some(*v))?;
			}
			Column::Bool(out)
		}
		Value::Timestamp(v) => {
			let mut out = TimestampColumn::new(true);
			for _ in 0..row_count {
				out.append(Some(*v))?;
			}
			Column::Timestamp(out)
		}
		Value::String(v) => Column::String(StringColumn::from_values(std::iter::repeat_n(Some(v.as_str()), row_count), true)?),
	})
}

/// Row-at-a-time fallback evaluator for predicates that aren't `Col ⊙ Lit`.
fn eval_value(relation: &Relation, expr: &Expr, row: usize) -> Result<Value> {
	match expr {
		Expr::Col(name) => Ok(relation.column(name)?.value_at(row)),
		Expr::Lit(value) => Ok(value.clone()),
		Expr::Alias(inner, _) => eval_value(relation, inner, row),
		Expr::Binary(op, lhs, rhs) => {
			let l = eval_value(relation, lhs, row)?;
			let r = eval_value(relation, rhs, row)?;
			eval_binary_value(*op, &l, &r)
		}
		Expr::Agg(..) => Err(Error::InvalidPlan("an aggregate expression may only appear in Aggregate.agg_exprs".into())),
	}
}

fn eval_binary_value(op: BinaryOp, l: &Value, r: &Value) -> Result<Value> {
	if let Some(cmp) = compare_op(op) {
		if !l.is_null() && !r.is_null() && l.type_tag() != r.type_tag() {
			return Err(Error::Unsupported(format!("cannot compare {:?} against {:?}", l.type_tag(), r.type_tag())));
		}
		let ordering = l.partial_cmp(r).expect("null-handling and type-tag equality checked above");
		return Ok(Value::Bool(matches_op(cmp, ordering)));
	}
	match (op, l, r) {
		(BinaryOp::And, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
		(BinaryOp::Or, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
		(BinaryOp::Add, Value::Int32(a), Value::Int32(b)) => Ok(Value::Int32(a.wrapping_add(*b))),
		(BinaryOp::Sub, Value::Int32(a), Value::Int32(b)) => Ok(Value::Int32(a.wrapping_sub(*b))),
		(BinaryOp::Mul, Value::Int32(a), Value::Int32(b)) => Ok(Value::Int32(a.wrapping_mul(*b))),
		(BinaryOp::Div, Value::Int32(a), Value::Int32(b)) => {
			if *b == 0 { Err(Error::ArithError("division by literal zero".into())) } else { Ok(Value::Int32(a / b)) }
		}
		(BinaryOp::Add, a, b) => Ok(Value::Float64(as_f64(a)? + as_f64(b)?)),
		(BinaryOp::Sub, a, b) => Ok(Value::Float64(as_f64(a)? - as_f64(b)?)),
		(BinaryOp::Mul, a, b) => Ok(Value::Float64(as_f64(a)? * as_f64(b)?)),
		(BinaryOp::Div, a, b) => Ok(Value::Float64(as_f64(a)? / as_f64(b)?)),
		_ => Err(Error::Unsupported(format!("cannot evaluate {op:?} over {l:?} and {r:?}"))),
	}
}

fn as_f64(value: &Value) -> Result<f64> {
	match value {
		Value::Int32(v) => Ok(*v as f64),
		Value::Float64(v) => Ok(*v),
		other => Err(Error::Unsupported(format!("{other:?} is not numeric"))),
	}
}

/// Lowers `Aggregate`: resolves group/agg expressions to columns, picks a
/// grouping strategy (§4.3), and runs the aggregation kernels (§4.4).
fn execute_aggregate(input: &LogicalPlan, group_exprs: &[Expr], agg_exprs: &[Expr], config: &EngineConfig) -> Result<Relation> {
	let relation = execute_plan(input, config)?;

	let group_names: Vec<&str> = group_exprs
		.iter()
		.map(|e| match e {
			Expr::Col(name) => Ok(name.as_str()),
			other => Err(Error::InvalidPlan(format!("group-by expression must be a bare column reference, found {other:?}"))),
		})
		.collect::<Result<_>>()?;
	let key_columns: Vec<&Column> = group_names.iter().map(|name| relation.column(name)).collect::<Result<_>>()?;

	let mut source_names: Vec<&str> = Vec::new();
	let mut defs = Vec::with_capacity(agg_exprs.len());
	for expr in agg_exprs {
		let output_name = expr.inferred_name();
		let Expr::Agg(op, inner) = strip_alias(expr) else {
			return Err(Error::InvalidPlan(format!("aggregate expression must wrap Agg(...), found {expr:?}")));
		};
		let Expr::Col(source_name) = inner.as_ref() else {
			return Err(Error::InvalidPlan("an aggregate's operand must be a bare column reference".into()));
		};
		let index = match source_names.iter().position(|&n| n == source_name.as_str()) {
			Some(i) => i,
			None => {
				source_names.push(source_name.as_str());
				source_names.len() - 1
			}
		};
		defs.push(AggDef::new(index, *op, output_name));
	}
	let source_columns: Vec<&Column> = source_names.iter().map(|name| relation.column(name)).collect::<Result<_>>()?;

	let result = group_by::dispatch(&key_columns, config)?;
	let (keys, outputs) = aggregate::aggregate(&result, &key_columns, &source_columns, &defs)?;

	let mut columns = Vec::with_capacity(keys.len() + outputs.len());
	for (name, column) in group_names.into_iter().zip(keys) {
		columns.push((name.to_string(), column));
	}
	for output in outputs {
		columns.push((output.name, output.column));
	}
	Relation::new(columns)
}

/// Lowers `Join(right, key, kind)`: builds a hash index on the right side's
/// key column, probes the left side row-by-row, and concatenates matched
/// columns — duplicate right-side keys Cartesian-expand (spec §4.6, §9).
fn execute_join(left: &LogicalPlan, right: &LogicalPlan, key: &str, kind: JoinKind, config: &EngineConfig) -> Result<Relation> {
	let left_relation = execute_plan(left, config)?;
	let right_relation = execute_plan(right, config)?;

	let left_key = left_relation.column(key)?;
	let right_key = right_relation.column(key)?;
	let rows = join::hash_join(left_key, right_key, kind)?;

	let mut columns = Vec::new();
	for (name, column) in left_relation.columns() {
		columns.push((name.to_string(), join::project_left(column, &rows)?));
	}
	for (name, column) in right_relation.columns() {
		if name.as_ref() == key {
			continue;
		}
		columns.push((dedupe_name(&columns, name), join::project_right(column, &rows)?));
	}
	Relation::new(columns)
}

fn dedupe_name(existing: &[(String, Column)], name: &Arc<str>) -> String {
	if existing.iter().any(|(n, _)| n == name.as_ref()) { format!("right.{name}") } else { name.to_string() }
}

/// Lowers `OrderBy`: permutes row indices via the sort kernel, then
/// materializes every column by `clone_subset` (spec §4.6, §4.7).
fn execute_order_by(input: &LogicalPlan, keys: &[Expr], ascending: &[bool], config: &EngineConfig) -> Result<Relation> {
	let relation = execute_plan(input, config)?;
	let key_names: Vec<&str> = keys
		.iter()
		.map(|e| match e {
			Expr::Col(name) => Ok(name.as_str()),
			other => Err(Error::InvalidPlan(format!("order-by expression must be a bare column reference, found {other:?}"))),
		})
		.collect::<Result<_>>()?;
	let key_columns: Vec<&Column> = key_names.iter().map(|name| relation.column(name)).collect::<Result<_>>()?;
	let sort_keys: Vec<SortKey> = key_columns
		.iter()
		.zip(ascending.iter().copied().chain(std::iter::repeat(true)))
		.map(|(&column, asc)| SortKey::new(column, asc))
		.collect();
	let indices = sort::sort_indices(&sort_keys, relation.row_count());
	let indices: Vec<usize> = indices.into_iter().map(|i| i as usize).collect();
	rebuild_relation(&relation, &indices)
}

#[cfg(test)]
mod tests {
	use vecta_column::Int32Column;

	use super::*;

	fn relation_with_id() -> Relation {
		let id = Column::Int32(Int32Column::from_values([Some(1), Some(1), Some(2), Some(3), Some(3), Some(3)], false).unwrap());
		Relation::new(vec![("Id".to_string(), id)]).unwrap()
	}

	#[test]
	fn dense_group_by_count_matches_scenario_1() {
		let plan = LogicalPlan::Aggregate {
			input: Box::new(LogicalPlan::Scan(relation_with_id())),
			group_exprs: vec![Expr::col("Id")],
			agg_exprs: vec![Expr::Agg(aggregate::AggOp::Count, Box::new(Expr::col("Id"))).alias("count")],
		};
		let config = EngineConfig::default();
		let relation = execute(&plan, &config).unwrap();
		let Column::Int32(ids) = relation.column("Id").unwrap() else { panic!() };
		let Column::Int32(counts) = relation.column("count").unwrap() else { panic!() };
		let mut pairs: Vec<(i32, i32)> = (0..ids.len()).map(|i| (ids.get(i).unwrap(), counts.get(i).unwrap())).collect();
		pairs.sort_unstable();
		assert_eq!(pairs, vec![(1, 2), (2, 1), (3, 3)]);
	}

	#[test]
	fn vectorized_arithmetic_round_trip_matches_scenario_4() {
		let val = Column::Float64(vecta_column::Float64Column::from_values([Some(10.0), Some(20.0), Some(30.0)], false).unwrap());
		let relation = Relation::new(vec![("Val".to_string(), val)]).unwrap();
		let plan = LogicalPlan::Project {
			input: Box::new(LogicalPlan::Scan(relation)),
			expressions: vec![Expr::col("Val")
				.binary(BinaryOp::Mul, Expr::lit(Value::Float64(2.0)))
				.binary(BinaryOp::Add, Expr::lit(Value::Float64(5.0)))
				.alias("R")],
		};
		let config = EngineConfig::default();
		let relation = execute(&plan, &config).unwrap();
		let Column::Float64(r) = relation.column("R").unwrap() else { panic!() };
		assert_eq!((0..3).map(|i| r.get(i).unwrap()).collect::<Vec<_>>(), vec![25.0, 45.0, 65.0]);
	}

	#[test]
	fn streaming_recognizer_matches_scenario_6() {
		let grp = Column::String(vecta_column::StringColumn::from_values([Some("A"), Some("A"), Some("B")], false).unwrap());
		let relation = Relation::new(vec![("Grp".to_string(), grp)]).unwrap();
		let plan = LogicalPlan::Aggregate {
			input: Box::new(LogicalPlan::Scan(relation)),
			group_exprs: vec![Expr::col("Grp")],
			agg_exprs: vec![Expr::Agg(aggregate::AggOp::Count, Box::new(Expr::col("Grp"))).alias("count")],
		};
		let config = EngineConfig::default();
		let output = execute_streaming(&plan, &config).unwrap();
		assert!(matches!(output, ExecutionOutput::Stream(_)));
	}

	#[test]
	fn comparing_mismatched_column_types_is_an_error_not_a_panic() {
		let mut bools = vecta_column::BoolColumn::new(false);
		bools.append(Some(true)).unwrap();
		bools.append(Some(false)).unwrap();
		let relation = Relation::new(vec![("Flag".to_string(), Column::Bool(bools))]).unwrap();
		let plan = LogicalPlan::Filter {
			input: Box::new(LogicalPlan::Scan(relation)),
			predicate: Expr::col("Flag").binary(BinaryOp::Gt, Expr::lit(Value::Int32(1))),
		};
		let config = EngineConfig::default();
		let result = execute(&plan, &config);
		assert!(matches!(result, Err(Error::Unsupported(_))));
	}
}
