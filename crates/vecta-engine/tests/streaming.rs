// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Integration tests for the streaming recognizer and zero-allocation
//! iterator (spec §4.6): `execute_streaming` returns `Stream` only for the
//! single-column count-group shape, `Relation` for everything else, and
//! `collect()`/`execute()` always materializes regardless of which path ran.

use vecta_column::{Column, Int32Column, StringColumn};
use vecta_core::EngineConfig;
use vecta_engine::{execute, execute_streaming, AggOp, Expr, ExecutionOutput, LogicalPlan, Relation};
use vecta_type::Value;

fn scan(columns: Vec<(&str, Column)>) -> LogicalPlan {
	let relation = Relation::new(columns.into_iter().map(|(n, c)| (n.to_string(), c)).collect()).unwrap();
	LogicalPlan::Scan(relation)
}

#[test]
fn single_column_count_group_is_recognized_as_a_stream() {
	let grp = Column::String(StringColumn::from_values([Some("A"), Some("A"), Some("B")], false).unwrap());
	let plan = LogicalPlan::Aggregate {
		input: Box::new(scan(vec![("Grp", grp)])),
		group_exprs: vec![Expr::col("Grp")],
		agg_exprs: vec![Expr::Agg(AggOp::Count, Box::new(Expr::col("Grp"))).alias("count")],
	};
	let output = execute_streaming(&plan, &EngineConfig::default()).unwrap();
	let ExecutionOutput::Stream(mut stream) = output else { panic!("expected a streaming plan") };

	let mut seen = Vec::new();
	while let Some(row) = stream.next() {
		let Value::String(key) = &row.key else { panic!("expected string key") };
		seen.push((key.clone(), row.count));
	}
	seen.sort_unstable();
	assert_eq!(seen, vec![("A".to_string(), 2), ("B".to_string(), 1)]);
}

#[test]
fn multi_column_group_falls_back_to_a_materialized_relation() {
	let grp = Column::String(StringColumn::from_values([Some("A"), Some("A"), Some("B")], false).unwrap());
	let level = Column::Int32(Int32Column::from_values([Some(1), Some(1), Some(2)], false).unwrap());
	let plan = LogicalPlan::Aggregate {
		input: Box::new(scan(vec![("Grp", grp), ("Level", level)])),
		group_exprs: vec![Expr::col("Grp"), Expr::col("Level")],
		agg_exprs: vec![Expr::Agg(AggOp::Count, Box::new(Expr::col("Grp"))).alias("count")],
	};
	let output = execute_streaming(&plan, &EngineConfig::default()).unwrap();
	assert!(matches!(output, ExecutionOutput::Relation(_)));
}

#[test]
fn a_non_aggregate_plan_is_never_recognized_as_a_stream() {
	let val = Column::Int32(Int32Column::from_values([Some(1), Some(2)], false).unwrap());
	let plan = scan(vec![("Val", val)]);
	let output = execute_streaming(&plan, &EngineConfig::default()).unwrap();
	assert!(matches!(output, ExecutionOutput::Relation(_)));
}

#[test]
fn collect_materializes_a_stream_eligible_plan_into_an_equivalent_relation() {
	let grp = Column::String(StringColumn::from_values([Some("A"), Some("A"), Some("B")], false).unwrap());
	let plan = LogicalPlan::Aggregate {
		input: Box::new(scan(vec![("Grp", grp)])),
		group_exprs: vec![Expr::col("Grp")],
		agg_exprs: vec![Expr::Agg(AggOp::Count, Box::new(Expr::col("Grp"))).alias("count")],
	};
	let relation = execute(&plan, &EngineConfig::default()).unwrap();
	let Column::Int32(count) = relation.column("count").unwrap() else { panic!("expected int32 count") };
	let Column::String(grp) = relation.column("Grp").unwrap() else { panic!("expected string group") };
	let mut pairs: Vec<(String, i32)> =
		(0..grp.len()).map(|i| (grp.get(i).unwrap().to_string(), count.get(i).unwrap())).collect();
	pairs.sort_unstable();
	assert_eq!(pairs, vec![("A".to_string(), 2), ("B".to_string(), 1)]);
}

#[test]
fn a_trailing_null_group_is_streamed_as_a_null_keyed_row() {
	let cat = Column::String(StringColumn::from_values([Some("A"), None, Some("A"), None], true).unwrap());
	let plan = LogicalPlan::Aggregate {
		input: Box::new(scan(vec![("Cat", cat)])),
		group_exprs: vec![Expr::col("Cat")],
		agg_exprs: vec![Expr::Agg(AggOp::Count, Box::new(Expr::col("Cat"))).alias("count")],
	};
	let ExecutionOutput::Stream(mut stream) = execute_streaming(&plan, &EngineConfig::default()).unwrap() else {
		panic!("expected a streaming plan")
	};
	let mut rows = Vec::new();
	while let Some(row) = stream.next() {
		rows.push((row.key.clone(), row.count));
	}
	assert_eq!(rows.len(), 2);
	assert!(rows.iter().any(|(k, c)| matches!(k, Value::Null) && *c == 2));
}
