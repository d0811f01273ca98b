// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The fluent lazy query surface (spec §4.6, §6): each method wraps the
//! current plan in one more `LogicalPlan` node; nothing runs until
//! `collect`/`collect_stream`.

use vecta_core::{EngineConfig, Result};
use vecta_engine::{AggOp, Expr, ExecutionOutput, GroupStream, JoinKind, LogicalPlan, Relation};

use crate::agg::COUNT_STAR;
use crate::frame::Frame;
use crate::schema::{Schema, SchemaField};

/// A deferred query over a [`Frame`]. Every builder method is
/// infallible — a malformed plan (e.g. a group-by expression that isn't a
/// bare column) surfaces as an `Err` from `collect`/`collect_stream`, never
/// from the builder itself (spec §7 "errors bubble to the caller of
/// collect").
#[derive(Clone, Debug)]
pub struct LazyFrame {
	plan: LogicalPlan,
	config: EngineConfig,
}

/// What `collect_stream()` produced (spec §4.6 "Streaming iterator"): the
/// zero-allocation row-view iterator for the one recognized plan shape, or
/// a fully materialized frame for every other shape — walked by ordinary
/// column access rather than a second specialized iterator type (spec §9
/// "do not over-specialize").
pub enum LazyOutput {
	Group(GroupStream),
	Materialized(Frame),
}

impl LazyFrame {
	pub(crate) fn scan(relation: Relation) -> Self {
		Self { plan: LogicalPlan::Scan(relation), config: EngineConfig::default() }
	}

	/// Overrides the default `EngineConfig` (spec §6 configuration knobs).
	pub fn with_config(mut self, config: EngineConfig) -> Self {
		self.config = config;
		self
	}

	pub fn filter(self, predicate: Expr) -> Self {
		Self { plan: LogicalPlan::Filter { input: Box::new(self.plan), predicate }, config: self.config }
	}

	pub fn project(self, expressions: Vec<Expr>) -> Self {
		Self { plan: LogicalPlan::Project { input: Box::new(self.plan), expressions }, config: self.config }
	}

	pub fn join(self, right: LazyFrame, key: impl Into<String>, kind: JoinKind) -> Self {
		Self {
			plan: LogicalPlan::Join { left: Box::new(self.plan), right: Box::new(right.plan), key: key.into(), kind },
			config: self.config,
		}
	}

	/// `group_exprs` must each be a bare column reference (spec §4.6); any
	/// `agg_count` among `agg_exprs` is bound to the first such column,
	/// since `Count` does not read its nominal source column (see
	/// [`crate::agg::agg_count`]).
	pub fn group_by(self, group_exprs: Vec<Expr>, agg_exprs: Vec<Expr>) -> Self {
		let bind_to = group_exprs.iter().find_map(|e| match e {
			Expr::Col(name) => Some(name.clone()),
			_ => None,
		});
		let agg_exprs = match bind_to {
			Some(name) => agg_exprs.into_iter().map(|e| bind_count_star(e, &name)).collect(),
			None => agg_exprs,
		};
		Self { plan: LogicalPlan::Aggregate { input: Box::new(self.plan), group_exprs, agg_exprs }, config: self.config }
	}

	pub fn order_by(self, keys: Vec<Expr>, ascending: Vec<bool>) -> Self {
		Self { plan: LogicalPlan::OrderBy { input: Box::new(self.plan), keys, ascending }, config: self.config }
	}

	/// Runs the plan to completion, always returning a materialized frame
	/// (spec §6 `collect() → frame`).
	pub fn collect(self) -> Result<Frame> {
		let relation = vecta_engine::execute(&self.plan, &self.config)?;
		Ok(Frame::from_relation(relation_schema(&relation), relation))
	}

	/// Runs the plan, returning the zero-allocation row-view iterator for
	/// the recognized streaming shape, or a materialized frame otherwise
	/// (spec §6 `collect_stream() → iterator<row_view>`, §4.6 recognizer).
	pub fn collect_stream(self) -> Result<LazyOutput> {
		Ok(match vecta_engine::execute_streaming(&self.plan, &self.config)? {
			ExecutionOutput::Stream(stream) => LazyOutput::Group(stream),
			ExecutionOutput::Relation(relation) => LazyOutput::Materialized(Frame::from_relation(relation_schema(&relation), relation)),
		})
	}
}

fn bind_count_star(expr: Expr, bind_to: &str) -> Expr {
	match expr {
		Expr::Alias(inner, name) => Expr::Alias(Box::new(bind_count_star(*inner, bind_to)), name),
		Expr::Agg(AggOp::Count, inner) => match inner.as_ref() {
			Expr::Col(name) if name == COUNT_STAR => Expr::Agg(AggOp::Count, Box::new(Expr::col(bind_to))),
			_ => Expr::Agg(AggOp::Count, inner),
		},
		other => other,
	}
}

/// Derives a `Schema` from a plan's output `Relation` — every post-scan
/// plan node produces columns whose kind/nullability are already fixed by
/// the kernel that built them, so there is nothing left for the caller to
/// declare up front.
fn relation_schema(relation: &Relation) -> Schema {
	let fields = relation
		.columns()
		.iter()
		.map(|(name, column)| SchemaField::new(name.to_string(), column.type_tag(), column.nullable()))
		.collect();
	Schema::new(fields).expect("relation column names are already unique")
}
