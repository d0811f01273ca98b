// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The lazy plan AST (spec §4.6): logical plan nodes and the expression
//! language they carry. `Relation` is the engine-side stand-in for a scan
//! target — a named, ordered column list with no knowledge of the public
//! `Frame` type, which lives one layer up in `vecta-frame` and hands the
//! planner a `Relation` snapshot rather than a live reference.

use std::sync::Arc;

use vecta_column::Column;
use vecta_core::{Error, Result};
use vecta_type::Value;

use crate::aggregate::AggOp;
use crate::join::JoinKind;

/// An ordered, name-unique column list the planner executes plan nodes
/// over. Cheap to clone: columns are copy-on-write internally.
#[derive(Clone, Debug, Default)]
pub struct Relation {
	columns: Vec<(Arc<str>, Column)>,
}

impl Relation {
	pub fn new(columns: Vec<(String, Column)>) -> Result<Self> {
		let mut seen = std::collections::HashSet::new();
		let row_count = columns.first().map(|(_, c)| c.len());
		for (name, column) in &columns {
			if !seen.insert(name.as_str()) {
				return Err(Error::duplicate_column(name.clone()));
			}
			if let Some(expected) = row_count {
				if column.len() != expected {
					return Err(Error::type_mismatch(name.clone(), format!("length {expected}"), format!("length {}", column.len())));
				}
			}
		}
		Ok(Self { columns: columns.into_iter().map(|(name, c)| (Arc::from(name.as_str()), c)).collect() })
	}

	pub fn row_count(&self) -> usize {
		self.columns.first().map_or(0, |(_, c)| c.len())
	}

	pub fn column(&self, name: &str) -> Result<&Column> {
		self.columns.iter().find(|(n, _)| n.as_ref() == name).map(|(_, c)| c).ok_or_else(|| Error::column_not_found(name))
	}

	pub fn column_names(&self) -> impl Iterator<Item = &str> {
		self.columns.iter().map(|(n, _)| n.as_ref())
	}

	pub fn columns(&self) -> &[(Arc<str>, Column)] {
		&self.columns
	}

	pub fn into_columns(self) -> Vec<(Arc<str>, Column)> {
		self.columns
	}
}

/// Binary operators an [`Expr::Binary`] node can carry (spec §4.6).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
	Add,
	Sub,
	Mul,
	Div,
	Eq,
	Ne,
	Lt,
	Le,
	Gt,
	Ge,
	And,
	Or,
}

/// The expression AST (spec §4.6): columns, literals, binary operators,
/// aliases, and aggregate applications (the latter only meaningful as a
/// child of `LogicalPlan::Aggregate`'s `agg_exprs`).
#[derive(Clone, Debug)]
pub enum Expr {
	Col(String),
	Lit(Value),
	Binary(BinaryOp, Box<Expr>, Box<Expr>),
	Alias(Box<Expr>, String),
	Agg(AggOp, Box<Expr>),
}

impl Expr {
	pub fn col(name: impl Into<String>) -> Self {
		Expr::Col(name.into())
	}

	pub fn lit(value: Value) -> Self {
		Expr::Lit(value)
	}

	pub fn alias(self, name: impl Into<String>) -> Self {
		Expr::Alias(Box::new(self), name.into())
	}

	pub fn binary(self, op: BinaryOp, rhs: Expr) -> Self {
		Expr::Binary(op, Box::new(self), Box::new(rhs))
	}

	/// The output name a `Project`/`Aggregate` list should bind this
	/// expression under, absent an explicit `Alias`.
	pub fn inferred_name(&self) -> String {
		match self {
			Expr::Col(name) => name.clone(),
			Expr::Alias(_, name) => name.clone(),
			Expr::Agg(op, inner) => format!("{op:?}({})", inner.inferred_name()).to_lowercase(),
			Expr::Lit(v) => format!("{v}"),
			Expr::Binary(..) => "expr".to_string(),
		}
	}
}

/// Logical plan nodes (spec §4.6). `Scan` holds a materialized `Relation`
/// rather than a frame reference — see the module doc for why.
#[derive(Clone, Debug)]
pub enum LogicalPlan {
	Scan(Relation),
	Filter { input: Box<LogicalPlan>, predicate: Expr },
	Project { input: Box<LogicalPlan>, expressions: Vec<Expr> },
	Join { left: Box<LogicalPlan>, right: Box<LogicalPlan>, key: String, kind: JoinKind },
	Aggregate { input: Box<LogicalPlan>, group_exprs: Vec<Expr>, agg_exprs: Vec<Expr> },
	OrderBy { input: Box<LogicalPlan>, keys: Vec<Expr>, ascending: Vec<bool> },
}
