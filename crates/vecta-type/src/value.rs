// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use crate::{OrderedF64, Ticks, Type};

/// A single scalar value, used for expression literals, comparisons against
/// a column, and as the materialized form of a group key or a cell read
/// back out of a `Frame`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	Null,
	Int32(i32),
	Int64(i64),
	Float64(f64),
	Bool(bool),
	Timestamp(Ticks),
	String(String),
}

impl Value {
	pub fn type_tag(&self) -> Option<Type> {
		match self {
			Value::Null => None,
			Value::Int32(_) => Some(Type::Int32),
			Value::Int64(_) => Some(Type::Int64),
			Value::Float64(_) => Some(Type::Float64),
			Value::Bool(_) => Some(Type::Bool),
			Value::Timestamp(_) => Some(Type::Timestamp),
			Value::String(_) => Some(Type::String),
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Int32(v) => Display::fmt(v, f),
			Value::Int64(v) => Display::fmt(v, f),
			Value::Float64(v) => Display::fmt(v, f),
			Value::Bool(v) => Display::fmt(v, f),
			Value::Timestamp(v) => Display::fmt(v, f),
			Value::String(v) => Display::fmt(v, f),
		}
	}
}

/// Ordering used by the sort kernel when comparing materialized keys or
/// literals: nulls sort last regardless of direction (spec §4.7), `NaN`
/// compares via `OrderedF64`. Values of different non-null kinds are
/// incomparable and yield `None` — callers that can reach a cross-type
/// comparison from caller-supplied expressions (the planner, the filter
/// kernel) check `type_tag()` equality themselves and turn that case into
/// `Error::Unsupported` rather than silently treating it as "no match".
impl PartialOrd for Value {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Value::Null, Value::Null) => Some(Ordering::Equal),
			(Value::Null, _) => Some(Ordering::Greater),
			(_, Value::Null) => Some(Ordering::Less),
			(Value::Int32(a), Value::Int32(b)) => Some(a.cmp(b)),
			(Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
			(Value::Float64(a), Value::Float64(b)) => Some(OrderedF64(*a).cmp(&OrderedF64(*b))),
			(Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
			(Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
			(Value::String(a), Value::String(b)) => Some(a.cmp(b)),
			_ => None,
		}
	}
}
