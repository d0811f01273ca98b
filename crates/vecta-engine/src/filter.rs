// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Vectorized `Col ⊙ Literal` filter kernel (spec §4.7): produces the list
//! of row indices satisfying a comparison against a scalar, on primitive
//! numeric and string columns. A predicate evaluated against a null cell is
//! always false.

use vecta_core::{Error, Result};
use vecta_type::Value;

/// Comparison operators a vectorized filter can apply against a literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
	Eq,
	Ne,
	Lt,
	Le,
	Gt,
	Ge,
}

impl CompareOp {
	fn matches(self, ordering: std::cmp::Ordering) -> bool {
		use std::cmp::Ordering::*;
		match (self, ordering) {
			(CompareOp::Eq, Equal) => true,
			(CompareOp::Ne, Less | Greater) => true,
			(CompareOp::Lt, Less) => true,
			(CompareOp::Le, Less | Equal) => true,
			(CompareOp::Gt, Greater) => true,
			(CompareOp::Ge, Greater | Equal) => true,
			_ => false,
		}
	}
}

/// Evaluates `column[i] op literal` for every row, returning the indices of
/// rows where it holds. A null cell never satisfies any operator, including
/// `Ne` (spec §4.7: "predicates on null columns are false").
#[tracing::instrument(level = "debug", skip(column, literal))]
pub fn filter_column_literal(column: &vecta_column::Column, op: CompareOp, literal: &Value) -> Result<Vec<u32>> {
	if literal.is_null() {
		return Err(Error::Unsupported("filtering against a null literal is not supported".into()));
	}
	let mut out = Vec::new();
	for row in 0..column.len() {
		if column.is_null(row) {
			continue;
		}
		let cell = column.value_at(row);
		if cell.type_tag() != literal.type_tag() {
			return Err(Error::Unsupported(format!(
				"cannot compare a {:?} column against a literal of type {:?}",
				cell.type_tag(),
				literal.type_tag()
			)));
		}
		let ordering = cell.partial_cmp(literal).expect("type tags already checked equal above");
		if op.matches(ordering) {
			out.push(row as u32);
		}
	}
	Ok(out)
}

#[cfg(test)]
mod tests {
	use vecta_column::{Column, Int32Column, StringColumn};

	use super::*;

	#[test]
	fn greater_than_excludes_nulls_and_lower_values() {
		let column = Column::Int32(Int32Column::from_values([Some(1), None, Some(5), Some(3)], true).unwrap());
		let rows = filter_column_literal(&column, CompareOp::Gt, &Value::Int32(2)).unwrap();
		assert_eq!(rows, vec![2, 3]);
	}

	#[test]
	fn not_equal_excludes_nulls_too() {
		let column = Column::Int32(Int32Column::from_values([Some(1), None, Some(2)], true).unwrap());
		let rows = filter_column_literal(&column, CompareOp::Ne, &Value::Int32(1)).unwrap();
		assert_eq!(rows, vec![2]);
	}

	#[test]
	fn string_equality() {
		let column = Column::String(StringColumn::from_values([Some("a"), Some("b"), Some("a")], false).unwrap());
		let rows = filter_column_literal(&column, CompareOp::Eq, &Value::String("a".into())).unwrap();
		assert_eq!(rows, vec![0, 2]);
	}

	#[test]
	fn mismatched_literal_type_is_an_error_not_a_panic() {
		let column = Column::Int32(Int32Column::from_values([Some(1), Some(2)], false).unwrap());
		let result = filter_column_literal(&column, CompareOp::Eq, &Value::Bool(true));
		assert!(matches!(result, Err(Error::Unsupported(_))));
	}
}
