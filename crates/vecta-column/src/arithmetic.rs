// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use vecta_core::{Error, Result};
use vecta_type::Value;

use crate::column::{Column, Float64Column, Int32Column};

/// The four element-wise arithmetic kernels (spec §4.5).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
	Add,
	Sub,
	Mul,
	Div,
}

impl ArithOp {
	fn apply_i32(self, a: i32, b: i32) -> Option<i32> {
		match self {
			ArithOp::Add => Some(a.wrapping_add(b)),
			ArithOp::Sub => Some(a.wrapping_sub(b)),
			ArithOp::Mul => Some(a.wrapping_mul(b)),
			ArithOp::Div => {
				if b == 0 {
					None
				} else {
					Some(a.wrapping_div(b))
				}
			}
		}
	}

	fn apply_f64(self, a: f64, b: f64) -> f64 {
		match self {
			ArithOp::Add => a + b,
			ArithOp::Sub => a - b,
			ArithOp::Mul => a * b,
			ArithOp::Div => a / b,
		}
	}
}

/// `left <op> right`, both columns, row-aligned (spec §4.5). Nullability of
/// the result is the bitwise AND of both operands' null bitmaps. An `Int32`
/// division by zero produces a null cell at that row rather than failing
/// the whole kernel — the divisor is data, not a literal the caller chose,
/// so a single bad row should not abort the column.
pub fn column_op_column(op: ArithOp, left: &Column, right: &Column) -> Result<Column> {
	if left.len() != right.len() {
		return Err(Error::Unsupported(format!(
			"arithmetic requires equal-length columns, got {} and {}",
			left.len(),
			right.len()
		)));
	}
	match (left, right) {
		(Column::Int32(l), Column::Int32(r)) => Ok(Column::Int32(int32_op_int32(op, l, r))),
		(Column::Float64(l), Column::Float64(r)) => Ok(Column::Float64(float64_op_float64(op, l, r))),
		(Column::Int32(l), Column::Float64(r)) => Ok(Column::Float64(float64_op_float64(op, &promote_i32(l), r))),
		(Column::Float64(l), Column::Int32(r)) => Ok(Column::Float64(float64_op_float64(op, l, &promote_i32(r)))),
		_ => Err(Error::Unsupported(format!(
			"arithmetic is only defined over Int32/Float64 columns, got {} and {}",
			left.type_tag(),
			right.type_tag()
		))),
	}
}

/// `column <op> scalar`. A literal zero divisor is a query-authoring
/// mistake rather than a per-row data condition, so it fails the whole
/// kernel with `ArithError` instead of nulling every output cell.
pub fn column_op_scalar(op: ArithOp, column: &Column, scalar: Value) -> Result<Column> {
	if op == ArithOp::Div && is_zero(&scalar) {
		return Err(Error::ArithError("division by literal zero".into()));
	}
	match (column, &scalar) {
		(Column::Int32(c), Value::Int32(s)) => Ok(Column::Int32(int32_op_scalar(op, c, *s))),
		(Column::Float64(c), Value::Float64(s)) => Ok(Column::Float64(float64_op_scalar(op, c, *s))),
		(Column::Int32(c), Value::Float64(s)) => Ok(Column::Float64(float64_op_scalar(op, &promote_i32(c), *s))),
		(Column::Float64(c), Value::Int32(s)) => Ok(Column::Float64(float64_op_scalar(op, c, *s as f64))),
		_ => Err(Error::Unsupported(format!("arithmetic is only defined over Int32/Float64, got {} and {}", column.type_tag(), scalar))),
	}
}

fn is_zero(value: &Value) -> bool {
	matches!(value, Value::Int32(0)) || matches!(value, Value::Float64(f) if *f == 0.0)
}

fn promote_i32(c: &Int32Column) -> Float64Column {
	let mut out = Float64Column::with_capacity(c.len(), true);
	for i in 0..c.len() {
		out.append(c.get(i).map(|v| v as f64)).expect("promoted column is nullable");
	}
	out
}

fn int32_op_int32(op: ArithOp, l: &Int32Column, r: &Int32Column) -> Int32Column {
	let mut out = Int32Column::with_capacity(l.len(), true);
	for i in 0..l.len() {
		let value = match (l.get(i), r.get(i)) {
			(Some(a), Some(b)) => op.apply_i32(a, b),
			_ => None,
		};
		out.append(value).expect("result column is nullable");
	}
	out
}

fn float64_op_float64(op: ArithOp, l: &Float64Column, r: &Float64Column) -> Float64Column {
	let mut out = Float64Column::with_capacity(l.len(), true);
	for i in 0..l.len() {
		let value = match (l.get(i), r.get(i)) {
			(Some(a), Some(b)) => Some(op.apply_f64(a, b)),
			_ => None,
		};
		out.append(value).expect("result column is nullable");
	}
	out
}

fn int32_op_scalar(op: ArithOp, c: &Int32Column, scalar: i32) -> Int32Column {
	let mut out = Int32Column::with_capacity(c.len(), true);
	for i in 0..c.len() {
		let value = c.get(i).and_then(|a| op.apply_i32(a, scalar));
		out.append(value).expect("result column is nullable");
	}
	out
}

fn float64_op_scalar(op: ArithOp, c: &Float64Column, scalar: f64) -> Float64Column {
	let mut out = Float64Column::with_capacity(c.len(), true);
	for i in 0..c.len() {
		let value = c.get(i).map(|a| op.apply_f64(a, scalar));
		out.append(value).expect("result column is nullable");
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn column_div_column_nulls_on_zero_divisor() {
		let l = Column::Int32(Int32Column::from_values([Some(10), Some(20)], true).unwrap());
		let r = Column::Int32(Int32Column::from_values([Some(2), Some(0)], true).unwrap());
		let result = column_op_column(ArithOp::Div, &l, &r).unwrap();
		let Column::Int32(result) = result else { panic!("expected int32") };
		assert_eq!(result.get(0), Some(5));
		assert_eq!(result.get(1), None);
	}

	#[test]
	fn column_div_scalar_zero_fails() {
		let l = Column::Int32(Int32Column::from_values([Some(10)], false).unwrap());
		assert!(column_op_scalar(ArithOp::Div, &l, Value::Int32(0)).is_err());
	}

	#[test]
	fn null_propagates_through_either_operand() {
		let l = Column::Int32(Int32Column::from_values([Some(1), None], true).unwrap());
		let r = Column::Int32(Int32Column::from_values([None, Some(2)], true).unwrap());
		let result = column_op_column(ArithOp::Add, &l, &r).unwrap();
		let Column::Int32(result) = result else { panic!("expected int32") };
		assert!(result.is_null(0));
		assert!(result.is_null(1));
	}

	#[test]
	fn int32_plus_float64_promotes_to_float64() {
		let l = Column::Int32(Int32Column::from_values([Some(3)], false).unwrap());
		let r = Column::Float64(Float64Column::from_values([Some(0.5)], false).unwrap());
		let result = column_op_column(ArithOp::Add, &l, &r).unwrap();
		assert!(matches!(result, Column::Float64(_)));
	}
}
