// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Thin constructors over `vecta_engine::plan::Expr` (spec §4.6, §6):
//! `col`/`lit` name the two leaves of the expression tree; `.alias(...)`
//! and `.binary(...)` (inherited from `Expr` itself) build the rest.

pub use vecta_engine::{BinaryOp, Expr};
pub use vecta_type::Value;

/// A bare column reference.
pub fn col(name: impl Into<String>) -> Expr {
	Expr::col(name)
}

/// A literal value.
pub fn lit(value: Value) -> Expr {
	Expr::lit(value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn binary_expression_builds_via_chaining() {
		let expr = col("Val").binary(BinaryOp::Mul, lit(Value::Float64(2.0))).alias("R");
		assert_eq!(expr.inferred_name(), "R");
	}
}
