// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Aggregation-definition builders for `LazyFrame::group_by`'s agg_exprs
//! (spec §6: `agg_sum(col, alias?)`, `agg_mean`, `agg_min`, `agg_max`,
//! `agg_count(alias?)`). Each wraps the source column in `Expr::Agg` and
//! attaches the caller's alias, falling back to the op's inferred name
//! (e.g. `"sum(salary)"`) when none is given.

use vecta_engine::{AggOp, Expr};

/// Column reference `agg_count` wraps internally — the aggregation kernel
/// ignores a `Count` definition's source column entirely (every row in a
/// group counts regardless of that column's nullness), so the real
/// binding only matters to satisfy the `Expr::Agg` shape. `LazyFrame::
/// group_by` rewrites this marker to the first group-by key column before
/// building the plan.
pub(crate) const COUNT_STAR: &str = "";

pub fn agg_sum(column: impl Into<String>, alias: Option<&str>) -> Expr {
	wrap(AggOp::Sum, column.into(), alias)
}

pub fn agg_mean(column: impl Into<String>, alias: Option<&str>) -> Expr {
	wrap(AggOp::Mean, column.into(), alias)
}

pub fn agg_min(column: impl Into<String>, alias: Option<&str>) -> Expr {
	wrap(AggOp::Min, column.into(), alias)
}

pub fn agg_max(column: impl Into<String>, alias: Option<&str>) -> Expr {
	wrap(AggOp::Max, column.into(), alias)
}

/// Row count per group (spec §6, §8 scenarios 1/3/6). Bound to an actual
/// source column by `LazyFrame::group_by`, not by the caller.
pub fn agg_count(alias: Option<&str>) -> Expr {
	wrap(AggOp::Count, COUNT_STAR.to_string(), alias)
}

fn wrap(op: AggOp, column: String, alias: Option<&str>) -> Expr {
	let agg = Expr::Agg(op, Box::new(Expr::col(column)));
	match alias {
		Some(name) => agg.alias(name),
		None => agg,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn agg_sum_infers_name_without_alias() {
		let expr = agg_sum("Salary", None);
		assert_eq!(expr.inferred_name(), "sum(salary)");
	}

	#[test]
	fn agg_count_uses_explicit_alias() {
		let expr = agg_count(Some("total"));
		assert_eq!(expr.inferred_name(), "total");
	}
}
