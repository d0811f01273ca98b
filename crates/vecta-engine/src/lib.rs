// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Group-by dispatch, aggregation, arithmetic, sort/filter/join kernels,
//! and the lazy plan + physical planner for the vecta columnar engine
//! (spec §4.3–§4.7). `vecta-frame` builds its public `LazyFrame` surface on
//! top of the [`plan`] and [`planner`] modules here.

pub mod aggregate;
pub mod filter;
pub mod group_by;
pub mod join;
pub mod plan;
pub mod planner;
pub mod sort;
pub mod stream;

pub use aggregate::{AggDef, AggOp, AggOutput};
pub use filter::CompareOp;
pub use join::{JoinKind, JoinRow};
pub use plan::{BinaryOp, Expr, LogicalPlan, Relation};
pub use planner::{execute, execute_streaming, ExecutionOutput};
pub use sort::SortKey;
pub use stream::{GroupStream, RowView};
