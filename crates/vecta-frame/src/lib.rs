// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The public `Frame`/`LazyFrame` surface over the vecta columnar engine
//! (spec §6): construct a frame column-wise or row-wise, enter the lazy
//! query builder, collect it back to a frame or a streaming iterator.

pub mod agg;
pub mod expr;
pub mod frame;
pub mod lazy;
pub mod schema;

pub use agg::{agg_count, agg_max, agg_mean, agg_min, agg_sum};
pub use expr::{col, lit, BinaryOp, Expr, Value};
pub use frame::{build_frame, frame_from_records, Frame, FrameBuilder};
pub use lazy::{LazyFrame, LazyOutput};
pub use schema::{Schema, SchemaField};

pub use vecta_core::{EngineConfig, Error, Result};
pub use vecta_engine::JoinKind;

/// Re-exports for `use vecta_frame::prelude::*`.
pub mod prelude {
	pub use crate::agg::{agg_count, agg_max, agg_mean, agg_min, agg_sum};
	pub use crate::expr::{col, lit};
	pub use crate::frame::{build_frame, frame_from_records, Frame, FrameBuilder};
	pub use crate::lazy::{LazyFrame, LazyOutput};
	pub use crate::schema::{Schema, SchemaField};
	pub use vecta_engine::{BinaryOp, JoinKind};
	pub use vecta_type::Value;
}
