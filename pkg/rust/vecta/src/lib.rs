// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! vecta: a columnar, in-process analytics engine. Build a [`Frame`] from
//! typed columns or row records, enter the lazy query builder with
//! `.lazy()`, and `collect()` or `collect_stream()` it back.
//!
//! ```
//! use vecta::prelude::*;
//!
//! let schema = Schema::new(vec![
//!     SchemaField::new("Id", vecta::Type::Int32, false),
//!     SchemaField::new("Salary", vecta::Type::Float64, true),
//! ]).unwrap();
//! let frame = frame_from_records(schema, vec![
//!     vec![Value::Int32(1), Value::Float64(5_000.0)],
//!     vec![Value::Int32(2), Value::Float64(6_500.0)],
//! ]).unwrap();
//! let result = frame.lazy()
//!     .group_by(vec![col("Id")], vec![agg_sum("Salary", Some("total"))])
//!     .collect()
//!     .unwrap();
//! assert_eq!(result.row_count(), 2);
//! ```

pub use vecta_frame::{
	agg_count, agg_max, agg_mean, agg_min, agg_sum, build_frame, col, frame_from_records, lit, BinaryOp, EngineConfig,
	Error, Expr, Frame, FrameBuilder, JoinKind, LazyFrame, LazyOutput, Result, Schema, SchemaField, Value,
};
pub use vecta_type::Type;

pub use vecta_column::Column;

/// Re-exports for `use vecta::prelude::*`.
pub mod prelude {
	pub use crate::{
		agg_count, agg_max, agg_mean, agg_min, agg_sum, build_frame, col, frame_from_records, lit, BinaryOp, Column,
		EngineConfig, Error, Expr, Frame, FrameBuilder, JoinKind, LazyFrame, LazyOutput, Result, Schema, SchemaField,
		Type, Value,
	};
}

/// Lower-level crates, for callers that need to work directly with typed
/// column buffers or the lazy plan/planner instead of the [`Frame`] surface.
pub mod engine {
	pub use vecta_core::*;
	pub use vecta_engine::*;
}

/// Typed column storage, for callers building frames column-wise from
/// existing buffers rather than through [`build_frame`].
pub mod column {
	pub use vecta_column::*;
}

#[cfg(test)]
mod tests {
	use super::prelude::*;

	#[test]
	fn group_by_sum_via_top_level_crate() {
		let schema =
			Schema::new(vec![SchemaField::new("Id", Type::Int32, false), SchemaField::new("Salary", Type::Float64, false)])
				.unwrap();
		let rows = vec![
			vec![Value::Int32(1), Value::Float64(500.0)],
			vec![Value::Int32(1), Value::Float64(250.0)],
			vec![Value::Int32(2), Value::Float64(100.0)],
		];
		let frame = frame_from_records(schema, rows).unwrap();
		let result = frame.lazy().group_by(vec![col("Id")], vec![agg_sum("Salary", Some("total"))]).collect().unwrap();
		assert_eq!(result.row_count(), 2);
	}
}
