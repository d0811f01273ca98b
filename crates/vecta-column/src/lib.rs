// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Typed columnar storage: null bitmaps, copy-on-write buffers, category
//! dictionaries, the column kinds (including the `Int64` widened-sum
//! aggregation output), arithmetic kernels and the CSR group-by result
//! that the engine crate builds group-by strategies around.

mod arithmetic;
mod bitmap;
mod column;
mod dictionary;
mod group_result;
mod storage;

pub use arithmetic::{column_op_column, column_op_scalar, ArithOp};
pub use bitmap::NullBitmap;
pub use column::{
	BoolColumn, CategoryColumn, Column, Float64Column, Float64Slice, Int32Column, Int32Slice, Int64Column,
	StringColumn, TimestampColumn, TimestampSlice,
};
pub use dictionary::{Dictionary, DictionaryData};
pub use group_result::GroupResult;
pub use storage::{BufferSlice, CowBuffer};
