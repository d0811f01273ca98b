// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::fmt::{Display, Formatter};

/// Tag for one of the six column kinds the store supports.
///
/// Mirrors the teacher's `ColumnTypeCode` tagged union, trimmed to the
/// kinds this engine actually stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
	Int32,
	/// Widened accumulator type produced by `Sum` over an `Int32` source
	/// column. Not one of the base six storable column kinds — it only
	/// ever appears as an aggregation output.
	Int64,
	Float64,
	Bool,
	Timestamp,
	String,
	Category,
}

impl Type {
	/// Whether a column of this kind supports `slice()`. Bool columns are
	/// bit-packed and therefore excluded (see spec §4.1).
	pub const fn supports_slice(self) -> bool {
		matches!(self, Type::Int32 | Type::Int64 | Type::Float64 | Type::Timestamp)
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Int32 => f.write_str("INT32"),
			Type::Int64 => f.write_str("INT64"),
			Type::Float64 => f.write_str("FLOAT64"),
			Type::Bool => f.write_str("BOOL"),
			Type::Timestamp => f.write_str("TIMESTAMP"),
			Type::String => f.write_str("STRING"),
			Type::Category => f.write_str("CATEGORY"),
		}
	}
}
