// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use thiserror::Error;

/// The engine's single error type (spec §7): exactly the seven kinds named
/// there, never string-matched by callers. Variants that cover more than
/// one underlying cause carry a nested detail enum instead of widening the
/// top-level variant set.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
	#[error("schema mismatch: {0}")]
	SchemaMismatch(#[from] SchemaError),

	#[error("cannot write null into non-nullable column '{0}'")]
	NullabilityViolated(String),

	#[error("{0}")]
	OutOfRange(#[from] RangeError),

	#[error("unsupported operation: {0}")]
	Unsupported(String),

	#[error("arithmetic error: {0}")]
	ArithError(String),

	#[error("invalid plan: {0}")]
	InvalidPlan(String),

	#[error("allocator exhausted while requesting {requested} bytes")]
	OutOfMemory { requested: usize },
}

/// Detail carried by `Error::SchemaMismatch`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SchemaError {
	#[error("column '{0}' not found")]
	ColumnNotFound(String),

	#[error("duplicate column name '{0}'")]
	DuplicateColumn(String),

	#[error("type mismatch on column '{column}': expected {expected}, found {found}")]
	TypeMismatch { column: String, expected: String, found: String },
}

/// Detail carried by `Error::OutOfRange`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RangeError {
	#[error("index {index} out of bounds for length {length}")]
	Index { index: usize, length: usize },

	#[error("slice window [{start}, {}) out of bounds for length {length}", start + len)]
	Slice { start: usize, len: usize, length: usize },
}

impl Error {
	pub fn column_not_found(name: impl Into<String>) -> Self {
		SchemaError::ColumnNotFound(name.into()).into()
	}

	pub fn duplicate_column(name: impl Into<String>) -> Self {
		SchemaError::DuplicateColumn(name.into()).into()
	}

	pub fn type_mismatch(column: impl Into<String>, expected: impl Into<String>, found: impl Into<String>) -> Self {
		SchemaError::TypeMismatch { column: column.into(), expected: expected.into(), found: found.into() }.into()
	}

	pub fn index_out_of_range(index: usize, length: usize) -> Self {
		RangeError::Index { index, length }.into()
	}

	pub fn slice_out_of_range(start: usize, len: usize, length: usize) -> Self {
		RangeError::Slice { start, len, length }.into()
	}
}
