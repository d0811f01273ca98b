// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! A frame's schema: an ordered, name-unique sequence of `(name, kind,
//! nullable)` triples (spec §3).

use std::collections::HashSet;

use vecta_core::{Error, Result};
use vecta_type::Type;

/// One declared column slot in a [`Schema`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaField {
	name: String,
	kind: Type,
	nullable: bool,
}

impl SchemaField {
	pub fn new(name: impl Into<String>, kind: Type, nullable: bool) -> Self {
		Self { name: name.into(), kind, nullable }
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> Type {
		self.kind
	}

	pub fn nullable(&self) -> bool {
		self.nullable
	}
}

/// An ordered, name-unique list of [`SchemaField`]s a [`crate::Frame`] is
/// built against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
	fields: Vec<SchemaField>,
}

impl Schema {
	pub fn new(fields: Vec<SchemaField>) -> Result<Self> {
		let mut seen = HashSet::with_capacity(fields.len());
		for field in &fields {
			if !seen.insert(field.name.as_str()) {
				return Err(Error::duplicate_column(field.name.clone()));
			}
		}
		Ok(Self { fields })
	}

	pub fn fields(&self) -> &[SchemaField] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Result<&SchemaField> {
		self.fields.iter().find(|f| f.name == name).ok_or_else(|| Error::column_not_found(name))
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn duplicate_field_name_rejected() {
		let fields = vec![SchemaField::new("Id", Type::Int32, false), SchemaField::new("Id", Type::Float64, true)];
		assert!(Schema::new(fields).is_err());
	}

	#[test]
	fn field_lookup_by_name() {
		let schema = Schema::new(vec![SchemaField::new("Id", Type::Int32, false)]).unwrap();
		assert_eq!(schema.field("Id").unwrap().kind(), Type::Int32);
		assert!(schema.field("Missing").is_err());
	}
}
