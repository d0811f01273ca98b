// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The public `Frame`: an ordered sequence of named, equal-length columns
//! plus the [`Schema`] they were declared against (spec §3, §6).

use vecta_column::{BoolColumn, CategoryColumn, Column, Float64Column, Int32Column, StringColumn, TimestampColumn};
use vecta_core::{Error, Result};
use vecta_type::{Type, Value};

use crate::lazy::LazyFrame;
use crate::schema::{Schema, SchemaField};

/// A materialized table: named columns plus the schema they satisfy.
#[derive(Clone, Debug)]
pub struct Frame {
	schema: Schema,
	relation: vecta_engine::Relation,
}

impl Frame {
	/// Builds a frame from a schema and a matching column list, checking
	/// that every column's kind and nullability agrees with its schema
	/// field at the same position (spec §3's `(name, kind, nullable)`
	/// invariant).
	pub fn new(schema: Schema, columns: Vec<(String, Column)>) -> Result<Self> {
		if schema.len() != columns.len() {
			return Err(Error::Unsupported(format!(
				"schema declares {} fields but {} columns were supplied",
				schema.len(),
				columns.len()
			)));
		}
		for (field, (name, column)) in schema.fields().iter().zip(columns.iter()) {
			if field.name() != name.as_str() {
				return Err(Error::Unsupported(format!(
					"schema field '{}' does not match column '{}' at the same position",
					field.name(),
					name
				)));
			}
			if column.type_tag() != field.kind() {
				return Err(Error::type_mismatch(field.name(), field.kind().to_string(), column.type_tag().to_string()));
			}
			if column.nullable() != field.nullable() {
				return Err(Error::type_mismatch(
					field.name(),
					format!("nullable={}", field.nullable()),
					format!("nullable={}", column.nullable()),
				));
			}
		}
		let relation = vecta_engine::Relation::new(columns)?;
		Ok(Self { schema, relation })
	}

	pub(crate) fn from_relation(schema: Schema, relation: vecta_engine::Relation) -> Self {
		Self { schema, relation }
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn row_count(&self) -> usize {
		self.relation.row_count()
	}

	pub fn column(&self, name: &str) -> Result<&Column> {
		self.relation.column(name)
	}

	pub fn column_names(&self) -> impl Iterator<Item = &str> {
		self.relation.column_names()
	}

	/// Enters the lazy query surface (spec §6): every `LazyFrame` fluent
	/// method wraps a new `LogicalPlan` node around this scan.
	pub fn lazy(self) -> LazyFrame {
		LazyFrame::scan(self.relation)
	}

	pub(crate) fn relation(&self) -> &vecta_engine::Relation {
		&self.relation
	}
}

/// Column-wise frame construction (spec §6: `build_frame(schema,
/// row_capacity) → frame`). Not itself the hot path — bulk ingestion is
/// expected to append whole columns via [`FrameBuilder::column_mut`] rather
/// than row-by-row.
pub struct FrameBuilder {
	schema: Schema,
	columns: Vec<(String, Column)>,
}

pub fn build_frame(schema: Schema, row_capacity: usize) -> Result<FrameBuilder> {
	let mut columns = Vec::with_capacity(schema.len());
	for field in schema.fields() {
		columns.push((field.name().to_string(), empty_column(field.kind(), field.nullable(), row_capacity)?));
	}
	Ok(FrameBuilder { schema, columns })
}

impl FrameBuilder {
	pub fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
		self.columns
			.iter_mut()
			.find(|(n, _)| n == name)
			.map(|(_, c)| c)
			.ok_or_else(|| Error::column_not_found(name))
	}

	/// Appends one value per schema field, in schema order (spec §6
	/// `frame_from_records` convenience path).
	pub fn append_row(&mut self, values: &[Value]) -> Result<()> {
		if values.len() != self.columns.len() {
			return Err(Error::Unsupported(format!(
				"row has {} values but the schema declares {} fields",
				values.len(),
				self.columns.len()
			)));
		}
		for ((_, column), value) in self.columns.iter_mut().zip(values) {
			append_value(column, value)?;
		}
		Ok(())
	}

	pub fn finish(self) -> Result<Frame> {
		Frame::new(self.schema, self.columns)
	}
}

fn empty_column(kind: Type, nullable: bool, capacity: usize) -> Result<Column> {
	Ok(match kind {
		Type::Int32 => Column::Int32(Int32Column::with_capacity(capacity, nullable)),
		Type::Float64 => Column::Float64(Float64Column::with_capacity(capacity, nullable)),
		Type::Bool => Column::Bool(BoolColumn::new(nullable)),
		Type::Timestamp => Column::Timestamp(TimestampColumn::new(nullable)),
		Type::String => Column::String(StringColumn::new(nullable)),
		Type::Category => Column::Category(CategoryColumn::new(nullable)),
		Type::Int64 => {
			return Err(Error::Unsupported("Int64 is an aggregation output, not a constructible column kind".into()));
		}
	})
}

fn append_value(column: &mut Column, value: &Value) -> Result<()> {
	match (column, value) {
		(Column::Int32(c), Value::Int32(v)) => c.append(Some(*v)),
		(Column::Int32(c), Value::Null) => c.append(None),
		(Column::Float64(c), Value::Float64(v)) => c.append(Some(*v)),
		(Column::Float64(c), Value::Null) => c.append(None),
		(Column::Bool(c), Value::Bool(v)) => c.append(Some(*v)),
		(Column::Bool(c), Value::Null) => c.append(None),
		(Column::Timestamp(c), Value::Timestamp(v)) => c.append(Some(*v)),
		(Column::Timestamp(c), Value::Null) => c.append(None),
		(Column::String(c), Value::String(v)) => c.append(Some(v.as_str())),
		(Column::String(c), Value::Null) => c.append(None),
		(Column::Category(c), Value::String(v)) => c.append(Some(v.as_str())),
		(Column::Category(c), Value::Null) => c.append(None),
		(column, value) => Err(Error::type_mismatch(
			"<row value>",
			column.type_tag().to_string(),
			value.type_tag().map(|t| t.to_string()).unwrap_or_else(|| "null".to_string()),
		)),
	}
}

/// Convenience row-oriented construction (spec §6): builds a whole frame
/// from an iterator of per-row value lists, each in schema order. Not on
/// the hot path — prefer `build_frame` + `column_mut` for bulk ingestion.
pub fn frame_from_records(schema: Schema, rows: impl IntoIterator<Item = Vec<Value>>) -> Result<Frame> {
	let mut builder = build_frame(schema, 0)?;
	for row in rows {
		builder.append_row(&row)?;
	}
	builder.finish()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn id_salary_schema() -> Schema {
		Schema::new(vec![SchemaField::new("Id", Type::Int32, false), SchemaField::new("Salary", Type::Float64, true)]).unwrap()
	}

	#[test]
	fn frame_from_records_round_trips_values() {
		let schema = id_salary_schema();
		let rows = vec![
			vec![Value::Int32(1), Value::Float64(5000.0)],
			vec![Value::Int32(2), Value::Null],
		];
		let frame = frame_from_records(schema, rows).unwrap();
		assert_eq!(frame.row_count(), 2);
		let Column::Int32(id) = frame.column("Id").unwrap() else { panic!("expected int32") };
		assert_eq!(id.get(0), Some(1));
		let Column::Float64(salary) = frame.column("Salary").unwrap() else { panic!("expected float64") };
		assert!(salary.is_null(1));
	}

	#[test]
	fn schema_kind_mismatch_is_rejected() {
		let schema = id_salary_schema();
		let columns = vec![
			("Id".to_string(), Column::Int32(Int32Column::from_values([Some(1)], false).unwrap())),
			("Salary".to_string(), Column::Int32(Int32Column::from_values([Some(1)], true).unwrap())),
		];
		assert!(Frame::new(schema, columns).is_err());
	}

	#[test]
	fn build_frame_column_wise_append() {
		let schema = id_salary_schema();
		let mut builder = build_frame(schema, 4).unwrap();
		let Column::Int32(id) = builder.column_mut("Id").unwrap() else { panic!("expected int32") };
		id.append(Some(7)).unwrap();
		let Column::Float64(salary) = builder.column_mut("Salary").unwrap() else { panic!("expected float64") };
		salary.append(Some(1200.5)).unwrap();
		let frame = builder.finish().unwrap();
		assert_eq!(frame.row_count(), 1);
	}
}
