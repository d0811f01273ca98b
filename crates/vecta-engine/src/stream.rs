// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The zero-allocation streaming iterator (spec §4.6): the only recognized
//! plan shape is `Aggregate(group=[single_col], aggs=[Count() as X])`. Each
//! `next` call updates a reusable row handle borrowing from the underlying
//! CSR — callers must not retain it across the following call.

use vecta_column::{Column, GroupResult};
use vecta_core::Result;
use vecta_type::Value;

use crate::plan::Relation;

/// A single streamed row: a group's key and its member count. Borrowed from
/// [`GroupStream`]; invalidated the moment [`GroupStream::next`] is called
/// again (spec §4.6, scenario 6: "row handles must not be retained across
/// `next`").
#[derive(Clone, Debug)]
pub struct RowView {
	pub key: Value,
	pub count: i32,
}

/// Walks a `GroupResult` one group at a time without materializing a result
/// frame, emitting a final null-keyed row for the null group if present
/// (spec §4.6).
pub struct GroupStream {
	key_name: String,
	count_name: String,
	key_column: Column,
	result: GroupResult,
	next_group: usize,
	emitted_null: bool,
	current: RowView,
}

impl GroupStream {
	pub fn new(key_name: String, count_name: String, key_column: Column, result: GroupResult) -> Self {
		Self { key_name, count_name, key_column, result, next_group: 0, emitted_null: false, current: RowView { key: Value::Null, count: 0 } }
	}

	pub fn key_name(&self) -> &str {
		&self.key_name
	}

	/// Advances the cursor by one row and returns a view borrowing the
	/// reusable buffer, or `None` once every group (and the null group,
	/// if any) has been emitted.
	pub fn next(&mut self) -> Option<&RowView> {
		if self.next_group < self.result.group_count() {
			let g = self.next_group;
			self.next_group += 1;
			let (start, end) = self.result.group_window(g);
			self.current = RowView { key: self.group_key(g), count: (end - start) as i32 };
			return Some(&self.current);
		}
		if !self.emitted_null {
			self.emitted_null = true;
			if let Some(null_rows) = self.result.null_group_indices() {
				self.current = RowView { key: Value::Null, count: null_rows.len() as i32 };
				return Some(&self.current);
			}
		}
		None
	}

	fn group_key(&self, g: usize) -> Value {
		if self.result.keys_are_row_indices() {
			let (start, _) = self.result.group_window(g);
			let row = self.result.row_indices()[start] as usize;
			self.key_column.value_at(row)
		} else {
			Value::Int32(self.result.keys()[g] as i32)
		}
	}

	/// Falls back to full materialization for callers that invoked
	/// `collect()` on a streaming-eligible plan (spec §4.6: `collect()`
	/// always returns a frame; only `collect_stream()` returns the
	/// iterator).
	pub fn materialize(self) -> Result<Relation> {
		let key_column = self.key_column.clone();
		let (keys, outputs) = crate::aggregate::aggregate(
			&self.result,
			&[&key_column],
			&[&key_column],
			&[crate::aggregate::AggDef::new(0, crate::aggregate::AggOp::Count, self.count_name.clone())],
		)?;
		Relation::new(vec![(self.key_name.clone(), keys.into_iter().next().expect("one key column")), (
			self.count_name.clone(),
			outputs.into_iter().next().expect("one aggregate output").column,
		)])
	}
}

#[cfg(test)]
mod tests {
	use vecta_column::StringColumn;
	use vecta_core::EngineConfig;

	use super::*;

	#[test]
	fn streaming_count_matches_scenario_6() {
		let grp = Column::String(StringColumn::from_values([Some("A"), Some("A"), Some("B")], false).unwrap());
		let result = crate::group_by::dispatch(&[&grp], &EngineConfig::default()).unwrap();
		let mut stream = GroupStream::new("Grp".to_string(), "count".to_string(), grp, result);

		let mut seen = Vec::new();
		while let Some(row) = stream.next() {
			let Value::String(key) = &row.key else { panic!("expected string key") };
			seen.push((key.clone(), row.count));
		}
		seen.sort_unstable();
		assert_eq!(seen, vec![("A".to_string(), 2), ("B".to_string(), 1)]);
	}

	#[test]
	fn streaming_emits_trailing_null_group_row() {
		let cat = Column::String(StringColumn::from_values([Some("A"), None, Some("A"), None], true).unwrap());
		let result = crate::group_by::dispatch(&[&cat], &EngineConfig::default()).unwrap();
		let mut stream = GroupStream::new("Cat".to_string(), "count".to_string(), cat, result);
		let mut rows = Vec::new();
		while let Some(row) = stream.next() {
			rows.push((row.key.clone(), row.count));
		}
		assert_eq!(rows.len(), 2);
		assert!(rows.iter().any(|(k, c)| matches!(k, Value::Null) && *c == 2));
	}
}
