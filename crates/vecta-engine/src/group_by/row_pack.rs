// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use vecta_column::{Column, GroupResult};
use vecta_core::hash;
use vecta_core::swiss::SwissIndex;

/// Serializes row `row` of `columns` into `buf` as `[null_flag][value
/// bytes]` per column (spec §4.3.5, §9 "do not hash via per-element
/// reflection") — one fixed-layout byte sequence per column, concatenated.
/// Variable-length `String` cells contribute their raw bytes; the byte
/// sequence is hashed as a whole rather than hashed column-by-column, so
/// the table still does one combined lookup per row.
fn encode_row(columns: &[&Column], row: usize, buf: &mut Vec<u8>) {
	buf.clear();
	for column in columns {
		let is_null = column.is_null(row);
		buf.push(is_null as u8);
		if is_null {
			continue;
		}
		match column {
			Column::Int32(c) => buf.extend_from_slice(&c.get(row).unwrap().to_le_bytes()),
			Column::Float64(c) => buf.extend_from_slice(&c.get(row).unwrap().to_bits().to_le_bytes()),
			Column::Bool(c) => buf.push(c.get(row).unwrap() as u8),
			Column::Timestamp(c) => buf.extend_from_slice(&c.get(row).unwrap().as_i64().to_le_bytes()),
			Column::String(c) => buf.extend_from_slice(c.as_bytes(row)),
			Column::Category(c) => buf.extend_from_slice(&c.code_at(row).to_le_bytes()),
			Column::Int64(_) => unreachable!("Int64 is an aggregation output, never a group-by key column"),
		}
	}
}

fn rows_equal(columns: &[&Column], a: usize, b: usize) -> bool {
	columns.iter().all(|c| {
		let a_null = c.is_null(a);
		let b_null = c.is_null(b);
		if a_null || b_null {
			return a_null == b_null;
		}
		match c {
			Column::Int32(c) => c.get(a) == c.get(b),
			Column::Float64(c) => c.get(a).unwrap().to_bits() == c.get(b).unwrap().to_bits(),
			Column::Bool(c) => c.get(a) == c.get(b),
			Column::Timestamp(c) => c.get(a) == c.get(b),
			Column::String(c) => c.as_bytes(a) == c.as_bytes(b),
			Column::Category(c) => c.code_at(a) == c.code_at(b),
			Column::Int64(_) => unreachable!("Int64 is an aggregation output, never a group-by key column"),
		}
	})
}

fn any_key_null(columns: &[&Column], row: usize) -> bool {
	columns.iter().any(|c| c.is_null(row))
}

struct RowSlot {
	rep_row: u32,
}

struct RowTable {
	index: SwissIndex,
	slots: Vec<RowSlot>,
	group_of_rep: Vec<u32>,
	group_count: usize,
}

impl RowTable {
	fn with_capacity(capacity: usize) -> Self {
		let index = SwissIndex::with_capacity(capacity);
		let cap = index.capacity();
		Self { index, slots: (0..cap).map(|_| RowSlot { rep_row: 0 }).collect(), group_of_rep: vec![0; cap], group_count: 0 }
	}

	fn insert(&mut self, columns: &[&Column], row: u32, buf: &mut Vec<u8>) -> usize {
		if self.index.needs_growth() {
			self.grow(columns);
		}
		encode_row(columns, row as usize, buf);
		let hash = hash::hash_row_bytes(buf);
		let (_start, h2) = hash::split(hash, self.index.capacity());

		for slot in self.index.probe(hash) {
			if self.index.is_empty_slot(slot) {
				self.index.occupy(slot, h2);
				self.slots[slot] = RowSlot { rep_row: row };
				let group_id = self.group_count;
				self.group_of_rep[slot] = group_id as u32;
				self.group_count += 1;
				return group_id;
			}
			let rep_row = self.slots[slot].rep_row;
			if self.index.tag_at(slot) == h2 && rows_equal(columns, rep_row as usize, row as usize) {
				return self.group_of_rep[slot] as usize;
			}
		}
		unreachable!("swiss table probe exhausted capacity without finding a slot")
	}

	fn grow(&mut self, columns: &[&Column]) {
		let new_capacity = self.index.grown_capacity();
		let old_index = std::mem::replace(&mut self.index, SwissIndex::with_capacity(new_capacity));
		let old_slots: Vec<RowSlot> = std::mem::replace(
			&mut self.slots,
			(0..self.index.capacity()).map(|_| RowSlot { rep_row: 0 }).collect(),
		);
		let old_groups = std::mem::replace(&mut self.group_of_rep, vec![0; self.index.capacity()]);
		let mut buf = Vec::new();
		for slot in 0..old_index.capacity() {
			if old_index.is_empty_slot(slot) {
				continue;
			}
			let rep_row = old_slots[slot].rep_row;
			let group_id = old_groups[slot];
			encode_row(columns, rep_row as usize, &mut buf);
			let hash = hash::hash_row_bytes(&buf);
			let (_start, h2) = hash::split(hash, self.index.capacity());
			for candidate in self.index.probe(hash) {
				if self.index.is_empty_slot(candidate) {
					self.index.occupy(candidate, h2);
					self.slots[candidate] = RowSlot { rep_row };
					self.group_of_rep[candidate] = group_id;
					break;
				}
			}
		}
	}
}

/// Builds a multi-column group result (spec §4.3.5). A row is routed to
/// the null group if *any* selected key column is null at that row.
#[tracing::instrument(level = "debug", skip(columns))]
pub fn build(columns: &[&Column]) -> GroupResult {
	let n = columns.first().map(|c| c.len()).unwrap_or(0);
	let mut table = RowTable::with_capacity(n.max(1));
	let mut members: Vec<Vec<u32>> = Vec::new();
	let mut rep_rows: Vec<u32> = Vec::new();
	let mut result = GroupResult::with_capacity(n.max(1) / 2 + 1, n, true);
	let mut buf = Vec::new();

	for row in 0..n {
		if any_key_null(columns, row) {
			result.push_null_row(row as u32);
			continue;
		}
		let group_id = table.insert(columns, row as u32, &mut buf);
		if group_id == members.len() {
			members.push(Vec::new());
			rep_rows.push(row as u32);
		}
		members[group_id].push(row as u32);
	}

	for rep_row in rep_rows {
		result.begin_group(rep_row as i64);
	}
	for member_rows in members {
		for row in member_rows {
			result.push_row(row);
		}
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use vecta_column::{Int32Column, StringColumn};

	#[test]
	fn groups_by_the_combination_of_columns() {
		let dept = Column::String(StringColumn::from_values([Some("IT"), Some("IT"), Some("HR"), Some("IT")], false).unwrap());
		let year = Column::Int32(Int32Column::from_values([Some(2023), Some(2024), Some(2023), Some(2023)], false).unwrap());
		let result = build(&[&dept, &year]);
		assert_eq!(result.group_count(), 3);
		assert!(result.keys_are_row_indices());
	}

	#[test]
	fn any_null_key_column_routes_to_null_group() {
		let dept = Column::String(StringColumn::from_values([Some("IT"), None], true).unwrap());
		let year = Column::Int32(Int32Column::from_values([Some(2023), Some(2023)], false).unwrap());
		let result = build(&[&dept, &year]);
		assert_eq!(result.null_group_indices(), Some(&[1u32][..]));
	}
}
