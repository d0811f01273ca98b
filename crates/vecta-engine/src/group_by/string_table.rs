// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use vecta_column::{GroupResult, StringColumn};
use vecta_core::hash;
use vecta_core::swiss::SwissIndex;

/// Per-slot cached metadata for the string Swiss table (spec §4.3.3):
/// length and first four bytes let most comparisons short-circuit before
/// touching the full byte range. `rep_row` is the first row seen for this
/// key, which both serves as the group's key carrier
/// (`keys_are_row_indices`) and as the equality anchor for later rows.
#[derive(Clone, Copy)]
struct Slot {
	length: u32,
	prefix: [u8; 4],
	rep_row: u32,
}

fn prefix_of(bytes: &[u8]) -> [u8; 4] {
	let mut out = [0u8; 4];
	let n = bytes.len().min(4);
	out[..n].copy_from_slice(&bytes[..n]);
	out
}

struct StringTable {
	index: SwissIndex,
	slots: Vec<Slot>,
	group_of_rep: Vec<u32>,
	group_count: usize,
}

impl StringTable {
	fn with_capacity(capacity: usize) -> Self {
		let index = SwissIndex::with_capacity(capacity);
		let cap = index.capacity();
		Self {
			index,
			slots: vec![Slot { length: 0, prefix: [0; 4], rep_row: 0 }; cap],
			group_of_rep: vec![0; cap],
			group_count: 0,
		}
	}

	/// Returns `(group_id, is_new)` for the string at `row` of `column`.
	fn insert(&mut self, column: &StringColumn, row: u32) -> usize {
		if self.index.needs_growth() {
			self.grow(column);
		}
		let bytes = column.as_bytes(row as usize);
		let length = column.byte_len(row as usize) as u32;
		let prefix = prefix_of(bytes);
		let hash = hash::fnv1a(bytes);
		let (_start, h2) = hash::split(hash, self.index.capacity());

		for slot in self.index.probe(hash) {
			if self.index.is_empty_slot(slot) {
				self.index.occupy(slot, h2);
				self.slots[slot] = Slot { length, prefix, rep_row: row };
				let group_id = self.group_count;
				self.group_of_rep[slot] = group_id as u32;
				self.group_count += 1;
				return group_id;
			}
			let candidate = &self.slots[slot];
			if self.index.tag_at(slot) == h2
				&& candidate.length == length
				&& candidate.prefix == prefix
				&& column.as_bytes(candidate.rep_row as usize) == bytes
			{
				return self.group_of_rep[slot] as usize;
			}
		}
		unreachable!("swiss table probe exhausted capacity without finding a slot")
	}

	fn grow(&mut self, column: &StringColumn) {
		let new_capacity = self.index.grown_capacity();
		let old_index = std::mem::replace(&mut self.index, SwissIndex::with_capacity(new_capacity));
		let old_slots = std::mem::replace(&mut self.slots, vec![Slot { length: 0, prefix: [0; 4], rep_row: 0 }; self.index.capacity()]);
		let old_groups = std::mem::replace(&mut self.group_of_rep, vec![0; self.index.capacity()]);
		for slot in 0..old_index.capacity() {
			if old_index.is_empty_slot(slot) {
				continue;
			}
			let old = old_slots[slot];
			let group_id = old_groups[slot];
			let bytes = column.as_bytes(old.rep_row as usize);
			let hash = hash::fnv1a(bytes);
			let (_start, h2) = hash::split(hash, self.index.capacity());
			for candidate in self.index.probe(hash) {
				if self.index.is_empty_slot(candidate) {
					self.index.occupy(candidate, h2);
					self.slots[candidate] = old;
					self.group_of_rep[candidate] = group_id;
					break;
				}
			}
		}
	}
}

/// Builds a string Swiss-table group result (spec §4.3.3). Groups carry a
/// representative row index rather than an owned copy of the string —
/// `keys_are_row_indices` tells the caller to read the key back off the
/// source column.
#[tracing::instrument(level = "debug", skip(column, rows))]
pub fn build(column: &StringColumn, rows: Option<&[u32]>) -> GroupResult {
	let estimated = rows.map(|r| r.len()).unwrap_or_else(|| column.len());
	let mut table = StringTable::with_capacity(estimated.max(1));
	let mut members: Vec<Vec<u32>> = Vec::new();
	let mut rep_rows: Vec<u32> = Vec::new();
	let mut result = GroupResult::with_capacity(estimated.max(1) / 2 + 1, estimated, true);

	let row_iter: Box<dyn Iterator<Item = u32>> = match rows {
		Some(rows) => Box::new(rows.iter().copied()),
		None => Box::new(0..column.len() as u32),
	};

	for row in row_iter {
		if column.is_null(row as usize) {
			result.push_null_row(row);
			continue;
		}
		let group_id = table.insert(column, row);
		if group_id == members.len() {
			members.push(Vec::new());
			rep_rows.push(row);
		}
		members[group_id].push(row);
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

	#[test]
	fn groups_equal_strings_together() {
		let column = StringColumn::from_values([Some("IT"), Some("IT"), Some("HR")], false).unwrap();
		let result = build(&column, None);
		assert_eq!(result.group_count(), 2);
		assert!(result.keys_are_row_indices());
	}

	#[test]
	fn null_strings_form_the_null_group() {
		let column = StringColumn::from_values([Some("A"), None, Some("A"), None], true).unwrap();
		let result = build(&column, None);
		assert_eq!(result.group_count(), 1);
		assert_eq!(result.null_group_indices(), Some(&[1u32, 3u32][..]));
	}

	#[test]
	fn distinguishes_strings_sharing_a_four_byte_prefix() {
		let column = StringColumn::from_values([Some("abcdefgh"), Some("abcdxxxx")], false).unwrap();
		let result = build(&column, None);
		assert_eq!(result.group_count(), 2);
	}
}
