// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use vecta_column::{GroupResult, Int32Column};
use vecta_core::hash;
use vecta_core::swiss::SwissIndex;

/// Open-addressing table over `Int32` keys (spec §4.3.2): 7-bit metadata
/// tag plus a parallel payload array of `(key, group id)`. Grows by
/// doubling whenever the index reports the load factor would be exceeded,
/// re-probing every occupied slot into the larger table.
struct IntTable {
	index: SwissIndex,
	slot_key: Vec<i32>,
	slot_group: Vec<u32>,
	group_count: usize,
}

impl IntTable {
	fn with_capacity(capacity: usize) -> Self {
		let index = SwissIndex::with_capacity(capacity);
		let cap = index.capacity();
		Self { index, slot_key: vec![0; cap], slot_group: vec![0; cap], group_count: 0 }
	}

	/// Returns the group id for `key`, assigning a fresh one (in the
	/// order keys are first seen) if this is the first occurrence.
	fn insert(&mut self, key: i32) -> usize {
		if self.index.needs_growth() {
			self.grow();
		}
		let hash = hash::hash_i32(key);
		let (_start, h2) = hash::split(hash, self.index.capacity());
		for slot in self.index.probe(hash) {
			if self.index.is_empty_slot(slot) {
				self.index.occupy(slot, h2);
				self.slot_key[slot] = key;
				let group_id = self.group_count;
				self.slot_group[slot] = group_id as u32;
				self.group_count += 1;
				return group_id;
			}
			if self.index.tag_at(slot) == h2 && self.slot_key[slot] == key {
				return self.slot_group[slot] as usize;
			}
		}
		unreachable!("swiss table probe exhausted capacity without finding a slot")
	}

	fn grow(&mut self) {
		let new_capacity = self.index.grown_capacity();
		let old_index = std::mem::replace(&mut self.index, SwissIndex::with_capacity(new_capacity));
		let old_keys = std::mem::replace(&mut self.slot_key, vec![0; self.index.capacity()]);
		let old_groups = std::mem::replace(&mut self.slot_group, vec![0; self.index.capacity()]);
		for slot in 0..old_index.capacity() {
			if old_index.is_empty_slot(slot) {
				continue;
			}
			let key = old_keys[slot];
			let group_id = old_groups[slot];
			let hash = hash::hash_i32(key);
			let (_start, h2) = hash::split(hash, self.index.capacity());
			for candidate in self.index.probe(hash) {
				if self.index.is_empty_slot(candidate) {
					self.index.occupy(candidate, h2);
					self.slot_key[candidate] = key;
					self.slot_group[candidate] = group_id;
					break;
				}
			}
		}
	}
}

/// Builds a sparse-integer Swiss-table group result (spec §4.3.2) over the
/// given rows of `column` (all rows, in order, if `rows` is `None` — used
/// by the partitioned-parallel path to build one local table per slice).
#[tracing::instrument(level = "debug", skip(column, rows))]
pub fn build(column: &Int32Column, rows: Option<&[u32]>) -> GroupResult {
	let estimated = rows.map(|r| r.len()).unwrap_or_else(|| column.len());
	let mut table = IntTable::with_capacity(estimated.max(1));
	let mut members: Vec<Vec<u32>> = Vec::new();
	let mut result = GroupResult::with_capacity(estimated.max(1) / 2 + 1, estimated, false);

	let row_iter: Box<dyn Iterator<Item = u32>> = match rows {
		Some(rows) => Box::new(rows.iter().copied()),
		None => Box::new(0..column.len() as u32),
	};

	for row in row_iter {
		match column.get(row as usize) {
			Some(key) => {
				let group_id = table.insert(key);
				if group_id == members.len() {
					members.push(Vec::new());
					result.begin_group(key as i64);
				}
				members[group_id].push(row);
			}
			None => result.push_null_row(row),
		}
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
	fn groups_by_distinct_key_preserving_row_order() {
		let column = Int32Column::from_values([Some(1), Some(1), Some(2), Some(3), Some(3), Some(3)], false).unwrap();
		let result = build(&column, None);
		assert_eq!(result.group_count(), 3);

		let mut counts: Vec<(i64, usize)> =
			(0..result.group_count()).map(|g| (result.keys()[g], result.group_rows(g).len())).collect();
		counts.sort_by_key(|&(k, _)| k);
		assert_eq!(counts, vec![(1, 2), (2, 1), (3, 3)]);
	}

	#[test]
	fn null_keys_are_collected_separately() {
		let column = Int32Column::from_values([Some(1), None, Some(1), None], true).unwrap();
		let result = build(&column, None);
		assert_eq!(result.group_count(), 1);
		assert_eq!(result.null_group_indices(), Some(&[1u32, 3u32][..]));
	}

	#[test]
	fn handles_many_distinct_keys_with_resize() {
		let values: Vec<Option<i32>> = (0..5000).map(Some).collect();
		let column = Int32Column::from_values(values, false).unwrap();
		let result = build(&column, None);
		assert_eq!(result.group_count(), 5000);
		for g in 0..result.group_count() {
			assert_eq!(result.group_rows(g).len(), 1);
		}
	}

	#[test]
	fn rows_within_a_group_stay_in_ascending_source_order() {
		let column = Int32Column::from_values([Some(9), Some(1), Some(9), Some(1), Some(9)], false).unwrap();
		let result = build(&column, None);
		let group_for_nine = (0..result.group_count()).find(|&g| result.keys()[g] == 9).unwrap();
		assert_eq!(result.group_rows(group_for_nine), &[0, 2, 4]);
	}
}
