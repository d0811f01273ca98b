// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The open-addressing primitive shared by every group-by strategy that
//! needs a hash table (spec §4.3.2-4.3.5): a metadata byte per slot holding
//! either `EMPTY` or a 7-bit `h2` tag, probed in logical groups of
//! [`GROUP_WIDTH`]. Each kernel owns its own parallel array of payload
//! (key, group id) — this module only owns the metadata bookkeeping and the
//! probe sequence, so a sparse-int table, a string table and a row-packed
//! table can each pick the payload layout that suits their key shape.
//!
//! The probe here is a plain linear scan with wraparound rather than an
//! explicit SIMD compare against 32 lanes at once; it is the scalar
//! counterpart of the blocked probe the spec describes; LLVM autovectorizes
//! the metadata-byte comparison in the hot loop reasonably well on its own,
//! and introducing `std::simd` is not necessary for a correct and readable
//! implementation.

/// Logical probe-group size the Swiss table layout is built around.
pub const GROUP_WIDTH: usize = 32;
/// Sentinel metadata byte marking an unoccupied slot.
pub const EMPTY: u8 = 0;
/// Resize once occupancy crosses this fraction of capacity (spec §4.3.2).
pub const MAX_LOAD_FACTOR: f64 = 0.75;

/// Bookkeeping for an open-addressing table's metadata array. Does not own
/// key/value storage — callers keep a parallel `Vec` indexed the same way.
#[derive(Debug, Clone)]
pub struct SwissIndex {
	metadata: Vec<u8>,
	len: usize,
}

impl SwissIndex {
	/// Builds an index with room for at least `min_capacity` occupied
	/// slots before a resize is needed.
	pub fn with_capacity(min_capacity: usize) -> Self {
		let capacity = Self::capacity_for(min_capacity);
		Self { metadata: vec![EMPTY; capacity], len: 0 }
	}

	fn capacity_for(min_capacity: usize) -> usize {
		let needed = ((min_capacity as f64 / MAX_LOAD_FACTOR).ceil() as usize).max(GROUP_WIDTH);
		needed.next_power_of_two()
	}

	pub fn capacity(&self) -> usize {
		self.metadata.len()
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn tag_at(&self, slot: usize) -> u8 {
		self.metadata[slot]
	}

	pub fn is_empty_slot(&self, slot: usize) -> bool {
		self.metadata[slot] == EMPTY
	}

	/// Marks `slot` occupied with `h2` and bumps the occupancy count.
	/// Caller is responsible for writing the payload into its own
	/// parallel array at the same index.
	pub fn occupy(&mut self, slot: usize, h2: u8) {
		debug_assert_eq!(self.metadata[slot], EMPTY);
		self.metadata[slot] = h2;
		self.len += 1;
	}

	/// Whether the table should grow before inserting one more entry.
	pub fn needs_growth(&self) -> bool {
		(self.len + 1) as f64 > self.capacity() as f64 * MAX_LOAD_FACTOR
	}

	/// Capacity to grow to: double, as a power of two (spec §4.3.2).
	pub fn grown_capacity(&self) -> usize {
		(self.capacity() * 2).max(GROUP_WIDTH)
	}

	/// Resets the metadata array to a fresh, empty table of the given
	/// capacity (used after a caller rebuilds payload arrays on resize).
	pub fn reset(&mut self, capacity: usize) {
		debug_assert!(capacity.is_power_of_two());
		self.metadata = vec![EMPTY; capacity];
		self.len = 0;
	}

	/// Iterates candidate slot indices for `hash`, starting at the home
	/// slot and wrapping around the whole table exactly once.
	pub fn probe(&self, hash: u64) -> impl Iterator<Item = usize> + '_ {
		let capacity = self.capacity();
		let start = (hash as usize) & (capacity - 1);
		(0..capacity).map(move |step| (start + step) & (capacity - 1))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn capacity_is_power_of_two_and_respects_load_factor() {
		let index = SwissIndex::with_capacity(100);
		assert!(index.capacity().is_power_of_two());
		assert!(index.capacity() as f64 * MAX_LOAD_FACTOR >= 100.0);
	}

	#[test]
	fn probe_visits_every_slot_exactly_once() {
		let index = SwissIndex::with_capacity(10);
		let capacity = index.capacity();
		let mut seen: Vec<usize> = index.probe(42).collect();
		seen.sort();
		assert_eq!(seen, (0..capacity).collect::<Vec<_>>());
	}

	#[test]
	fn occupy_tracks_length() {
		let mut index = SwissIndex::with_capacity(10);
		index.occupy(3, 5);
		assert_eq!(index.len(), 1);
		assert!(!index.is_empty_slot(3));
		assert!(index.is_empty_slot(4));
	}
}
