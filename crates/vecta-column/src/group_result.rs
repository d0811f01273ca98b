// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

/// A group-by result in Compressed Sparse Row form (spec §4.2).
///
/// Group `g` owns the row indices `row_indices[offsets[g]..offsets[g+1]]`.
/// `keys` holds one entry per group: either the group's key value packed as
/// `i64` (for single-column integer/category keys) or, when
/// `keys_are_row_indices` is set, the index of a representative source row
/// whose cells the caller reconstructs the key from (used by the
/// multi-column row-packed strategy, where the key has no single scalar
/// representation).
#[derive(Clone, Debug, Default)]
pub struct GroupResult {
	keys: Vec<i64>,
	keys_are_row_indices: bool,
	offsets: Vec<u32>,
	row_indices: Vec<u32>,
	null_group_indices: Option<Vec<u32>>,
}

impl GroupResult {
	pub fn new(keys_are_row_indices: bool) -> Self {
		Self { keys: Vec::new(), keys_are_row_indices, offsets: vec![0], row_indices: Vec::new(), null_group_indices: None }
	}

	pub fn with_capacity(group_capacity: usize, row_capacity: usize, keys_are_row_indices: bool) -> Self {
		let mut offsets = Vec::with_capacity(group_capacity + 1);
		offsets.push(0);
		Self {
			keys: Vec::with_capacity(group_capacity),
			keys_are_row_indices,
			offsets,
			row_indices: Vec::with_capacity(row_capacity),
			null_group_indices: None,
		}
	}

	pub fn keys_are_row_indices(&self) -> bool {
		self.keys_are_row_indices
	}

	pub fn group_count(&self) -> usize {
		self.keys.len()
	}

	pub fn keys(&self) -> &[i64] {
		&self.keys
	}

	pub fn offsets(&self) -> &[u32] {
		&self.offsets
	}

	pub fn row_indices(&self) -> &[u32] {
		&self.row_indices
	}

	pub fn null_group_indices(&self) -> Option<&[u32]> {
		self.null_group_indices.as_deref()
	}

	/// Row-index window `[start, end)` into [`Self::row_indices`] owned by
	/// group `g`.
	pub fn group_window(&self, g: usize) -> (usize, usize) {
		(self.offsets[g] as usize, self.offsets[g + 1] as usize)
	}

	pub fn group_rows(&self, g: usize) -> &[u32] {
		let (start, end) = self.group_window(g);
		&self.row_indices[start..end]
	}

	/// Starts a new group keyed by `key`, returning its index. Callers
	/// append member rows with [`Self::push_row`] before starting the
	/// next group — this mirrors how every dispatch strategy in
	/// `vecta-engine` materializes a Swiss-table bucket walk into CSR
	/// form: one linear pass over buckets, each emitting its member rows
	/// contiguously.
	pub fn begin_group(&mut self, key: i64) -> usize {
		self.keys.push(key);
		self.offsets.push(self.offsets.last().copied().unwrap_or(0));
		self.keys.len() - 1
	}

	pub fn push_row(&mut self, row: u32) {
		self.row_indices.push(row);
		*self.offsets.last_mut().expect("begin_group called before push_row") += 1;
	}

	/// Records `row` as belonging to the distinguished null group (spec
	/// §4.2, §4.3 "null policy") — its key compared null, so it never
	/// enters `row_indices` via a regular group.
	pub fn push_null_row(&mut self, row: u32) {
		self.null_group_indices.get_or_insert_with(Vec::new).push(row);
	}

	pub fn has_null_group(&self) -> bool {
		self.null_group_indices.as_ref().is_some_and(|rows| !rows.is_empty())
	}

	/// Assembles a `GroupResult` from already-computed CSR parts — used
	/// by direct addressing (spec §4.3.1), which builds the histogram,
	/// prefix-sums it into `offsets` and scatters row indices in a single
	/// pass rather than growing the arrays via [`Self::begin_group`] /
	/// [`Self::push_row`].
	pub fn from_parts(
		keys: Vec<i64>,
		keys_are_row_indices: bool,
		offsets: Vec<u32>,
		row_indices: Vec<u32>,
		null_group_indices: Option<Vec<u32>>,
	) -> Self {
		debug_assert_eq!(offsets.len(), keys.len() + 1);
		debug_assert_eq!(offsets.first().copied(), Some(0));
		debug_assert_eq!(offsets.last().copied(), Some(row_indices.len() as u32));
		Self { keys, keys_are_row_indices, offsets, row_indices, null_group_indices }
	}

	/// Rewrites `keys` to hold each group's first member row instead of
	/// its literal integer value, and flags `keys_are_row_indices`. Used
	/// when a category pre-pass (spec §4.3.4) dispatched through the
	/// integer path on dictionary codes: the caller wants the group keyed
	/// back by the original string column, not by the transient code.
	pub fn into_representative_keyed(mut self) -> Self {
		self.keys = (0..self.group_count())
			.map(|g| {
				let (start, _end) = self.group_window(g);
				self.row_indices[start] as i64
			})
			.collect();
		self.keys_are_row_indices = true;
		self
	}
}
