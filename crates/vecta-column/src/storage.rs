// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::ops::Deref;
use std::sync::Arc;

/// Copy-on-write buffer backing every numeric column. Grounded on the
/// teacher's `CowVec` (`crates/base/src/cowvec`), swapped from `Rc` to
/// `Arc` so a [`BufferSlice`] produced on one thread can be read from
/// another — the group-by kernels fan out across `rayon`'s pool (spec §5).
///
/// `slice()` shares the `Arc` rather than copying, matching spec §4.1's
/// "slice views ... share buffers with the source". Because sharing is
/// implemented safely (no raw pointers), a slice outlives a later mutation
/// of its source instead of dangling: a subsequent `append`/`set` on the
/// source clones the buffer via [`CowBuffer::make_mut`] and the slice keeps
/// seeing the pre-mutation snapshot. This is a deliberate safety-preserving
/// adaptation of the spec's "become invalid if mutated" wording — see
/// DESIGN.md.
#[derive(Clone, Debug)]
pub enum CowBuffer<T> {
	Owned(Vec<T>),
	Shared(Arc<Vec<T>>),
}

impl<T: Clone> CowBuffer<T> {
	pub fn new() -> Self {
		CowBuffer::Owned(Vec::new())
	}

	pub fn with_capacity(capacity: usize) -> Self {
		CowBuffer::Owned(Vec::with_capacity(capacity))
	}

	pub fn from_vec(vec: Vec<T>) -> Self {
		CowBuffer::Owned(vec)
	}

	pub fn as_slice(&self) -> &[T] {
		match self {
			CowBuffer::Owned(v) => v,
			CowBuffer::Shared(rc) => rc,
		}
	}

	pub fn len(&self) -> usize {
		self.as_slice().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get(&self, index: usize) -> Option<&T> {
		self.as_slice().get(index)
	}

	/// Ensures unique ownership, cloning the backing `Vec` if it is
	/// currently shared, and returns a mutable handle.
	pub fn make_mut(&mut self) -> &mut Vec<T> {
		if let CowBuffer::Shared(rc) = self {
			*self = CowBuffer::Owned((**rc).clone());
		}
		match self {
			CowBuffer::Owned(v) => v,
			CowBuffer::Shared(_) => unreachable!(),
		}
	}

	pub fn push(&mut self, value: T) {
		self.make_mut().push(value);
	}

	pub fn set(&mut self, index: usize, value: T) {
		self.make_mut()[index] = value;
	}

	/// Produces a read-only, buffer-sharing view over `[start, start+len)`.
	pub fn slice(&mut self, start: usize, len: usize) -> BufferSlice<T> {
		let rc = match self {
			CowBuffer::Owned(v) => {
				let rc = Arc::new(std::mem::take(v));
				*self = CowBuffer::Shared(Arc::clone(&rc));
				rc
			}
			CowBuffer::Shared(rc) => Arc::clone(rc),
		};
		BufferSlice { data: rc, start, len }
	}
}

impl<T: Clone> Default for CowBuffer<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Clone> Deref for CowBuffer<T> {
	type Target = [T];

	fn deref(&self) -> &Self::Target {
		self.as_slice()
	}
}

/// A read-only, buffer-sharing view into a numeric column's storage (spec
/// §4.1 `slice`). Cannot append; reads are bounds-checked against `len`.
#[derive(Clone, Debug)]
pub struct BufferSlice<T> {
	data: Arc<Vec<T>>,
	start: usize,
	len: usize,
}

impl<T> BufferSlice<T> {
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn get(&self, index: usize) -> Option<&T> {
		if index < self.len { self.data.get(self.start + index) } else { None }
	}

	pub fn as_slice(&self) -> &[T] {
		&self.data[self.start..self.start + self.len]
	}
}
