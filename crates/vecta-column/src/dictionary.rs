// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::collections::HashMap;
use std::sync::Arc;

/// The string dictionary backing a `Category` column. Slot `0` is always
/// reserved for null (spec §3); every code a `Category` column holds must
/// index into `[0, entries.len())`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DictionaryData {
	entries: Vec<Option<String>>,
	index: HashMap<String, i32>,
}

impl DictionaryData {
	pub fn new() -> Self {
		Self { entries: vec![None], index: HashMap::new() }
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.len() <= 1
	}

	pub fn get(&self, code: i32) -> Option<&str> {
		self.entries.get(code as usize).and_then(|v| v.as_deref())
	}

	/// Returns the code for `value`, inserting a new dictionary entry if
	/// this is the first time it's been seen.
	pub fn intern(&mut self, value: &str) -> i32 {
		if let Some(&code) = self.index.get(value) {
			return code;
		}
		let code = self.entries.len() as i32;
		self.entries.push(Some(value.to_string()));
		self.index.insert(value.to_string(), code);
		code
	}

	pub fn null_code() -> i32 {
		0
	}

	pub fn iter(&self) -> impl Iterator<Item = (i32, Option<&str>)> {
		self.entries.iter().enumerate().map(|(code, v)| (code as i32, v.as_deref()))
	}
}

/// Copy-on-write handle to a [`DictionaryData`], shared read-only between
/// clones produced by `clone_subset` (spec §3, §9). Grounded on the
/// teacher's `CowVec` (`crates/base/src/cowvec`), adapted from `Rc` to `Arc`
/// because group-by kernels in this engine run across `rayon`'s thread
/// pool rather than on a single thread.
#[derive(Clone, Debug, PartialEq)]
pub enum Dictionary {
	Owned(DictionaryData),
	Shared(Arc<DictionaryData>),
}

impl Default for Dictionary {
	fn default() -> Self {
		Dictionary::Owned(DictionaryData::new())
	}
}

impl Dictionary {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn as_data(&self) -> &DictionaryData {
		match self {
			Dictionary::Owned(data) => data,
			Dictionary::Shared(rc) => rc,
		}
	}

	/// Ensures unique ownership (cloning the shared data if necessary)
	/// and returns a mutable handle for extending it, e.g. when a clone
	/// appends a novel string before it is shared further.
	pub fn make_mut(&mut self) -> &mut DictionaryData {
		if let Dictionary::Shared(rc) = self {
			*self = Dictionary::Owned((**rc).clone());
		}
		match self {
			Dictionary::Owned(data) => data,
			Dictionary::Shared(_) => unreachable!(),
		}
	}

	/// Produces a read-only handle sharing the same backing data —
	/// O(1), no string copies (spec §3: "dictionary is reference-shared
	/// between flyweight clones").
	pub fn share(&self) -> Self {
		match self {
			Dictionary::Owned(data) => Dictionary::Shared(Arc::new(data.clone())),
			Dictionary::Shared(rc) => Dictionary::Shared(Arc::clone(rc)),
		}
	}
}
