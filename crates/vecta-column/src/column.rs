// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use vecta_core::{Error, Result};
use vecta_type::{Ticks, Type};

use crate::bitmap::NullBitmap;
use crate::dictionary::Dictionary;
use crate::storage::{BufferSlice, CowBuffer};

/// A contiguous `Int32` column (spec §3).
#[derive(Clone, Debug)]
pub struct Int32Column {
	data: CowBuffer<i32>,
	nulls: NullBitmap,
	nullable: bool,
}

/// A read-only, buffer-sharing view into an `Int32Column` (spec §4.1
/// `slice`). Numeric slices never carry a null bitmap slice of their own —
/// null checks on a view are delegated back to reading `is_null` on the
/// source before slicing, matching the "cannot append, invalid on source
/// mutation" contract via `BufferSlice` (see `storage.rs`).
#[derive(Clone, Debug)]
pub struct Int32Slice(pub(crate) BufferSlice<i32>);

impl Int32Slice {
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<i32> {
		self.0.get(index).copied()
	}

	pub fn as_slice(&self) -> &[i32] {
		self.0.as_slice()
	}
}

impl Int32Column {
	pub fn new(nullable: bool) -> Self {
		Self { data: CowBuffer::new(), nulls: NullBitmap::new(), nullable }
	}

	pub fn with_capacity(capacity: usize, nullable: bool) -> Self {
		Self { data: CowBuffer::with_capacity(capacity), nulls: NullBitmap::with_capacity(capacity), nullable }
	}

	pub fn from_values(values: impl IntoIterator<Item = Option<i32>>, nullable: bool) -> Result<Self> {
		let mut col = Self::new(nullable);
		for v in values {
			col.append(v)?;
		}
		Ok(col)
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn nullable(&self) -> bool {
		self.nullable
	}

	pub fn append(&mut self, value: Option<i32>) -> Result<()> {
		match value {
			Some(v) => {
				self.data.push(v);
				self.nulls.push(false);
			}
			None => {
				if !self.nullable {
					return Err(Error::NullabilityViolated("<int32 column>".into()));
				}
				self.data.push(0);
				self.nulls.push(true);
			}
		}
		Ok(())
	}

	pub fn set(&mut self, index: usize, value: i32) -> Result<()> {
		if index >= self.len() {
			return Err(Error::index_out_of_range(index, self.len()));
		}
		self.data.set(index, value);
		self.nulls.clear_null(index);
		Ok(())
	}

	pub fn set_null(&mut self, index: usize) -> Result<()> {
		if !self.nullable {
			return Err(Error::NullabilityViolated("<int32 column>".into()));
		}
		if index >= self.len() {
			return Err(Error::index_out_of_range(index, self.len()));
		}
		self.data.set(index, 0);
		self.nulls.set_null(index);
		Ok(())
	}

	pub fn get(&self, index: usize) -> Option<i32> {
		if self.nulls.is_null(index) { None } else { self.data.get(index).copied() }
	}

	pub fn is_null(&self, index: usize) -> bool {
		self.nulls.is_null(index)
	}

	pub fn nulls(&self) -> &NullBitmap {
		&self.nulls
	}

	pub fn as_slice(&self) -> &[i32] {
		self.data.as_slice()
	}

	pub fn slice(&mut self, start: usize, len: usize) -> Result<Int32Slice> {
		if start.checked_add(len).is_none_or(|end| end > self.len()) {
			return Err(Error::slice_out_of_range(start, len, self.len()));
		}
		Ok(Int32Slice(self.data.slice(start, len)))
	}

	pub fn clone_subset(&self, indices: &[usize]) -> Result<Self> {
		let mut out = Vec::with_capacity(indices.len());
		for &i in indices {
			if i >= self.len() {
				return Err(Error::index_out_of_range(i, self.len()));
			}
			out.push(self.data.get(i).copied().unwrap_or(0));
		}
		Ok(Self { data: CowBuffer::from_vec(out), nulls: self.nulls.subset(indices), nullable: self.nullable })
	}

	/// Accelerated aggregation over a CSR window (spec §4.1, §4.4). When
	/// the column has no nulls at all this walks the contiguous buffer
	/// directly — the "fast path" spec §4.4 calls out for a dense,
	/// non-nullable numeric source.
	pub fn compute_sum(&self, row_indices: &[u32], start: usize, end: usize) -> (i64, bool) {
		let mut sum: i64 = 0;
		let mut any = false;
		if !self.nulls.any_null() {
			for &row in &row_indices[start..end] {
				sum = sum.wrapping_add(self.data[row as usize] as i64);
				any = true;
			}
		} else {
			for &row in &row_indices[start..end] {
				let row = row as usize;
				if !self.nulls.is_null(row) {
					sum = sum.wrapping_add(self.data[row] as i64);
					any = true;
				}
			}
		}
		(sum, any)
	}

	pub fn compute_mean(&self, row_indices: &[u32], start: usize, end: usize) -> Option<f64> {
		let (sum, any) = self.compute_sum(row_indices, start, end);
		if !any {
			return None;
		}
		let count = row_indices[start..end].iter().filter(|&&row| !self.nulls.is_null(row as usize)).count();
		Some(sum as f64 / count as f64)
	}

	pub fn compute_min(&self, row_indices: &[u32], start: usize, end: usize) -> Option<i32> {
		row_indices[start..end]
			.iter()
			.filter_map(|&row| self.get(row as usize))
			.min()
	}

	pub fn compute_max(&self, row_indices: &[u32], start: usize, end: usize) -> Option<i32> {
		row_indices[start..end]
			.iter()
			.filter_map(|&row| self.get(row as usize))
			.max()
	}
}

/// The widened `Int64` accumulator column produced by `Sum` over an
/// `Int32` source (spec §4.4). Never constructed via `append`/`set` from
/// user code — only the aggregation kernel builds one.
#[derive(Clone, Debug)]
pub struct Int64Column {
	data: CowBuffer<i64>,
	nulls: NullBitmap,
}

impl Int64Column {
	pub fn with_capacity(capacity: usize) -> Self {
		Self { data: CowBuffer::with_capacity(capacity), nulls: NullBitmap::with_capacity(capacity) }
	}

	pub fn push(&mut self, value: Option<i64>) {
		match value {
			Some(v) => {
				self.data.push(v);
				self.nulls.push(false);
			}
			None => {
				self.data.push(0);
				self.nulls.push(true);
			}
		}
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get(&self, index: usize) -> Option<i64> {
		if self.nulls.is_null(index) { None } else { self.data.get(index).copied() }
	}

	pub fn is_null(&self, index: usize) -> bool {
		self.nulls.is_null(index)
	}

	pub fn nulls(&self) -> &NullBitmap {
		&self.nulls
	}

	pub fn clone_subset(&self, indices: &[usize]) -> Result<Self> {
		let mut out = Self::with_capacity(indices.len());
		for &i in indices {
			if i >= self.len() {
				return Err(Error::index_out_of_range(i, self.len()));
			}
			out.push(self.get(i));
		}
		Ok(out)
	}
}

/// A contiguous `Float64` column. `NaN` is a legitimate value distinct from
/// null (spec §3, §9) — only the bitmap marks nullness.
#[derive(Clone, Debug)]
pub struct Float64Column {
	data: CowBuffer<f64>,
	nulls: NullBitmap,
	nullable: bool,
}

#[derive(Clone, Debug)]
pub struct Float64Slice(pub(crate) BufferSlice<f64>);

impl Float64Slice {
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<f64> {
		self.0.get(index).copied()
	}

	pub fn as_slice(&self) -> &[f64] {
		self.0.as_slice()
	}
}

impl Float64Column {
	pub fn new(nullable: bool) -> Self {
		Self { data: CowBuffer::new(), nulls: NullBitmap::new(), nullable }
	}

	pub fn with_capacity(capacity: usize, nullable: bool) -> Self {
		Self { data: CowBuffer::with_capacity(capacity), nulls: NullBitmap::with_capacity(capacity), nullable }
	}

	pub fn from_values(values: impl IntoIterator<Item = Option<f64>>, nullable: bool) -> Result<Self> {
		let mut col = Self::new(nullable);
		for v in values {
			col.append(v)?;
		}
		Ok(col)
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn nullable(&self) -> bool {
		self.nullable
	}

	pub fn append(&mut self, value: Option<f64>) -> Result<()> {
		match value {
			Some(v) => {
				self.data.push(v);
				self.nulls.push(false);
			}
			None => {
				if !self.nullable {
					return Err(Error::NullabilityViolated("<float64 column>".into()));
				}
				self.data.push(0.0);
				self.nulls.push(true);
			}
		}
		Ok(())
	}

	pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
		if index >= self.len() {
			return Err(Error::index_out_of_range(index, self.len()));
		}
		self.data.set(index, value);
		self.nulls.clear_null(index);
		Ok(())
	}

	pub fn set_null(&mut self, index: usize) -> Result<()> {
		if !self.nullable {
			return Err(Error::NullabilityViolated("<float64 column>".into()));
		}
		if index >= self.len() {
			return Err(Error::index_out_of_range(index, self.len()));
		}
		self.data.set(index, 0.0);
		self.nulls.set_null(index);
		Ok(())
	}

	pub fn get(&self, index: usize) -> Option<f64> {
		if self.nulls.is_null(index) { None } else { self.data.get(index).copied() }
	}

	pub fn is_null(&self, index: usize) -> bool {
		self.nulls.is_null(index)
	}

	pub fn nulls(&self) -> &NullBitmap {
		&self.nulls
	}

	pub fn as_slice(&self) -> &[f64] {
		self.data.as_slice()
	}

	pub fn slice(&mut self, start: usize, len: usize) -> Result<Float64Slice> {
		if start.checked_add(len).is_none_or(|end| end > self.len()) {
			return Err(Error::slice_out_of_range(start, len, self.len()));
		}
		Ok(Float64Slice(self.data.slice(start, len)))
	}

	pub fn clone_subset(&self, indices: &[usize]) -> Result<Self> {
		let mut out = Vec::with_capacity(indices.len());
		for &i in indices {
			if i >= self.len() {
				return Err(Error::index_out_of_range(i, self.len()));
			}
			out.push(self.data.get(i).copied().unwrap_or(0.0));
		}
		Ok(Self { data: CowBuffer::from_vec(out), nulls: self.nulls.subset(indices), nullable: self.nullable })
	}

	pub fn compute_sum(&self, row_indices: &[u32], start: usize, end: usize) -> (f64, bool) {
		let mut sum = 0.0;
		let mut any = false;
		if !self.nulls.any_null() {
			for &row in &row_indices[start..end] {
				sum += self.data[row as usize];
				any = true;
			}
		} else {
			for &row in &row_indices[start..end] {
				let row = row as usize;
				if !self.nulls.is_null(row) {
					sum += self.data[row];
					any = true;
				}
			}
		}
		(sum, any)
	}

	pub fn compute_mean(&self, row_indices: &[u32], start: usize, end: usize) -> Option<f64> {
		let (sum, any) = self.compute_sum(row_indices, start, end);
		if !any {
			return None;
		}
		let count = row_indices[start..end].iter().filter(|&&row| !self.nulls.is_null(row as usize)).count();
		Some(sum / count as f64)
	}

	pub fn compute_min(&self, row_indices: &[u32], start: usize, end: usize) -> Option<f64> {
		row_indices[start..end]
			.iter()
			.filter_map(|&row| self.get(row as usize))
			.fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
	}

	pub fn compute_max(&self, row_indices: &[u32], start: usize, end: usize) -> Option<f64> {
		row_indices[start..end]
			.iter()
			.filter_map(|&row| self.get(row as usize))
			.fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
	}
}

/// A bit-packed `Bool` column — no slice view (spec §4.1 excludes bool).
#[derive(Clone, Debug)]
pub struct BoolColumn {
	bits: Vec<u8>,
	len: usize,
	nulls: NullBitmap,
	nullable: bool,
}

impl BoolColumn {
	pub fn new(nullable: bool) -> Self {
		Self { bits: Vec::new(), len: 0, nulls: NullBitmap::new(), nullable }
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn nullable(&self) -> bool {
		self.nullable
	}

	#[inline]
	fn location(index: usize) -> (usize, u8) {
		(index / 8, 1 << (index % 8))
	}

	pub fn append(&mut self, value: Option<bool>) -> Result<()> {
		let (byte, mask) = Self::location(self.len);
		if byte >= self.bits.len() {
			self.bits.push(0);
		}
		match value {
			Some(true) => self.bits[byte] |= mask,
			Some(false) => {}
			None => {
				if !self.nullable {
					return Err(Error::NullabilityViolated("<bool column>".into()));
				}
			}
		}
		self.nulls.push(value.is_none());
		self.len += 1;
		Ok(())
	}

	pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
		if index >= self.len {
			return Err(Error::index_out_of_range(index, self.len));
		}
		let (byte, mask) = Self::location(index);
		if value {
			self.bits[byte] |= mask;
		} else {
			self.bits[byte] &= !mask;
		}
		self.nulls.clear_null(index);
		Ok(())
	}

	pub fn set_null(&mut self, index: usize) -> Result<()> {
		if !self.nullable {
			return Err(Error::NullabilityViolated("<bool column>".into()));
		}
		if index >= self.len {
			return Err(Error::index_out_of_range(index, self.len));
		}
		let (byte, mask) = Self::location(index);
		self.bits[byte] &= !mask;
		self.nulls.set_null(index);
		Ok(())
	}

	pub fn get(&self, index: usize) -> Option<bool> {
		if self.nulls.is_null(index) {
			return None;
		}
		let (byte, mask) = Self::location(index);
		Some(self.bits[byte] & mask != 0)
	}

	pub fn is_null(&self, index: usize) -> bool {
		self.nulls.is_null(index)
	}

	pub fn nulls(&self) -> &NullBitmap {
		&self.nulls
	}

	pub fn clone_subset(&self, indices: &[usize]) -> Result<Self> {
		let mut out = Self::new(self.nullable);
		for &i in indices {
			if i >= self.len {
				return Err(Error::index_out_of_range(i, self.len));
			}
			out.append(self.get(i))?;
		}
		Ok(out)
	}
}

/// A contiguous `Timestamp` column storing 100ns ticks since the Unix epoch
/// (spec §3, §9).
#[derive(Clone, Debug)]
pub struct TimestampColumn {
	data: CowBuffer<i64>,
	nulls: NullBitmap,
	nullable: bool,
}

#[derive(Clone, Debug)]
pub struct TimestampSlice(pub(crate) BufferSlice<i64>);

impl TimestampSlice {
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn get(&self, index: usize) -> Option<Ticks> {
		self.0.get(index).copied().map(Ticks)
	}
}

impl TimestampColumn {
	pub fn new(nullable: bool) -> Self {
		Self { data: CowBuffer::new(), nulls: NullBitmap::new(), nullable }
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn nullable(&self) -> bool {
		self.nullable
	}

	pub fn append(&mut self, value: Option<Ticks>) -> Result<()> {
		match value {
			Some(v) => {
				self.data.push(v.0);
				self.nulls.push(false);
			}
			None => {
				if !self.nullable {
					return Err(Error::NullabilityViolated("<timestamp column>".into()));
				}
				self.data.push(0);
				self.nulls.push(true);
			}
		}
		Ok(())
	}

	pub fn set(&mut self, index: usize, value: Ticks) -> Result<()> {
		if index >= self.len() {
			return Err(Error::index_out_of_range(index, self.len()));
		}
		self.data.set(index, value.0);
		self.nulls.clear_null(index);
		Ok(())
	}

	pub fn set_null(&mut self, index: usize) -> Result<()> {
		if !self.nullable {
			return Err(Error::NullabilityViolated("<timestamp column>".into()));
		}
		if index >= self.len() {
			return Err(Error::index_out_of_range(index, self.len()));
		}
		self.nulls.set_null(index);
		Ok(())
	}

	pub fn get(&self, index: usize) -> Option<Ticks> {
		if self.nulls.is_null(index) { None } else { self.data.get(index).copied().map(Ticks) }
	}

	pub fn is_null(&self, index: usize) -> bool {
		self.nulls.is_null(index)
	}

	pub fn nulls(&self) -> &NullBitmap {
		&self.nulls
	}

	pub fn slice(&mut self, start: usize, len: usize) -> Result<TimestampSlice> {
		if start.checked_add(len).is_none_or(|end| end > self.len()) {
			return Err(Error::slice_out_of_range(start, len, self.len()));
		}
		Ok(TimestampSlice(self.data.slice(start, len)))
	}

	pub fn clone_subset(&self, indices: &[usize]) -> Result<Self> {
		let mut out = Vec::with_capacity(indices.len());
		for &i in indices {
			if i >= self.len() {
				return Err(Error::index_out_of_range(i, self.len()));
			}
			out.push(self.data.get(i).copied().unwrap_or(0));
		}
		Ok(Self { data: CowBuffer::from_vec(out), nulls: self.nulls.subset(indices), nullable: self.nullable })
	}
}

/// A `String` column: UTF-8 bytes plus `offsets[n+1]` (spec §3).
#[derive(Clone, Debug)]
pub struct StringColumn {
	bytes: Vec<u8>,
	offsets: Vec<usize>,
	nulls: NullBitmap,
	nullable: bool,
}

impl StringColumn {
	pub fn new(nullable: bool) -> Self {
		Self { bytes: Vec::new(), offsets: vec![0], nulls: NullBitmap::new(), nullable }
	}

	pub fn from_values<'a>(values: impl IntoIterator<Item = Option<&'a str>>, nullable: bool) -> Result<Self> {
		let mut col = Self::new(nullable);
		for v in values {
			col.append(v)?;
		}
		Ok(col)
	}

	pub fn len(&self) -> usize {
		self.offsets.len() - 1
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn nullable(&self) -> bool {
		self.nullable
	}

	pub fn append(&mut self, value: Option<&str>) -> Result<()> {
		match value {
			Some(v) => {
				self.bytes.extend_from_slice(v.as_bytes());
				self.nulls.push(false);
			}
			None => {
				if !self.nullable {
					return Err(Error::NullabilityViolated("<string column>".into()));
				}
				self.nulls.push(true);
			}
		}
		self.offsets.push(self.bytes.len());
		Ok(())
	}

	pub fn get(&self, index: usize) -> Option<&str> {
		if self.nulls.is_null(index) {
			return None;
		}
		let start = self.offsets[index];
		let end = self.offsets[index + 1];
		Some(std::str::from_utf8(&self.bytes[start..end]).expect("column bytes are valid UTF-8 by construction"))
	}

	pub fn is_null(&self, index: usize) -> bool {
		self.nulls.is_null(index)
	}

	pub fn nulls(&self) -> &NullBitmap {
		&self.nulls
	}

	pub fn set_null(&mut self, index: usize) -> Result<()> {
		if !self.nullable {
			return Err(Error::NullabilityViolated("<string column>".into()));
		}
		if index >= self.len() {
			return Err(Error::index_out_of_range(index, self.len()));
		}
		// Rows are rebuilt rather than patched in place: shifting the byte
		// range for one row would require re-indexing every later offset.
		let mut rebuilt = Self::new(self.nullable);
		for i in 0..self.len() {
			if i == index {
				rebuilt.append(None)?;
			} else {
				rebuilt.append(self.get(i))?;
			}
		}
		*self = rebuilt;
		Ok(())
	}

	pub fn set(&mut self, index: usize, value: &str) -> Result<()> {
		if index >= self.len() {
			return Err(Error::index_out_of_range(index, self.len()));
		}
		let mut rebuilt = Self::new(self.nullable);
		for i in 0..self.len() {
			if i == index {
				rebuilt.append(Some(value))?;
			} else {
				rebuilt.append(self.get(i))?;
			}
		}
		*self = rebuilt;
		Ok(())
	}

	pub fn clone_subset(&self, indices: &[usize]) -> Result<Self> {
		let mut out = Self::new(self.nullable);
		for &i in indices {
			if i >= self.len() {
				return Err(Error::index_out_of_range(i, self.len()));
			}
			out.append(self.get(i))?;
		}
		Ok(out)
	}

	pub fn byte_len(&self, index: usize) -> usize {
		self.offsets[index + 1] - self.offsets[index]
	}

	pub fn as_bytes(&self, index: usize) -> &[u8] {
		&self.bytes[self.offsets[index]..self.offsets[index + 1]]
	}
}

/// A `Category` column: `Int32` codes into a shared [`Dictionary`] (spec
/// §3). Code `0` is always null.
#[derive(Clone, Debug)]
pub struct CategoryColumn {
	codes: Vec<i32>,
	dictionary: Dictionary,
	nullable: bool,
}

impl CategoryColumn {
	pub fn new(nullable: bool) -> Self {
		Self { codes: Vec::new(), dictionary: Dictionary::new(), nullable }
	}

	pub fn with_dictionary(dictionary: Dictionary, nullable: bool) -> Self {
		Self { codes: Vec::new(), dictionary, nullable }
	}

	pub fn len(&self) -> usize {
		self.codes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.codes.is_empty()
	}

	pub fn nullable(&self) -> bool {
		self.nullable
	}

	pub fn dictionary(&self) -> &Dictionary {
		&self.dictionary
	}

	pub fn append(&mut self, value: Option<&str>) -> Result<()> {
		match value {
			Some(v) => {
				let code = self.dictionary.make_mut().intern(v);
				self.codes.push(code);
			}
			None => {
				if !self.nullable {
					return Err(Error::NullabilityViolated("<category column>".into()));
				}
				self.codes.push(0);
			}
		}
		Ok(())
	}

	pub fn append_code(&mut self, code: i32) -> Result<()> {
		if code == 0 && !self.nullable {
			return Err(Error::NullabilityViolated("<category column>".into()));
		}
		self.codes.push(code);
		Ok(())
	}

	pub fn code_at(&self, index: usize) -> i32 {
		self.codes[index]
	}

	pub fn codes(&self) -> &[i32] {
		&self.codes
	}

	pub fn get(&self, index: usize) -> Option<&str> {
		let code = self.codes[index];
		if code == 0 { None } else { self.dictionary.as_data().get(code) }
	}

	pub fn is_null(&self, index: usize) -> bool {
		self.codes[index] == 0
	}

	pub fn set_null(&mut self, index: usize) -> Result<()> {
		if !self.nullable {
			return Err(Error::NullabilityViolated("<category column>".into()));
		}
		if index >= self.len() {
			return Err(Error::index_out_of_range(index, self.len()));
		}
		self.codes[index] = 0;
		Ok(())
	}

	pub fn set(&mut self, index: usize, value: &str) -> Result<()> {
		if index >= self.len() {
			return Err(Error::index_out_of_range(index, self.len()));
		}
		let code = self.dictionary.make_mut().intern(value);
		self.codes[index] = code;
		Ok(())
	}

	/// Shares the dictionary with the clone, materializing only the code
	/// buffer (spec §3: "category columns cloned with a subset operation
	/// share the dictionary").
	pub fn clone_subset(&self, indices: &[usize]) -> Result<Self> {
		let mut codes = Vec::with_capacity(indices.len());
		for &i in indices {
			if i >= self.len() {
				return Err(Error::index_out_of_range(i, self.len()));
			}
			codes.push(self.codes[i]);
		}
		Ok(Self { codes, dictionary: self.dictionary.share(), nullable: self.nullable })
	}
}

/// The tagged union of column kinds a `Frame` holds (spec §3, §4.1).
#[derive(Clone, Debug)]
pub enum Column {
	Int32(Int32Column),
	Int64(Int64Column),
	Float64(Float64Column),
	Bool(BoolColumn),
	Timestamp(TimestampColumn),
	String(StringColumn),
	Category(CategoryColumn),
}

impl Column {
	pub fn type_tag(&self) -> Type {
		match self {
			Column::Int32(_) => Type::Int32,
			Column::Int64(_) => Type::Int64,
			Column::Float64(_) => Type::Float64,
			Column::Bool(_) => Type::Bool,
			Column::Timestamp(_) => Type::Timestamp,
			Column::String(_) => Type::String,
			Column::Category(_) => Type::Category,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Column::Int32(c) => c.len(),
			Column::Int64(c) => c.len(),
			Column::Float64(c) => c.len(),
			Column::Bool(c) => c.len(),
			Column::Timestamp(c) => c.len(),
			Column::String(c) => c.len(),
			Column::Category(c) => c.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn is_null(&self, index: usize) -> bool {
		match self {
			Column::Int32(c) => c.is_null(index),
			Column::Int64(c) => c.is_null(index),
			Column::Float64(c) => c.is_null(index),
			Column::Bool(c) => c.is_null(index),
			Column::Timestamp(c) => c.is_null(index),
			Column::String(c) => c.is_null(index),
			Column::Category(c) => c.is_null(index),
		}
	}

	pub fn nullable(&self) -> bool {
		match self {
			Column::Int32(c) => c.nullable(),
			Column::Int64(_) => true,
			Column::Float64(c) => c.nullable(),
			Column::Bool(c) => c.nullable(),
			Column::Timestamp(c) => c.nullable(),
			Column::String(c) => c.nullable(),
			Column::Category(c) => c.nullable(),
		}
	}

	pub fn clone_subset(&self, indices: &[usize]) -> Result<Column> {
		Ok(match self {
			Column::Int32(c) => Column::Int32(c.clone_subset(indices)?),
			Column::Int64(c) => Column::Int64(c.clone_subset(indices)?),
			Column::Float64(c) => Column::Float64(c.clone_subset(indices)?),
			Column::Bool(c) => Column::Bool(c.clone_subset(indices)?),
			Column::Timestamp(c) => Column::Timestamp(c.clone_subset(indices)?),
			Column::String(c) => Column::String(c.clone_subset(indices)?),
			Column::Category(c) => Column::Category(c.clone_subset(indices)?),
		})
	}

	/// Materializes cell `index` as a scalar `Value`, used by the planner
	/// to reconstruct representative-row group keys (spec §4.4) and by
	/// row-at-a-time expression evaluation (spec §4.6).
	pub fn value_at(&self, index: usize) -> vecta_type::Value {
		use vecta_type::Value;
		match self {
			Column::Int32(c) => c.get(index).map(Value::Int32).unwrap_or(Value::Null),
			Column::Int64(c) => c.get(index).map(Value::Int64).unwrap_or(Value::Null),
			Column::Float64(c) => c.get(index).map(Value::Float64).unwrap_or(Value::Null),
			Column::Bool(c) => c.get(index).map(Value::Bool).unwrap_or(Value::Null),
			Column::Timestamp(c) => c.get(index).map(Value::Timestamp).unwrap_or(Value::Null),
			Column::String(c) => c.get(index).map(|s| Value::String(s.to_string())).unwrap_or(Value::Null),
			Column::Category(c) => c.get(index).map(|s| Value::String(s.to_string())).unwrap_or(Value::Null),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clone_subset_matches_source_per_spec_property() {
		let col = Int32Column::from_values([Some(10), None, Some(30), Some(40)], true).unwrap();
		let subset = col.clone_subset(&[3, 1, 0]).unwrap();
		assert_eq!(subset.get(0), col.get(3));
		assert_eq!(subset.get(1), col.get(1));
		assert_eq!(subset.get(2), col.get(0));
		assert_eq!(subset.is_null(1), col.is_null(1));
	}

	#[test]
	fn non_nullable_column_rejects_null() {
		let mut col = Int32Column::new(false);
		col.append(Some(1)).unwrap();
		assert!(col.append(None).is_err());
	}

	#[test]
	fn nan_is_not_null() {
		let mut col = Float64Column::new(true);
		col.append(Some(f64::NAN)).unwrap();
		col.append(None).unwrap();
		assert!(!col.is_null(0));
		assert!(col.get(0).unwrap().is_nan());
		assert!(col.is_null(1));
	}

	#[test]
	fn string_offsets_round_trip() {
		let col = StringColumn::from_values([Some("hello"), None, Some("")], true).unwrap();
		assert_eq!(col.get(0), Some("hello"));
		assert_eq!(col.get(1), None);
		assert_eq!(col.get(2), Some(""));
	}

	#[test]
	fn category_clone_subset_shares_dictionary() {
		let mut col = CategoryColumn::new(true);
		col.append(Some("IT")).unwrap();
		col.append(Some("HR")).unwrap();
		col.append(None).unwrap();

		let subset = col.clone_subset(&[1, 0, 2]).unwrap();
		assert_eq!(subset.get(0), Some("HR"));
		assert_eq!(subset.get(1), Some("IT"));
		assert_eq!(subset.get(2), None);
		assert!(subset.is_null(2));
	}

	#[test]
	fn slice_out_of_range_fails() {
		let mut col = Int32Column::from_values([Some(1), Some(2)], false).unwrap();
		assert!(col.slice(1, 5).is_err());
	}
}
