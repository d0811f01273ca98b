// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Order-by (spec §4.7): a stable, lexicographic multi-key sort over
//! reconstructed scalar values, with a radix-partition fast path permitted
//! for the single-key, all-`Int32`, descending case.

use std::cmp::Ordering;

use vecta_column::{Column, Int32Column};

/// One sort key: the column to compare by, and its direction.
#[derive(Clone, Copy)]
pub struct SortKey<'a> {
	pub column: &'a Column,
	pub ascending: bool,
}

impl<'a> SortKey<'a> {
	pub fn new(column: &'a Column, ascending: bool) -> Self {
		Self { column, ascending }
	}
}

/// Produces the row permutation that orders `row_count` rows by `keys`,
/// lexicographically, ties broken by the previous key's order (stable sort
/// over a stable input order). Nulls sort last regardless of direction
/// (spec §4.7).
#[tracing::instrument(level = "debug", skip(keys))]
pub fn sort_indices(keys: &[SortKey], row_count: usize) -> Vec<u32> {
	if let [key] = keys {
		if !key.ascending {
			if let Column::Int32(c) = key.column {
				return radix_sort_descending_int32(c);
			}
		}
	}

	let mut indices: Vec<u32> = (0..row_count as u32).collect();
	indices.sort_by(|&a, &b| compare_rows(keys, a as usize, b as usize));
	indices
}

fn compare_rows(keys: &[SortKey], a: usize, b: usize) -> Ordering {
	for key in keys {
		let va = key.column.value_at(a);
		let vb = key.column.value_at(b);
		let ascending_cmp = va.partial_cmp(&vb).unwrap_or(Ordering::Equal);
		let cmp = if key.ascending || va.is_null() || vb.is_null() { ascending_cmp } else { ascending_cmp.reverse() };
		if cmp != Ordering::Equal {
			return cmp;
		}
	}
	Ordering::Equal
}

/// LSD radix sort, descending, non-null values first then nulls (spec
/// §4.7's permitted fast path for "all-Int32 single-key descending"). Keys
/// are biased so the sign bit orders correctly as an unsigned integer.
fn radix_sort_descending_int32(column: &Int32Column) -> Vec<u32> {
	let n = column.len();
	let mut non_null: Vec<(u32, u32)> = Vec::with_capacity(n);
	let mut nulls: Vec<u32> = Vec::new();
	for row in 0..n {
		match column.get(row) {
			Some(v) => non_null.push((row as u32, (v as u32) ^ 0x8000_0000)),
			None => nulls.push(row as u32),
		}
	}

	let mut buf = vec![(0u32, 0u32); non_null.len()];
	for shift in [0u32, 8, 16, 24] {
		let mut counts = [0usize; 257];
		for &(_, key) in &non_null {
			counts[((key >> shift) & 0xFF) as usize + 1] += 1;
		}
		for i in 0..256 {
			counts[i + 1] += counts[i];
		}
		for &(row, key) in &non_null {
			let bucket = ((key >> shift) & 0xFF) as usize;
			buf[counts[bucket]] = (row, key);
			counts[bucket] += 1;
		}
		non_null.copy_from_slice(&buf);
	}

	let mut out: Vec<u32> = non_null.into_iter().rev().map(|(row, _)| row).collect();
	out.extend(nulls);
	out
}
