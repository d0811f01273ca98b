// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Hash functions used by the three Swiss-table key shapes (spec §4.3):
//! a Murmur-style finalizer for single `Int32` keys, FNV-1a for strings,
//! and xxHash3 for the fixed-width row-packed multi-column key.

/// 32-bit Murmur3 finalizer (fmix32), used to hash a single `i32` group key
/// before splitting it into the table index and the 7-bit `h2` metadata tag.
pub fn murmur3_finalize32(mut h: u32) -> u32 {
	h ^= h >> 16;
	h = h.wrapping_mul(0x85eb_ca6b);
	h ^= h >> 13;
	h = h.wrapping_mul(0xc2b2_ae35);
	h ^= h >> 16;
	h
}

pub fn hash_i32(key: i32) -> u64 {
	murmur3_finalize32(key as u32) as u64
}

/// FNV-1a over raw bytes, used for string keys (spec §4.3.3). Processes
/// eight bytes per step with a scalar tail, the same chunked-loop shape the
/// arithmetic kernels use (§4.5) so the compiler can unroll it.
pub fn fnv1a(bytes: &[u8]) -> u64 {
	const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
	const PRIME: u64 = 0x0000_0100_0000_01b3;

	let mut hash = OFFSET_BASIS;
	let mut chunks = bytes.chunks_exact(8);
	for chunk in &mut chunks {
		for &byte in chunk {
			hash ^= byte as u64;
			hash = hash.wrapping_mul(PRIME);
		}
	}
	for &byte in chunks.remainder() {
		hash ^= byte as u64;
		hash = hash.wrapping_mul(PRIME);
	}
	hash
}

/// Hash for the fixed-width row-packed multi-column key (spec §4.3.5,
/// §9 "do not hash via per-element reflection"). xxHash3 is already part of
/// the workspace's dependency stack (it backs the object store's checksum
/// path elsewhere in the teacher codebase).
pub fn hash_row_bytes(bytes: &[u8]) -> u64 {
	xxhash_rust::xxh3::xxh3_64(bytes)
}

/// Splits a 64-bit hash into a table index (via the low bits, masked to
/// `capacity`, which must be a power of two) and the 7-bit Swiss-table
/// metadata tag (`h2`, in `[1, 127]`; `0` is reserved for the empty slot
/// sentinel).
pub fn split(hash: u64, capacity: usize) -> (usize, u8) {
	debug_assert!(capacity.is_power_of_two());
	let index = (hash as usize) & (capacity - 1);
	let h2 = (((hash >> 57) & 0x7f) as u8) + 1;
	(index, h2)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fnv1a_is_deterministic() {
		assert_eq!(fnv1a(b"hello"), fnv1a(b"hello"));
		assert_ne!(fnv1a(b"hello"), fnv1a(b"world"));
	}

	#[test]
	fn split_index_is_within_capacity() {
		for hash in [0u64, 1, 12345, u64::MAX] {
			let (index, h2) = split(hash, 64);
			assert!(index < 64);
			assert!(h2 >= 1);
		}
	}
}
