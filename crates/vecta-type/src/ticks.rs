// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::fmt::{Display, Formatter};

/// A `Timestamp` column stores ticks: signed counts of 100-nanosecond
/// intervals since the Unix epoch (1970-01-01T00:00:00Z). This pins the
/// epoch/resolution the original source left implementation-defined (see
/// SPEC_FULL.md §9).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ticks(pub i64);

impl Ticks {
	pub const PER_SECOND: i64 = 10_000_000;

	pub const fn from_unix_seconds(seconds: i64) -> Self {
		Ticks(seconds * Self::PER_SECOND)
	}

	pub const fn as_i64(self) -> i64 {
		self.0
	}
}

impl From<i64> for Ticks {
	fn from(value: i64) -> Self {
		Ticks(value)
	}
}

impl Display for Ticks {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}
