// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Integration tests for the category pre-pass (spec §4.3.4): rewrites a
//! bounded-cardinality string column into `Int32` dictionary codes before
//! handing off to the integer dispatch path, falling back once
//! `cat_cardinality_cap` is exceeded.

use vecta_column::StringColumn;
use vecta_core::EngineConfig;
use vecta_engine::group_by::category;

#[test]
fn code_zero_is_reserved_for_null() {
	let column = StringColumn::from_values([Some("IT"), None, Some("HR")], true).unwrap();
	let config = EngineConfig::default();
	let build = category::try_prepass(&column, &config).unwrap();
	assert_eq!(build.codes[1], 0);
	assert!(build.codes[0] != 0 && build.codes[2] != 0);
}

#[test]
fn cardinality_exactly_at_cap_still_succeeds() {
	let values: Vec<Option<&str>> = vec![Some("a"), Some("b"), Some("c")];
	let column = StringColumn::from_values(values, false).unwrap();
	let config = EngineConfig { cat_cardinality_cap: 3, ..EngineConfig::default() };
	assert!(category::try_prepass(&column, &config).is_some());
}

#[test]
fn parallel_chunked_build_assigns_consistent_global_codes() {
	// Above parallel_threshold, the pre-pass splits into per-chunk local
	// dictionaries and remaps them into one global dictionary — repeated
	// values that straddle a chunk boundary must still share a code.
	let values: Vec<Option<&str>> = (0..500).map(|i| Some(if i % 3 == 0 { "x" } else { "y" })).collect();
	let column = StringColumn::from_values(values, false).unwrap();
	let config = EngineConfig { parallel_threshold: 100, ..EngineConfig::default() };
	let build = category::try_prepass(&column, &config).unwrap();
	let code_x = build.codes[0];
	let code_y = build.codes[1];
	assert_ne!(code_x, code_y);
	for i in 0..column.len() {
		let expected = if i % 3 == 0 { code_x } else { code_y };
		assert_eq!(build.codes[i], expected);
	}
}
