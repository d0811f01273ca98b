// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Scalar type tags and literal values shared by every crate in the
//! columnar engine. Nothing here owns a column buffer — see `vecta-column`
//! for that.

mod ordered_float;
mod ticks;
mod ty;
mod value;

pub use ordered_float::OrderedF64;
pub use ticks::Ticks;
pub use ty::Type;
pub use value::Value;
