// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # entail-match
//!
//! Pattern matching and single-position rewriting over formulas.
//!
//! Schematic rules are pairs of a [`Pattern`] and a replacer. This crate
//! provides the two primitives they consume:
//! - [`matches`] - all ways a pattern binds against a subject, with
//!   AC-aware matching of AND/OR children
//! - [`rewrite_one`] - all formulas obtained by transforming exactly one
//!   subformula occurrence

pub mod pattern;
pub mod rewrite;

pub use pattern::{matches, Bindings, Pattern};
pub use rewrite::rewrite_one;
