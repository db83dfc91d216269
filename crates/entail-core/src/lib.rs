// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # entail-core
//!
//! Core types for the ENTAIL proof assistant.
//!
//! This crate provides:
//! - [`Term`] and [`Formula`] - immutable first-order syntax trees
//! - [`Formula::regular_form`] - the canonical representative used as a
//!   deduplication key throughout the system
//! - [`FormulaContext`] - the ordered container of known formulas
//! - [`Deduction`], [`DeductionNode`], [`TowardResult`] - derivation records
//! - [`SymbolTable`] - interned names
//! - Parsing and pretty-printing of the surface syntax
//!
//! ## Example
//!
//! ```rust
//! use entail_core::{parse::Parser, SymbolTable};
//!
//! let mut symbols = SymbolTable::new();
//! let mut parser = Parser::new(&mut symbols);
//!
//! let a = parser.parse("P & Q").unwrap();
//! let b = parser.parse("Q & P").unwrap();
//!
//! // Equivalent modulo commutativity: same regular form.
//! assert_eq!(a.regular_form(), b.regular_form());
//! ```

pub mod context;
pub mod deduction;
pub mod error;
pub mod formula;
pub mod parse;
pub mod pretty;
pub mod regular;
pub mod symbol;
pub mod term;

pub use context::FormulaContext;
pub use deduction::{Deduction, DeductionNode, MetaValue, Metadata, QualifiedName, TowardResult};
pub use error::{LogicError, LogicResult};
pub use formula::{Formula, FreshVars};
pub use parse::Parser;
pub use symbol::{SerializableSymbol, Symbol, SymbolTable};
pub use term::{Term, Variable};
