// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the ENTAIL system.

use thiserror::Error;

/// Errors that can occur while building or manipulating formulas.
///
/// Rule non-applicability is never an error: an inapplicable rule yields an
/// empty result. The variants below cover parsing and programmer errors in
/// the builder/matcher layer.
#[derive(Error, Debug, Clone)]
pub enum LogicError {
    /// Error during parsing.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A symbol was referenced but never interned.
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// A replacer referenced a hole its pattern never bound.
    #[error("Missing binding: {0}")]
    MissingBinding(String),
}

/// Result type for logic operations.
pub type LogicResult<T> = Result<T, LogicError>;
