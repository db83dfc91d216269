// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # entail-rules
//!
//! The built-in logic rules and the search meta-rule of ENTAIL.
//!
//! ## Rule catalog (17 rules, namespace `logic`)
//! - Structural: Flatten, IdentityAnd, IdentityOr, AbsorptionAnd,
//!   AbsorptionOr, AndProject, AndConstruct
//! - Negation: DoubleNegate, ExcludeMiddle
//! - Implication: ImplyCompose, DefImply, DefEquivTo, Imply (modus ponens)
//! - Equality: EqualReplace
//! - Quantifiers: ExistConstant, ForAnyVariable, ForAnyAnd
//!
//! [`AllLogicRule`] (`logic::Logic`) chains the whole catalog in a bounded
//! breadth-first search and reconstructs the deduction tree on success.

pub mod equality;
pub mod implication;
pub mod negation;
pub mod quantifier;
pub mod rule;
pub mod schematic;
pub mod search;
pub mod structural;

pub use rule::{logic_rules, rules_as_map, LogicRule, Rule};
pub use schematic::{MatcherEquivRule, MatcherRule, Replacer, RewriteScope};
pub use search::{AllLogicRule, SearchConfig};
