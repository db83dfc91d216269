// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Negation rules: double negation and the excluded middle.

use crate::rule::{impl_rule_via_incremental, LogicRule};
use crate::schematic::MatcherEquivRule;
use entail_core::{Deduction, Formula, FormulaContext, QualifiedName, Term, TowardResult};
use entail_match::Pattern;
use std::collections::BTreeSet;

/// `¬¬P ≡ P`, both directions, at any position.
pub fn double_negate() -> MatcherEquivRule {
    MatcherEquivRule::new(
        QualifiedName::logic("DoubleNegate"),
        "!!P <=> P",
        Pattern::not(Pattern::not(Pattern::any("P"))),
        |b| Some(b.formula("P")?.clone()),
        Pattern::any("P"),
        |b| Some(Formula::not(Formula::not(b.formula("P")?.clone()))),
    )
}

/// Closes a goal of the shape `P ∨ ¬P` with no dependencies.
pub struct ExcludeMiddle {
    pub(crate) name: QualifiedName,
    pub(crate) description: &'static str,
}

/// Goal-directed excluded middle.
pub fn exclude_middle() -> ExcludeMiddle {
    ExcludeMiddle {
        name: QualifiedName::logic("ExcludeMiddle"),
        description: "Close a goal of the shape P | !P",
    }
}

impl LogicRule for ExcludeMiddle {
    fn apply_incremental(
        &self,
        _ctx: &FormulaContext,
        _obtained: &BTreeSet<Formula>,
        _formulas: &[Formula],
        _terms: &[Term],
        goal: Option<&Formula>,
    ) -> TowardResult {
        let Some(goal) = goal else {
            return TowardResult::nothing();
        };
        let Formula::Or(children) = goal.flatten() else {
            return TowardResult::nothing();
        };
        if children.len() != 2 {
            return TowardResult::nothing();
        }

        let complementary = |a: &Formula, b: &Formula| {
            Formula::not(a.clone()).regular_form() == b.regular_form()
        };
        if complementary(&children[0], &children[1]) || complementary(&children[1], &children[0]) {
            TowardResult::Reached(Deduction::new(self.name.clone(), goal.clone(), Vec::new()))
        } else {
            TowardResult::nothing()
        }
    }
}

impl_rule_via_incremental!(ExcludeMiddle);
