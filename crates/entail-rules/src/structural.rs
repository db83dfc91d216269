// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural rules over conjunction and disjunction: flattening,
//! idempotence, absorption, projection and goal-directed construction.

use crate::rule::{impl_rule_via_incremental, toward, LogicRule};
use crate::schematic::{MatcherRule, RewriteScope};
use entail_core::{Deduction, Formula, FormulaContext, QualifiedName, Term, TowardResult};
use entail_match::Pattern;
use std::collections::BTreeSet;

/// `Q ∧ P ∧ P ⇒ Q ∧ P`. Idempotence is an equivalence, so the rewrite may
/// fire at any position.
pub fn identity_and() -> MatcherRule {
    MatcherRule::new(
        QualifiedName::logic("IdentityAnd"),
        "Q & P & P => Q & P",
        Pattern::and(vec![
            Pattern::rest("Q"),
            Pattern::any("P"),
            Pattern::any("P"),
        ]),
        |b| {
            let mut children = b.rest("Q")?.to_vec();
            children.push(b.formula("P")?.clone());
            Some(Formula::and(children))
        },
        RewriteScope::Everywhere,
    )
}

/// `Q ∨ P ∨ P ⇒ Q ∨ P`.
pub fn identity_or() -> MatcherRule {
    MatcherRule::new(
        QualifiedName::logic("IdentityOr"),
        "Q | P | P => Q | P",
        Pattern::or(vec![
            Pattern::rest("Q"),
            Pattern::any("P"),
            Pattern::any("P"),
        ]),
        |b| {
            let mut children = b.rest("Q")?.to_vec();
            children.push(b.formula("P")?.clone());
            Some(Formula::or(children))
        },
        RewriteScope::Everywhere,
    )
}

/// `R ∧ P ∧ (P ∨ Q) ⇒ R ∧ P`.
pub fn absorption_and() -> MatcherRule {
    MatcherRule::new(
        QualifiedName::logic("AbsorptionAnd"),
        "R & P & (P | Q) => R & P",
        Pattern::and(vec![
            Pattern::rest("R"),
            Pattern::any("P"),
            Pattern::or(vec![Pattern::any("P"), Pattern::rest("Q")]),
        ]),
        |b| {
            let mut children = b.rest("R")?.to_vec();
            children.push(b.formula("P")?.clone());
            Some(Formula::and(children))
        },
        RewriteScope::Everywhere,
    )
}

/// `R ∨ P ∨ (P ∧ Q) ⇒ R ∨ P`.
pub fn absorption_or() -> MatcherRule {
    MatcherRule::new(
        QualifiedName::logic("AbsorptionOr"),
        "R | P | (P & Q) => R | P",
        Pattern::or(vec![
            Pattern::rest("R"),
            Pattern::any("P"),
            Pattern::and(vec![Pattern::any("P"), Pattern::rest("Q")]),
        ]),
        |b| {
            let mut children = b.rest("R")?.to_vec();
            children.push(b.formula("P")?.clone());
            Some(Formula::or(children))
        },
        RewriteScope::Everywhere,
    )
}

/// `Q ∧ P ⇒ P` for every conjunct. Projection weakens, so it fires at the
/// root only.
pub fn and_project() -> MatcherRule {
    MatcherRule::new(
        QualifiedName::logic("AndProject"),
        "Q & P => P",
        Pattern::and(vec![Pattern::rest("Q"), Pattern::any("P")]),
        |b| Some(b.formula("P")?.clone()),
        RewriteScope::Root,
    )
}

/// Emits the flattened form of a known formula when flattening changes it.
pub struct Flatten {
    pub(crate) name: QualifiedName,
    pub(crate) description: &'static str,
}

/// Collapse nested conjunctions and disjunctions.
pub fn flatten() -> Flatten {
    Flatten {
        name: QualifiedName::logic("Flatten"),
        description: "Collapse nested conjunctions and disjunctions",
    }
}

impl LogicRule for Flatten {
    fn apply_incremental(
        &self,
        ctx: &FormulaContext,
        obtained: &BTreeSet<Formula>,
        _formulas: &[Formula],
        _terms: &[Term],
        goal: Option<&Formula>,
    ) -> TowardResult {
        let mut deductions = Vec::new();
        for regular in obtained {
            // The stored original may be nested even though its key is flat.
            let subject = ctx
                .original_for(regular)
                .cloned()
                .unwrap_or_else(|| regular.clone());
            let flat = subject.flatten();
            if flat != subject {
                deductions.push(Deduction::new(self.name.clone(), flat, vec![subject]));
            }
        }
        toward(deductions, goal)
    }
}

impl_rule_via_incremental!(Flatten);

/// Closes an AND goal when every conjunct is already witnessed.
pub struct AndConstruct {
    pub(crate) name: QualifiedName,
    pub(crate) description: &'static str,
}

/// Goal-directed conjunction introduction.
pub fn and_construct() -> AndConstruct {
    AndConstruct {
        name: QualifiedName::logic("AndConstruct"),
        description: "Close an AND goal from witnesses for every conjunct",
    }
}

impl LogicRule for AndConstruct {
    fn apply_incremental(
        &self,
        ctx: &FormulaContext,
        obtained: &BTreeSet<Formula>,
        _formulas: &[Formula],
        _terms: &[Term],
        goal: Option<&Formula>,
    ) -> TowardResult {
        let Some(goal) = goal else {
            return TowardResult::nothing();
        };
        let Formula::And(children) = goal.flatten() else {
            return TowardResult::nothing();
        };

        // Witnesses may come from the persistent context or the frontier.
        let mut witnesses = Vec::new();
        for child in &children {
            let regular = child.regular_form();
            if let Some(original) = ctx.original_for(&regular) {
                witnesses.push(original.clone());
            } else if let Some(found) = obtained.get(&regular) {
                witnesses.push(found.clone());
            } else {
                return TowardResult::nothing();
            }
        }

        TowardResult::Reached(Deduction::new(self.name.clone(), goal.clone(), witnesses))
    }
}

impl_rule_via_incremental!(AndConstruct);
