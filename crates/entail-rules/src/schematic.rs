// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schematic rules: a matcher pattern paired with a replacer.
//!
//! Rules whose rewrite is a logical equivalence may fire at any subformula
//! position (congruence keeps that sound); directional rules fire at the
//! root of the subject only.

use crate::rule::{impl_rule_via_incremental, LogicRule};
use entail_core::{Deduction, Formula, FormulaContext, QualifiedName, Term, TowardResult};
use entail_match::{matches, rewrite_one, Bindings, Pattern};
use std::collections::BTreeSet;

/// Where a schematic rule is allowed to rewrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewriteScope {
    /// Any subformula position. Sound only for equivalences.
    Everywhere,
    /// The whole subject formula only.
    Root,
}

/// Builds the replacement from a match. Returns `None` when the bound
/// fragments cannot be assembled (which discards this match).
pub type Replacer = fn(&Bindings) -> Option<Formula>;

/// A unidirectional schematic rule: one pattern, one replacer.
pub struct MatcherRule {
    pub(crate) name: QualifiedName,
    pub(crate) description: &'static str,
    pattern: Pattern,
    build: Replacer,
    scope: RewriteScope,
}

impl MatcherRule {
    /// Create a schematic rule.
    pub fn new(
        name: QualifiedName,
        description: &'static str,
        pattern: Pattern,
        build: Replacer,
        scope: RewriteScope,
    ) -> Self {
        Self {
            name,
            description,
            pattern,
            build,
            scope,
        }
    }

    /// All rewrites of `f` this rule produces.
    pub fn apply_one(&self, f: &Formula) -> Vec<Formula> {
        apply_direction(&self.pattern, self.build, self.scope, f)
    }
}

impl LogicRule for MatcherRule {
    fn apply_incremental(
        &self,
        _ctx: &FormulaContext,
        obtained: &BTreeSet<Formula>,
        _formulas: &[Formula],
        _terms: &[Term],
        goal: Option<&Formula>,
    ) -> TowardResult {
        run_schematic(&self.name, obtained, goal, |f| self.apply_one(f))
    }
}

impl_rule_via_incremental!(MatcherRule);

/// An equivalence rule: two patterns with replacers in both directions.
pub struct MatcherEquivRule {
    pub(crate) name: QualifiedName,
    pub(crate) description: &'static str,
    forward_pattern: Pattern,
    forward: Replacer,
    backward_pattern: Pattern,
    backward: Replacer,
}

impl MatcherEquivRule {
    /// Create an equivalence rule from its two directions.
    pub fn new(
        name: QualifiedName,
        description: &'static str,
        forward_pattern: Pattern,
        forward: Replacer,
        backward_pattern: Pattern,
        backward: Replacer,
    ) -> Self {
        Self {
            name,
            description,
            forward_pattern,
            forward,
            backward_pattern,
            backward,
        }
    }

    /// All rewrites of `f`, both directions.
    pub fn apply_one(&self, f: &Formula) -> Vec<Formula> {
        let mut out = apply_direction(&self.forward_pattern, self.forward, RewriteScope::Everywhere, f);
        out.extend(apply_direction(
            &self.backward_pattern,
            self.backward,
            RewriteScope::Everywhere,
            f,
        ));
        out
    }
}

impl LogicRule for MatcherEquivRule {
    fn apply_incremental(
        &self,
        _ctx: &FormulaContext,
        obtained: &BTreeSet<Formula>,
        _formulas: &[Formula],
        _terms: &[Term],
        goal: Option<&Formula>,
    ) -> TowardResult {
        run_schematic(&self.name, obtained, goal, |f| self.apply_one(f))
    }
}

impl_rule_via_incremental!(MatcherEquivRule);

fn apply_direction(
    pattern: &Pattern,
    build: Replacer,
    scope: RewriteScope,
    f: &Formula,
) -> Vec<Formula> {
    let mut rewrite = |sub: &Formula| -> Vec<Formula> {
        matches(pattern, sub)
            .iter()
            .filter_map(|b| build(b))
            .collect()
    };
    match scope {
        RewriteScope::Everywhere => rewrite_one(f, &mut rewrite),
        RewriteScope::Root => rewrite(f),
    }
}

/// Emit one deduction per subject/rewrite pair, closing the goal as soon as
/// a rewrite produces it.
fn run_schematic(
    name: &QualifiedName,
    obtained: &BTreeSet<Formula>,
    goal: Option<&Formula>,
    mut apply_one: impl FnMut(&Formula) -> Vec<Formula>,
) -> TowardResult {
    let goal_regular = goal.map(Formula::regular_form);
    let mut deductions = Vec::new();

    for subject in obtained {
        for produced in apply_one(subject) {
            let d = Deduction::new(name.clone(), produced, vec![subject.clone()]);
            if goal_regular.as_ref() == Some(&d.produced.regular_form()) {
                return TowardResult::Reached(d);
            }
            deductions.push(d);
        }
    }

    TowardResult::NotReached(deductions)
}
