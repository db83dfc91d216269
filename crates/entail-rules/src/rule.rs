// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rule traits and the ordered rule catalog.

use entail_core::{Deduction, Formula, FormulaContext, QualifiedName, Term, TowardResult};
use std::collections::{BTreeMap, BTreeSet};

/// A derivation rule.
///
/// `formulas` and `terms` are optional user hints: when non-empty they bias
/// or restrict the rule's choices (for example which constant to
/// generalize). Rules never fail: an inapplicable rule returns an empty
/// result.
pub trait Rule {
    /// Namespaced rule name.
    fn name(&self) -> QualifiedName;

    /// One-line description.
    fn description(&self) -> &'static str;

    /// Forward single step: derive everything this rule can derive from the
    /// whole context, ignoring any goal.
    fn apply(&self, ctx: &FormulaContext, formulas: &[Formula], terms: &[Term]) -> Vec<Deduction>;

    /// Goal-directed variant; may short-circuit with `Reached`.
    fn apply_toward(
        &self,
        ctx: &FormulaContext,
        formulas: &[Formula],
        terms: &[Term],
        goal: &Formula,
    ) -> TowardResult;
}

/// A rule that can work incrementally against a search frontier.
///
/// `obtained` is the sorted set of regular forms derived by the previous
/// search step; an incremental application only considers derivations that
/// involve the frontier. The non-incremental entry points pass the full set
/// of known regular forms, so both paths share one implementation.
pub trait LogicRule: Rule {
    /// Apply against the frontier. `goal` is `None` on the pure forward
    /// path; goal-only rules derive nothing in that case.
    fn apply_incremental(
        &self,
        ctx: &FormulaContext,
        obtained: &BTreeSet<Formula>,
        formulas: &[Formula],
        terms: &[Term],
        goal: Option<&Formula>,
    ) -> TowardResult;
}

/// Implement [`Rule`] for a type whose [`LogicRule::apply_incremental`]
/// carries the whole behavior. Expects `name` and `description` fields.
macro_rules! impl_rule_via_incremental {
    ($ty:ty) => {
        impl $crate::rule::Rule for $ty {
            fn name(&self) -> entail_core::QualifiedName {
                self.name.clone()
            }

            fn description(&self) -> &'static str {
                self.description
            }

            fn apply(
                &self,
                ctx: &entail_core::FormulaContext,
                formulas: &[entail_core::Formula],
                terms: &[entail_core::Term],
            ) -> Vec<entail_core::Deduction> {
                match $crate::rule::LogicRule::apply_incremental(
                    self,
                    ctx,
                    &ctx.regular_forms(),
                    formulas,
                    terms,
                    None,
                ) {
                    entail_core::TowardResult::Reached(d) => vec![d],
                    entail_core::TowardResult::NotReached(ds) => ds,
                }
            }

            fn apply_toward(
                &self,
                ctx: &entail_core::FormulaContext,
                formulas: &[entail_core::Formula],
                terms: &[entail_core::Term],
                goal: &entail_core::Formula,
            ) -> entail_core::TowardResult {
                $crate::rule::LogicRule::apply_incremental(
                    self,
                    ctx,
                    &ctx.regular_forms(),
                    formulas,
                    terms,
                    Some(goal),
                )
            }
        }
    };
}

pub(crate) use impl_rule_via_incremental;

/// Wrap forward deductions into a [`TowardResult`], closing the goal when
/// one of them produces it (compared by regular form).
pub(crate) fn toward(deductions: Vec<Deduction>, goal: Option<&Formula>) -> TowardResult {
    if let Some(goal) = goal {
        let goal_regular = goal.regular_form();
        for d in &deductions {
            if d.produced.regular_form() == goal_regular {
                return TowardResult::Reached(d.clone());
            }
        }
    }
    TowardResult::NotReached(deductions)
}

/// The built-in logic rules, in catalog order.
pub fn logic_rules() -> Vec<Box<dyn LogicRule>> {
    vec![
        Box::new(crate::structural::flatten()),
        Box::new(crate::negation::double_negate()),
        Box::new(crate::structural::identity_and()),
        Box::new(crate::structural::identity_or()),
        Box::new(crate::structural::absorption_and()),
        Box::new(crate::structural::absorption_or()),
        Box::new(crate::structural::and_project()),
        Box::new(crate::structural::and_construct()),
        Box::new(crate::implication::imply_compose()),
        Box::new(crate::implication::def_imply()),
        Box::new(crate::implication::def_equiv()),
        Box::new(crate::implication::imply()),
        Box::new(crate::equality::equal_replace()),
        Box::new(crate::negation::exclude_middle()),
        Box::new(crate::quantifier::exist_constant()),
        Box::new(crate::quantifier::for_any_variable()),
        Box::new(crate::quantifier::for_any_and()),
    ]
}

/// Every rule, the search meta-rule included, keyed by qualified name.
pub fn rules_as_map() -> BTreeMap<QualifiedName, Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = vec![
        Box::new(crate::structural::flatten()),
        Box::new(crate::negation::double_negate()),
        Box::new(crate::structural::identity_and()),
        Box::new(crate::structural::identity_or()),
        Box::new(crate::structural::absorption_and()),
        Box::new(crate::structural::absorption_or()),
        Box::new(crate::structural::and_project()),
        Box::new(crate::structural::and_construct()),
        Box::new(crate::implication::imply_compose()),
        Box::new(crate::implication::def_imply()),
        Box::new(crate::implication::def_equiv()),
        Box::new(crate::implication::imply()),
        Box::new(crate::equality::equal_replace()),
        Box::new(crate::negation::exclude_middle()),
        Box::new(crate::quantifier::exist_constant()),
        Box::new(crate::quantifier::for_any_variable()),
        Box::new(crate::quantifier::for_any_and()),
    ];
    rules.push(Box::new(crate::search::AllLogicRule::new()));
    rules.into_iter().map(|r| (r.name(), r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_names() {
        let names: Vec<String> = logic_rules().iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names.first().map(String::as_str), Some("logic::Flatten"));
        assert_eq!(names.last().map(String::as_str), Some("logic::ForAnyAnd"));
        assert!(names.contains(&"logic::Imply".to_string()));
        assert_eq!(names.len(), 17);
    }

    #[test]
    fn test_rules_as_map_includes_meta_rule() {
        let map = rules_as_map();
        assert_eq!(map.len(), 18);
        assert!(map.contains_key(&QualifiedName::logic("Logic")));
        assert!(map.contains_key(&QualifiedName::logic("DoubleNegate")));
    }
}
