// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quantifier rules: existential generalization of constants, universal
//! introduction over free variables, and distribution of the universal
//! quantifier over conjunction.

use crate::rule::{impl_rule_via_incremental, toward, LogicRule};
use crate::schematic::MatcherEquivRule;
use entail_core::{
    Deduction, Formula, FormulaContext, FreshVars, MetaValue, QualifiedName, Symbol, Term,
    TowardResult, Variable,
};
use entail_match::Pattern;
use std::collections::BTreeSet;

/// From a fact mentioning constant `c`, derive `∃x. fact[c := x]` with `x`
/// fresh. Metadata key `"constant"` records the generalized constant.
pub struct ExistConstant {
    pub(crate) name: QualifiedName,
    pub(crate) description: &'static str,
}

/// Existential generalization.
pub fn exist_constant() -> ExistConstant {
    ExistConstant {
        name: QualifiedName::logic("ExistConstant"),
        description: "From phi(c), derive exists x. phi(x)",
    }
}

impl LogicRule for ExistConstant {
    fn apply_incremental(
        &self,
        _ctx: &FormulaContext,
        obtained: &BTreeSet<Formula>,
        _formulas: &[Formula],
        terms: &[Term],
        goal: Option<&Formula>,
    ) -> TowardResult {
        // Constant hints restrict which constants are generalized.
        let hinted: Option<BTreeSet<Symbol>> = if terms.is_empty() {
            None
        } else {
            Some(
                terms
                    .iter()
                    .filter_map(|t| match t {
                        Term::Const(c) => Some(*c),
                        _ => None,
                    })
                    .collect(),
            )
        };

        let mut deductions = Vec::new();
        for fact in obtained {
            let mut seen = BTreeSet::new();
            for constant in fact.all_constants() {
                if !seen.insert(constant) {
                    continue;
                }
                if let Some(wanted) = &hinted {
                    if !wanted.contains(&constant) {
                        continue;
                    }
                }

                let x = fact.next_var();
                let body = fact.recur_map_term(&|t| match t {
                    Term::Const(c) if c == constant => Term::Var(x),
                    other => other,
                });
                deductions.push(
                    Deduction::new(
                        self.name.clone(),
                        Formula::exists(x, body),
                        vec![fact.clone()],
                    )
                    .with_metadata("constant", MetaValue::Term(Term::Const(constant))),
                );
            }
        }

        toward(deductions, goal)
    }
}

impl_rule_via_incremental!(ExistConstant);

/// From a fact with free variable `x`, derive `∀x. fact`. Metadata key
/// `"variable"` records the generalized variable.
pub struct ForAnyVariable {
    pub(crate) name: QualifiedName,
    pub(crate) description: &'static str,
}

/// Universal introduction over a free variable.
pub fn for_any_variable() -> ForAnyVariable {
    ForAnyVariable {
        name: QualifiedName::logic("ForAnyVariable"),
        description: "From phi(x) with x free, derive forall x. phi(x)",
    }
}

impl LogicRule for ForAnyVariable {
    fn apply_incremental(
        &self,
        _ctx: &FormulaContext,
        obtained: &BTreeSet<Formula>,
        _formulas: &[Formula],
        terms: &[Term],
        goal: Option<&Formula>,
    ) -> TowardResult {
        // Variable hints intersect with the fact's free variables.
        let hinted: Option<BTreeSet<Variable>> = if terms.is_empty() {
            None
        } else {
            Some(
                terms
                    .iter()
                    .filter_map(|t| match t {
                        Term::Var(v) => Some(*v),
                        _ => None,
                    })
                    .collect(),
            )
        };

        let mut deductions = Vec::new();
        for fact in obtained {
            for v in fact.variables() {
                if let Some(wanted) = &hinted {
                    if !wanted.contains(&v) {
                        continue;
                    }
                }
                deductions.push(
                    Deduction::new(
                        self.name.clone(),
                        Formula::forall(v, fact.clone()),
                        vec![fact.clone()],
                    )
                    .with_metadata("variable", MetaValue::Term(Term::Var(v))),
                );
            }
        }

        toward(deductions, goal)
    }
}

impl_rule_via_incremental!(ForAnyVariable);

/// `(∀x. φ(x)) ∧ (∀y. ψ(y)) ≡ ∀z. (φ(z) ∧ ψ(z))`.
///
/// The merged direction quantifies over a variable fresh for both bodies,
/// so no free occurrence can be captured.
pub fn for_any_and() -> MatcherEquivRule {
    MatcherEquivRule::new(
        QualifiedName::logic("ForAnyAnd"),
        "(forall x. phi) & (forall y. psi) <=> forall z. phi[z] & psi[z]",
        Pattern::and(vec![
            Pattern::forall("x", Pattern::any("phi")),
            Pattern::forall("y", Pattern::any("psi")),
        ]),
        |b| {
            let phi = b.formula("phi")?;
            let psi = b.formula("psi")?;
            let x = b.var("x")?;
            let y = b.var("y")?;

            let mut supply = FreshVars::above_all([phi, psi]);
            let z = supply.fresh();
            let phi_z = phi.replace_var(&|v| (*v == x).then(|| Term::Var(z)));
            let psi_z = psi.replace_var(&|v| (*v == y).then(|| Term::Var(z)));
            Some(Formula::forall(z, Formula::And(vec![phi_z, psi_z])))
        },
        Pattern::forall("z", Pattern::and(vec![Pattern::any("phi"), Pattern::rest("psi")])),
        |b| {
            let z = b.var("z")?;
            let phi = b.formula("phi")?.clone();
            let rest = b.rest("psi")?;
            if rest.is_empty() {
                return None;
            }
            Some(Formula::And(vec![
                Formula::forall(z, phi),
                Formula::forall(z, Formula::and(rest.to_vec())),
            ]))
        },
    )
}
