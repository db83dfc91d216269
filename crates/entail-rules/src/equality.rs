// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rewriting by equalities.

use crate::rule::{impl_rule_via_incremental, toward, LogicRule};
use entail_core::{Deduction, Formula, FormulaContext, QualifiedName, Term, TowardResult};
use std::collections::{BTreeMap, BTreeSet};

/// `x = y ∧ φ(x) ⇒ φ(y)`: replace the left term by the right one inside a
/// known fact.
pub struct EqualReplace {
    pub(crate) name: QualifiedName,
    pub(crate) description: &'static str,
}

/// Equality substitution.
pub fn equal_replace() -> EqualReplace {
    EqualReplace {
        name: QualifiedName::logic("EqualReplace"),
        description: "From x = y and phi(x), derive phi(y)",
    }
}

impl LogicRule for EqualReplace {
    fn apply_incremental(
        &self,
        ctx: &FormulaContext,
        obtained: &BTreeSet<Formula>,
        formulas: &[Formula],
        _terms: &[Term],
        goal: Option<&Formula>,
    ) -> TowardResult {
        // When the caller hints formulas, only those facts are rewritten.
        let restrict: Option<BTreeSet<Formula>> = if formulas.is_empty() {
            None
        } else {
            Some(formulas.iter().map(Formula::regular_form).collect())
        };

        // Known pairs: everything in the context plus the frontier, keyed by
        // regular form. A pair fires only when at least one side is new.
        let mut known: BTreeMap<Formula, Formula> = BTreeMap::new();
        for (regular, original) in ctx.entries() {
            known.insert(regular.clone(), original.clone());
        }
        for f in obtained {
            known.entry(f.clone()).or_insert_with(|| f.clone());
        }

        let mut deductions = Vec::new();
        for (eq_regular, eq_original) in &known {
            let Formula::Equal(x, y) = eq_regular else {
                continue;
            };
            for (fact_regular, fact_original) in &known {
                if fact_regular == eq_regular {
                    continue;
                }
                if !obtained.contains(eq_regular) && !obtained.contains(fact_regular) {
                    continue;
                }
                if let Some(wanted) = &restrict {
                    if !wanted.contains(fact_regular) {
                        continue;
                    }
                }

                let rewritten = fact_original.recur_map_term(&|t| {
                    if &t == x {
                        y.clone()
                    } else {
                        t
                    }
                });
                if &rewritten != fact_original {
                    deductions.push(Deduction::new(
                        self.name.clone(),
                        rewritten,
                        vec![eq_original.clone(), fact_original.clone()],
                    ));
                }
            }
        }

        toward(deductions, goal)
    }
}

impl_rule_via_incremental!(EqualReplace);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use entail_core::{Parser, SymbolTable};

    fn parse(symbols: &mut SymbolTable, input: &str) -> Formula {
        Parser::new(symbols).parse(input).unwrap()
    }

    #[test]
    fn test_rewrites_constant_everywhere() {
        let mut symbols = SymbolTable::new();
        let eq = parse(&mut symbols, "c = d");
        let fact = parse(&mut symbols, "P(c) & Q(f(c))");
        let expected = parse(&mut symbols, "P(d) & Q(f(d))");

        let ctx = FormulaContext::from_formulas([eq.clone(), fact.clone()]);
        let ds = equal_replace().apply(&ctx, &[], &[]);

        let hit = ds.iter().find(|d| d.produced == expected).expect("rewrite");
        assert_eq!(hit.dependencies, vec![eq, fact]);
    }

    #[test]
    fn test_direction_is_left_to_right() {
        let mut symbols = SymbolTable::new();
        let eq = parse(&mut symbols, "c = d");
        let fact = parse(&mut symbols, "P(d)");

        let ctx = FormulaContext::from_formulas([eq, fact]);
        let ds = equal_replace().apply(&ctx, &[], &[]);
        // No c occurs anywhere, so nothing rewrites.
        assert!(ds.is_empty());
    }

    #[test]
    fn test_formula_hint_restricts_targets() {
        let mut symbols = SymbolTable::new();
        let eq = parse(&mut symbols, "c = d");
        let p = parse(&mut symbols, "P(c)");
        let q = parse(&mut symbols, "Q(c)");

        let ctx = FormulaContext::from_formulas([eq, p.clone(), q]);
        let ds = equal_replace().apply(&ctx, std::slice::from_ref(&p), &[]);

        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].produced, parse(&mut symbols, "P(d)"));
    }
}
