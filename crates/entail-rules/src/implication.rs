// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Implication rules: modus ponens, composition and the defining
//! equivalences of `->` and `<->`.

use crate::rule::{impl_rule_via_incremental, toward, LogicRule};
use crate::schematic::{MatcherEquivRule, MatcherRule, RewriteScope};
use entail_core::{Deduction, Formula, FormulaContext, QualifiedName, Term, TowardResult};
use entail_match::Pattern;
use std::collections::BTreeSet;

/// `(P→Q) ∧ (Q→R) ⇒ P→R`. Directional: root only.
pub fn imply_compose() -> MatcherRule {
    MatcherRule::new(
        QualifiedName::logic("ImplyCompose"),
        "(P -> Q) & (Q -> R) => P -> R",
        Pattern::and(vec![
            Pattern::imply(Pattern::any("P"), Pattern::any("Q")),
            Pattern::imply(Pattern::any("Q"), Pattern::any("R")),
        ]),
        |b| {
            Some(Formula::imply(
                b.formula("P")?.clone(),
                b.formula("R")?.clone(),
            ))
        },
        RewriteScope::Root,
    )
}

/// `P→Q ≡ ¬P ∨ Q`.
pub fn def_imply() -> MatcherEquivRule {
    MatcherEquivRule::new(
        QualifiedName::logic("DefImply"),
        "P -> Q <=> !P | Q",
        Pattern::imply(Pattern::any("P"), Pattern::any("Q")),
        |b| {
            Some(Formula::or(vec![
                Formula::not(b.formula("P")?.clone()),
                b.formula("Q")?.clone(),
            ]))
        },
        Pattern::or(vec![
            Pattern::not(Pattern::any("P")),
            Pattern::rest("Q"),
        ]),
        |b| {
            let rest = b.rest("Q")?;
            if rest.is_empty() {
                return None;
            }
            Some(Formula::imply(
                b.formula("P")?.clone(),
                Formula::or(rest.to_vec()),
            ))
        },
    )
}

/// `(P→Q) ∧ (Q→P) ≡ P↔Q`.
pub fn def_equiv() -> MatcherEquivRule {
    MatcherEquivRule::new(
        QualifiedName::logic("DefEquivTo"),
        "(P -> Q) & (Q -> P) <=> (P <-> Q)",
        Pattern::and(vec![
            Pattern::imply(Pattern::any("P"), Pattern::any("Q")),
            Pattern::imply(Pattern::any("Q"), Pattern::any("P")),
        ]),
        |b| {
            Some(Formula::equiv(
                b.formula("P")?.clone(),
                b.formula("Q")?.clone(),
            ))
        },
        Pattern::equiv(Pattern::any("P"), Pattern::any("Q")),
        |b| {
            let p = b.formula("P")?.clone();
            let q = b.formula("Q")?.clone();
            Some(Formula::and(vec![
                Formula::imply(p.clone(), q.clone()),
                Formula::imply(q, p),
            ]))
        },
    )
}

/// Modus ponens across the frontier.
pub struct Imply {
    pub(crate) name: QualifiedName,
    pub(crate) description: &'static str,
}

/// From `P→Q` and a fact whose regular form equals `P`'s, derive `Q`.
pub fn imply() -> Imply {
    Imply {
        name: QualifiedName::logic("Imply"),
        description: "From P -> Q and P, derive Q",
    }
}

impl LogicRule for Imply {
    fn apply_incremental(
        &self,
        ctx: &FormulaContext,
        obtained: &BTreeSet<Formula>,
        _formulas: &[Formula],
        _terms: &[Term],
        goal: Option<&Formula>,
    ) -> TowardResult {
        let mut deductions = Vec::new();

        // New implications against known facts (context or frontier).
        for f in obtained {
            if let Formula::Imply(p, q) = f {
                let antecedent_regular = p.regular_form();
                let antecedent = ctx
                    .original_for(&antecedent_regular)
                    .or_else(|| obtained.get(&antecedent_regular));
                if let Some(antecedent) = antecedent {
                    deductions.push(Deduction::new(
                        self.name.clone(),
                        (**q).clone(),
                        vec![f.clone(), antecedent.clone()],
                    ));
                }
            }
        }

        // New facts against implications already in the context.
        for (regular, _) in ctx.entries() {
            if obtained.contains(regular) {
                continue; // handled above
            }
            if let Formula::Imply(p, q) = regular {
                let antecedent_regular = p.regular_form();
                if let Some(fact) = obtained.get(&antecedent_regular) {
                    deductions.push(Deduction::new(
                        self.name.clone(),
                        (**q).clone(),
                        vec![regular.clone(), fact.clone()],
                    ));
                }
            }
        }

        toward(deductions, goal)
    }
}

impl_rule_via_incremental!(Imply);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use entail_core::{Parser, SymbolTable};

    fn parse(symbols: &mut SymbolTable, input: &str) -> Formula {
        Parser::new(symbols).parse(input).unwrap()
    }

    #[test]
    fn test_modus_ponens_reaches_goal() {
        let mut symbols = SymbolTable::new();
        let p = parse(&mut symbols, "P");
        let imp = parse(&mut symbols, "P -> Q");
        let q = parse(&mut symbols, "Q");

        let ctx = FormulaContext::from_formulas([p.clone(), imp.clone()]);
        match imply().apply_toward(&ctx, &[], &[], &q) {
            TowardResult::Reached(d) => {
                assert_eq!(d.produced, q);
                assert_eq!(d.dependencies, vec![imp, p]);
            }
            other => panic!("expected Reached, got {other:?}"),
        }
    }

    #[test]
    fn test_modus_ponens_matches_antecedent_up_to_regular_form() {
        let mut symbols = SymbolTable::new();
        let fact = parse(&mut symbols, "Q & P");
        let imp = parse(&mut symbols, "(P & Q) -> R");

        let ctx = FormulaContext::from_formulas([fact, imp]);
        let ds = imply().apply(&ctx, &[], &[]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].produced, parse(&mut symbols, "R"));
    }

    #[test]
    fn test_modus_ponens_fires_for_new_antecedent() {
        let mut symbols = SymbolTable::new();
        let imp = parse(&mut symbols, "P -> Q");
        let p = parse(&mut symbols, "P");

        // The implication is old context; only P is in the frontier.
        let ctx = FormulaContext::from_formulas([imp.clone()]);
        let obtained: BTreeSet<Formula> = [p.regular_form()].into();
        match imply().apply_incremental(&ctx, &obtained, &[], &[], None) {
            TowardResult::NotReached(ds) => {
                assert_eq!(ds.len(), 1);
                assert_eq!(ds[0].produced, parse(&mut symbols, "Q"));
            }
            other => panic!("expected NotReached, got {other:?}"),
        }
    }

    #[test]
    fn test_imply_compose() {
        let mut symbols = SymbolTable::new();
        let f = parse(&mut symbols, "(P -> Q) & (Q -> R)");
        let expected = parse(&mut symbols, "P -> R");

        assert!(imply_compose().apply_one(&f).contains(&expected));

        // The shared middle formula must agree.
        let g = parse(&mut symbols, "(P -> Q) & (S -> R)");
        assert!(imply_compose().apply_one(&g).is_empty());
    }

    #[test]
    fn test_def_imply_directions() {
        let mut symbols = SymbolTable::new();
        let imp = parse(&mut symbols, "P -> Q");
        let or = parse(&mut symbols, "!P | Q");

        assert!(def_imply().apply_one(&imp).contains(&or));
        assert!(def_imply().apply_one(&or).contains(&imp));
    }

    #[test]
    fn test_def_equiv_directions() {
        let mut symbols = SymbolTable::new();
        let conj = parse(&mut symbols, "(P -> Q) & (Q -> P)");
        let equiv = parse(&mut symbols, "P <-> Q");

        let from_conj = def_equiv().apply_one(&conj);
        assert!(from_conj.contains(&equiv) || from_conj.contains(&parse(&mut symbols, "Q <-> P")));
        assert!(def_equiv().apply_one(&equiv).contains(&conj));
    }
}
