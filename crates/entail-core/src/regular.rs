// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Regular form: the canonical representative of a formula.
//!
//! Two formulas have identical regular forms exactly when they are equal
//! modulo AND/OR associativity, AND/OR child order, duplicate
//! conjuncts/disjuncts, and bound-variable renaming. The regular form is
//! the deduplication key for the whole search layer.

use crate::{Formula, Term, Variable};
use std::collections::BTreeMap;

impl Formula {
    /// The canonical representative of this formula's equivalence class.
    ///
    /// Pure and deterministic: equal inputs give identical outputs, and the
    /// result is its own regular form.
    ///
    /// The canonicalization runs in two phases:
    ///
    /// 1. every bound variable is renamed to `Fresh(base + d)`, where `d` is
    ///    the quantifier nesting depth of its binder and `base` lies above
    ///    every fresh index among the *free* variables. Depth numbering does
    ///    not depend on sibling order, and `base` only on free variables, so
    ///    the renaming is the same for all α-variants and can never capture;
    /// 2. bottom-up, nested AND/OR are flattened, children sorted by the
    ///    total order, duplicates removed, and single-child AND/OR unwrapped.
    pub fn regular_form(&self) -> Formula {
        let base = self
            .variables()
            .iter()
            .filter_map(Variable::fresh_index)
            .max()
            .map_or(0, |m| m + 1);
        let renamed = rename_bound(self, base, 0, &mut BTreeMap::new());
        order(&renamed)
    }
}

fn rename_term(t: &Term, env: &BTreeMap<Variable, Variable>) -> Term {
    t.map(&|t| match &t {
        Term::Var(v) => match env.get(v) {
            Some(nv) => Term::Var(*nv),
            None => t,
        },
        _ => t,
    })
}

fn rename_bound(
    f: &Formula,
    base: u32,
    depth: u32,
    env: &mut BTreeMap<Variable, Variable>,
) -> Formula {
    match f {
        Formula::Predicate(p, args) => {
            Formula::Predicate(*p, args.iter().map(|a| rename_term(a, env)).collect())
        }
        Formula::Named(n, args) => {
            Formula::Named(*n, args.iter().map(|a| rename_term(a, env)).collect())
        }
        Formula::Equal(lhs, rhs) => Formula::Equal(rename_term(lhs, env), rename_term(rhs, env)),
        Formula::Not(p) => Formula::not(rename_bound(p, base, depth, env)),
        Formula::And(cs) => Formula::And(
            cs.iter()
                .map(|c| rename_bound(c, base, depth, env))
                .collect(),
        ),
        Formula::Or(cs) => Formula::Or(
            cs.iter()
                .map(|c| rename_bound(c, base, depth, env))
                .collect(),
        ),
        Formula::Imply(p, q) => Formula::imply(
            rename_bound(p, base, depth, env),
            rename_bound(q, base, depth, env),
        ),
        Formula::Equiv(p, q) => Formula::equiv(
            rename_bound(p, base, depth, env),
            rename_bound(q, base, depth, env),
        ),
        Formula::ForAll(v, body) => {
            let nv = Variable::Fresh(base + depth);
            let shadowed = env.insert(*v, nv);
            let body = rename_bound(body, base, depth + 1, env);
            restore(env, *v, shadowed);
            Formula::forall(nv, body)
        }
        Formula::Exists(v, body) => {
            let nv = Variable::Fresh(base + depth);
            let shadowed = env.insert(*v, nv);
            let body = rename_bound(body, base, depth + 1, env);
            restore(env, *v, shadowed);
            Formula::exists(nv, body)
        }
    }
}

fn restore(env: &mut BTreeMap<Variable, Variable>, v: Variable, old: Option<Variable>) {
    match old {
        Some(prev) => {
            env.insert(v, prev);
        }
        None => {
            env.remove(&v);
        }
    }
}

fn order(f: &Formula) -> Formula {
    match f {
        Formula::Predicate(..) | Formula::Named(..) | Formula::Equal(..) => f.clone(),
        Formula::Not(p) => Formula::not(order(p)),
        Formula::And(cs) => {
            let mut out = Vec::new();
            for c in cs {
                match order(c) {
                    Formula::And(inner) => out.extend(inner),
                    other => out.push(other),
                }
            }
            out.sort();
            out.dedup();
            Formula::and(out)
        }
        Formula::Or(cs) => {
            let mut out = Vec::new();
            for c in cs {
                match order(c) {
                    Formula::Or(inner) => out.extend(inner),
                    other => out.push(other),
                }
            }
            out.sort();
            out.dedup();
            Formula::or(out)
        }
        Formula::Imply(p, q) => Formula::imply(order(p), order(q)),
        Formula::Equiv(p, q) => Formula::equiv(order(p), order(q)),
        Formula::ForAll(v, body) => Formula::forall(*v, order(body)),
        Formula::Exists(v, body) => Formula::exists(*v, order(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FreshVars, SymbolTable};
    use proptest::prelude::*;

    #[test]
    fn test_commutativity_and_associativity() {
        let mut symbols = SymbolTable::new();
        let p = Formula::prop(symbols.intern("P"));
        let q = Formula::prop(symbols.intern("Q"));
        let r = Formula::prop(symbols.intern("R"));

        let a = Formula::And(vec![
            Formula::And(vec![p.clone(), q.clone()]),
            r.clone(),
        ]);
        let b = Formula::And(vec![
            r.clone(),
            Formula::And(vec![q.clone(), p.clone()]),
        ]);

        assert_eq!(a.regular_form(), b.regular_form());

        // AND and OR do not collapse into each other.
        let c = Formula::Or(vec![p.clone(), q.clone()]);
        let d = Formula::And(vec![p, q]);
        assert_ne!(c.regular_form(), d.regular_form());
    }

    #[test]
    fn test_duplicate_removal() {
        let mut symbols = SymbolTable::new();
        let p = Formula::prop(symbols.intern("P"));
        let q = Formula::prop(symbols.intern("Q"));

        let dup = Formula::And(vec![q.clone(), p.clone(), p.clone()]);
        let plain = Formula::And(vec![q, p.clone()]);
        assert_eq!(dup.regular_form(), plain.regular_form());

        // A fully collapsed conjunction unwraps to its single child.
        let twice = Formula::And(vec![p.clone(), p.clone()]);
        assert_eq!(twice.regular_form(), p.regular_form());
    }

    #[test]
    fn test_alpha_renaming() {
        let mut symbols = SymbolTable::new();
        let pr = symbols.intern("P");
        let x = Variable::Named(symbols.intern("x"));
        let y = Variable::Named(symbols.intern("y"));

        let a = Formula::forall(x, Formula::pred(pr, vec![Term::Var(x)]));
        let b = Formula::forall(y, Formula::pred(pr, vec![Term::Var(y)]));
        assert_eq!(a.regular_form(), b.regular_form());

        // Free variables are significant.
        let free_x = Formula::pred(pr, vec![Term::Var(x)]);
        let free_y = Formula::pred(pr, vec![Term::Var(y)]);
        assert_ne!(free_x.regular_form(), free_y.regular_form());
    }

    #[test]
    fn test_nested_quantifier_order_matters() {
        let mut symbols = SymbolTable::new();
        let pr = symbols.intern("P");
        let x = Variable::Named(symbols.intern("x"));
        let y = Variable::Named(symbols.intern("y"));

        let xy = Formula::forall(
            x,
            Formula::forall(y, Formula::pred(pr, vec![Term::Var(x), Term::Var(y)])),
        );
        let yx = Formula::forall(
            y,
            Formula::forall(x, Formula::pred(pr, vec![Term::Var(x), Term::Var(y)])),
        );
        assert_ne!(xy.regular_form(), yx.regular_form());
    }

    #[test]
    fn test_free_fresh_variables_not_captured() {
        let mut symbols = SymbolTable::new();
        let pr = symbols.intern("P");
        let x = Variable::Named(symbols.intern("x"));
        let free = Variable::Fresh(0);

        // forall x. P(x, _0) with _0 free: the binder must not be renamed
        // onto the free _0.
        let f = Formula::forall(
            x,
            Formula::pred(pr, vec![Term::Var(x), Term::Var(free)]),
        );
        let r = f.regular_form();
        match &r {
            Formula::ForAll(v, _) => assert_ne!(*v, free),
            other => panic!("expected ForAll, got {other:?}"),
        }
    }

    // ========================================================================
    // Property tests
    // ========================================================================

    /// Deterministic symbol pool for generated formulas.
    fn pool() -> (Vec<crate::Symbol>, Vec<crate::Symbol>, Vec<Variable>) {
        let mut t = SymbolTable::new();
        let preds = vec![t.intern("P"), t.intern("Q"), t.intern("R")];
        let consts = vec![t.intern("c"), t.intern("d")];
        let vars = vec![
            Variable::Named(t.intern("x")),
            Variable::Named(t.intern("y")),
        ];
        (preds, consts, vars)
    }

    fn arb_formula() -> impl Strategy<Value = Formula> {
        let (preds, consts, vars) = pool();
        let leaf = {
            let (p1, p2, p3) = (preds.clone(), preds.clone(), preds);
            let consts = consts.clone();
            let vars2 = vars.clone();
            prop_oneof![
                (0..3usize).prop_map(move |i| Formula::prop(p1[i])),
                (0..3usize, 0..2usize)
                    .prop_map(move |(i, j)| Formula::pred(p2[i], vec![Term::Const(consts[j])])),
                (0..3usize, 0..2usize)
                    .prop_map(move |(i, j)| Formula::pred(p3[i], vec![Term::Var(vars2[j])])),
            ]
        };
        leaf.prop_recursive(3, 24, 3, move |inner| {
            let (v1, v2) = (vars.clone(), vars.clone());
            prop_oneof![
                inner.clone().prop_map(Formula::not),
                proptest::collection::vec(inner.clone(), 2..4).prop_map(Formula::And),
                proptest::collection::vec(inner.clone(), 2..4).prop_map(Formula::Or),
                (inner.clone(), inner.clone()).prop_map(|(p, q)| Formula::imply(p, q)),
                (0..2usize, inner.clone()).prop_map(move |(j, b)| Formula::forall(v1[j], b)),
                (0..2usize, inner.clone()).prop_map(move |(j, b)| Formula::exists(v2[j], b)),
            ]
        })
    }

    /// Reverse every AND/OR child list: an AC-equivalent variant.
    fn reverse_ac(f: &Formula) -> Formula {
        match f {
            Formula::And(cs) => Formula::And(cs.iter().rev().map(reverse_ac).collect()),
            Formula::Or(cs) => Formula::Or(cs.iter().rev().map(reverse_ac).collect()),
            Formula::Not(p) => Formula::not(reverse_ac(p)),
            Formula::Imply(p, q) => Formula::imply(reverse_ac(p), reverse_ac(q)),
            Formula::Equiv(p, q) => Formula::equiv(reverse_ac(p), reverse_ac(q)),
            Formula::ForAll(v, b) => Formula::forall(*v, reverse_ac(b)),
            Formula::Exists(v, b) => Formula::exists(*v, reverse_ac(b)),
            _ => f.clone(),
        }
    }

    proptest! {
        #[test]
        fn prop_regular_form_idempotent(f in arb_formula()) {
            let r = f.regular_form();
            prop_assert_eq!(r.regular_form(), r);
        }

        #[test]
        fn prop_regular_form_commutative_invariant(f in arb_formula()) {
            prop_assert_eq!(reverse_ac(&f).regular_form(), f.regular_form());
        }

        #[test]
        fn prop_regular_form_alpha_invariant(f in arb_formula()) {
            let mut supply = FreshVars::above(&f);
            let renamed = f.regularize_bound_vars(&mut supply);
            prop_assert_eq!(renamed.regular_form(), f.regular_form());
        }

        #[test]
        fn prop_duplicate_conjunct_collapses(f in arb_formula()) {
            let doubled = Formula::And(vec![f.clone(), f.clone()]);
            prop_assert_eq!(doubled.regular_form(), f.regular_form());
        }
    }
}
