// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! First-order formulas as an abstract syntax tree.
//!
//! The [`Formula`] enum is the core data structure: leaves are predicate,
//! named-schema and equality atoms; internal nodes are connectives and
//! quantifiers. AND and OR are n-ary, which keeps flattening and
//! commutative comparison cheap.

use crate::symbol::symbol_index;
use crate::{Symbol, Term, Variable};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// A first-order formula.
///
/// # Design Decisions
///
/// - **Closed sum type**: pattern matching on the variant replaces virtual
///   dispatch; the open-ended part of the system is the rule catalog, not
///   the formula shape.
/// - **N-ary AND/OR**: associativity is a representation property, so
///   flattening and commutative ordering work on child vectors directly.
/// - **Equality as a variant**: rules that rewrite by equations need to
///   recognize equality syntactically.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Formula {
    /// Atomic predicate: P(t₁, …, tₙ). A propositional atom is a predicate
    /// with no arguments.
    Predicate(Symbol, Vec<Term>),

    /// Named schema atom: φ(t₁, …, tₙ), standing for an unspecified formula
    /// parameterized by its argument terms.
    Named(Symbol, Vec<Term>),

    /// Equality between two terms.
    Equal(Term, Term),

    /// Negation.
    Not(Box<Formula>),

    /// N-ary conjunction (at least two children after construction).
    And(Vec<Formula>),

    /// N-ary disjunction (at least two children after construction).
    Or(Vec<Formula>),

    /// Implication.
    Imply(Box<Formula>, Box<Formula>),

    /// Biconditional.
    Equiv(Box<Formula>, Box<Formula>),

    /// Universal quantification.
    ForAll(Variable, Box<Formula>),

    /// Existential quantification.
    Exists(Variable, Box<Formula>),
}

/// Deterministic supply of fresh variables.
///
/// Hands out `Fresh` variables with strictly increasing indices, starting
/// above everything already in use.
#[derive(Clone, Debug)]
pub struct FreshVars {
    next: u32,
}

impl FreshVars {
    /// Create a supply starting at the given index.
    pub fn new(start: u32) -> Self {
        Self { next: start }
    }

    /// Create a supply whose names cannot collide with any variable of `f`.
    pub fn above(f: &Formula) -> Self {
        Self::above_all(std::iter::once(f))
    }

    /// Create a supply above every variable of every given formula.
    pub fn above_all<'a>(formulas: impl IntoIterator<Item = &'a Formula>) -> Self {
        let mut max = None;
        for f in formulas {
            for v in f.all_variables() {
                if let Some(n) = v.fresh_index() {
                    max = Some(max.map_or(n, |m: u32| m.max(n)));
                }
            }
        }
        Self {
            next: max.map_or(0, |m| m + 1),
        }
    }

    /// Produce the next fresh variable.
    pub fn fresh(&mut self) -> Variable {
        let v = Variable::Fresh(self.next);
        self.next += 1;
        v
    }
}

// ============================================================================
// Smart constructors
// ============================================================================

impl Formula {
    /// A propositional atom: a predicate with no arguments.
    pub fn prop(name: Symbol) -> Formula {
        Formula::Predicate(name, Vec::new())
    }

    /// A predicate atom.
    pub fn pred(name: Symbol, args: Vec<Term>) -> Formula {
        Formula::Predicate(name, args)
    }

    /// A named schema atom.
    pub fn named(name: Symbol, args: Vec<Term>) -> Formula {
        Formula::Named(name, args)
    }

    /// An equality atom.
    pub fn equal(lhs: Term, rhs: Term) -> Formula {
        Formula::Equal(lhs, rhs)
    }

    /// Negation.
    pub fn not(f: Formula) -> Formula {
        Formula::Not(Box::new(f))
    }

    /// Conjunction of a non-empty child list; a single child is returned
    /// unwrapped.
    pub fn and(children: Vec<Formula>) -> Formula {
        assert!(!children.is_empty(), "conjunction needs at least one child");
        if children.len() == 1 {
            children.into_iter().next().unwrap()
        } else {
            Formula::And(children)
        }
    }

    /// Disjunction of a non-empty child list; a single child is returned
    /// unwrapped.
    pub fn or(children: Vec<Formula>) -> Formula {
        assert!(!children.is_empty(), "disjunction needs at least one child");
        if children.len() == 1 {
            children.into_iter().next().unwrap()
        } else {
            Formula::Or(children)
        }
    }

    /// Implication.
    pub fn imply(p: Formula, q: Formula) -> Formula {
        Formula::Imply(Box::new(p), Box::new(q))
    }

    /// Biconditional.
    pub fn equiv(p: Formula, q: Formula) -> Formula {
        Formula::Equiv(Box::new(p), Box::new(q))
    }

    /// Universal quantification.
    pub fn forall(v: Variable, body: Formula) -> Formula {
        Formula::ForAll(v, Box::new(body))
    }

    /// Existential quantification.
    pub fn exists(v: Variable, body: Formula) -> Formula {
        Formula::Exists(v, Box::new(body))
    }
}

// ============================================================================
// Structural operations
// ============================================================================

impl Formula {
    /// Strict structural equality. Associativity, commutativity and bound
    /// variable names are all significant; compare [`Formula::regular_form`]
    /// results for equivalence up to those.
    pub fn is_identical_to(&self, other: &Formula) -> bool {
        self == other
    }

    /// Collapse nested AND into AND and nested OR into OR.
    ///
    /// Only same-connective nesting is collapsed; the operation does not
    /// descend into other node kinds.
    pub fn flatten(&self) -> Formula {
        fn collect(kind_and: bool, children: &[Formula], out: &mut Vec<Formula>) {
            for c in children {
                match (kind_and, c) {
                    (true, Formula::And(inner)) => collect(true, inner, out),
                    (false, Formula::Or(inner)) => collect(false, inner, out),
                    _ => out.push(c.clone()),
                }
            }
        }

        match self {
            Formula::And(cs) => {
                let mut out = Vec::new();
                collect(true, cs, &mut out);
                Formula::and(out)
            }
            Formula::Or(cs) => {
                let mut out = Vec::new();
                collect(false, cs, &mut out);
                Formula::or(out)
            }
            _ => self.clone(),
        }
    }

    /// The set of free variables.
    pub fn variables(&self) -> BTreeSet<Variable> {
        fn walk(f: &Formula, bound: &mut Vec<Variable>, out: &mut BTreeSet<Variable>) {
            match f {
                Formula::Predicate(_, args) | Formula::Named(_, args) => {
                    let mut vars = BTreeSet::new();
                    for a in args {
                        a.variables(&mut vars);
                    }
                    out.extend(vars.into_iter().filter(|v| !bound.contains(v)));
                }
                Formula::Equal(lhs, rhs) => {
                    let mut vars = BTreeSet::new();
                    lhs.variables(&mut vars);
                    rhs.variables(&mut vars);
                    out.extend(vars.into_iter().filter(|v| !bound.contains(v)));
                }
                Formula::Not(p) => walk(p, bound, out),
                Formula::And(cs) | Formula::Or(cs) => {
                    for c in cs {
                        walk(c, bound, out);
                    }
                }
                Formula::Imply(p, q) | Formula::Equiv(p, q) => {
                    walk(p, bound, out);
                    walk(q, bound, out);
                }
                Formula::ForAll(v, body) | Formula::Exists(v, body) => {
                    bound.push(*v);
                    walk(body, bound, out);
                    bound.pop();
                }
            }
        }

        let mut out = BTreeSet::new();
        walk(self, &mut Vec::new(), &mut out);
        out
    }

    /// Every variable occurring in the formula, free or bound, including
    /// binder variables themselves.
    pub fn all_variables(&self) -> BTreeSet<Variable> {
        fn walk(f: &Formula, out: &mut BTreeSet<Variable>) {
            match f {
                Formula::Predicate(_, args) | Formula::Named(_, args) => {
                    for a in args {
                        a.variables(out);
                    }
                }
                Formula::Equal(lhs, rhs) => {
                    lhs.variables(out);
                    rhs.variables(out);
                }
                Formula::Not(p) => walk(p, out),
                Formula::And(cs) | Formula::Or(cs) => {
                    for c in cs {
                        walk(c, out);
                    }
                }
                Formula::Imply(p, q) | Formula::Equiv(p, q) => {
                    walk(p, out);
                    walk(q, out);
                }
                Formula::ForAll(v, body) | Formula::Exists(v, body) => {
                    out.insert(*v);
                    walk(body, out);
                }
            }
        }

        let mut out = BTreeSet::new();
        walk(self, &mut out);
        out
    }

    /// The multiset of constants appearing in term position, in order of
    /// appearance.
    pub fn all_constants(&self) -> Vec<Symbol> {
        fn walk(f: &Formula, out: &mut Vec<Symbol>) {
            match f {
                Formula::Predicate(_, args) | Formula::Named(_, args) => {
                    for a in args {
                        a.constants(out);
                    }
                }
                Formula::Equal(lhs, rhs) => {
                    lhs.constants(out);
                    rhs.constants(out);
                }
                Formula::Not(p) => walk(p, out),
                Formula::And(cs) | Formula::Or(cs) => {
                    for c in cs {
                        walk(c, out);
                    }
                }
                Formula::Imply(p, q) | Formula::Equiv(p, q) => {
                    walk(p, out);
                    walk(q, out);
                }
                Formula::ForAll(_, body) | Formula::Exists(_, body) => walk(body, out),
            }
        }

        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }

    /// A variable guaranteed not to occur anywhere in the formula.
    pub fn next_var(&self) -> Variable {
        FreshVars::above(self).fresh()
    }

    /// Bottom-up term rewrite preserving formula structure: `f` is applied
    /// to every term node, children first.
    pub fn recur_map_term(&self, f: &impl Fn(Term) -> Term) -> Formula {
        match self {
            Formula::Predicate(p, args) => {
                Formula::Predicate(*p, args.iter().map(|a| a.map(f)).collect())
            }
            Formula::Named(n, args) => Formula::Named(*n, args.iter().map(|a| a.map(f)).collect()),
            Formula::Equal(lhs, rhs) => Formula::Equal(lhs.map(f), rhs.map(f)),
            Formula::Not(p) => Formula::not(p.recur_map_term(f)),
            Formula::And(cs) => Formula::And(cs.iter().map(|c| c.recur_map_term(f)).collect()),
            Formula::Or(cs) => Formula::Or(cs.iter().map(|c| c.recur_map_term(f)).collect()),
            Formula::Imply(p, q) => Formula::imply(p.recur_map_term(f), q.recur_map_term(f)),
            Formula::Equiv(p, q) => Formula::equiv(p.recur_map_term(f), q.recur_map_term(f)),
            Formula::ForAll(v, body) => Formula::forall(*v, body.recur_map_term(f)),
            Formula::Exists(v, body) => Formula::exists(*v, body.recur_map_term(f)),
        }
    }

    /// Substitute free variables through a lookup. Bound occurrences shadow:
    /// a variable captured by a quantifier is never replaced inside its body.
    pub fn replace_var(&self, lookup: &impl Fn(&Variable) -> Option<Term>) -> Formula {
        fn subst_term(
            t: &Term,
            lookup: &impl Fn(&Variable) -> Option<Term>,
            bound: &[Variable],
        ) -> Term {
            t.map(&|t| match &t {
                Term::Var(v) if !bound.contains(v) => lookup(v).unwrap_or(t),
                _ => t,
            })
        }

        fn walk(
            f: &Formula,
            lookup: &impl Fn(&Variable) -> Option<Term>,
            bound: &mut Vec<Variable>,
        ) -> Formula {
            match f {
                Formula::Predicate(p, args) => Formula::Predicate(
                    *p,
                    args.iter().map(|a| subst_term(a, lookup, bound)).collect(),
                ),
                Formula::Named(n, args) => Formula::Named(
                    *n,
                    args.iter().map(|a| subst_term(a, lookup, bound)).collect(),
                ),
                Formula::Equal(lhs, rhs) => Formula::Equal(
                    subst_term(lhs, lookup, bound),
                    subst_term(rhs, lookup, bound),
                ),
                Formula::Not(p) => Formula::not(walk(p, lookup, bound)),
                Formula::And(cs) => {
                    Formula::And(cs.iter().map(|c| walk(c, lookup, bound)).collect())
                }
                Formula::Or(cs) => Formula::Or(cs.iter().map(|c| walk(c, lookup, bound)).collect()),
                Formula::Imply(p, q) => {
                    Formula::imply(walk(p, lookup, bound), walk(q, lookup, bound))
                }
                Formula::Equiv(p, q) => {
                    Formula::equiv(walk(p, lookup, bound), walk(q, lookup, bound))
                }
                Formula::ForAll(v, body) => {
                    bound.push(*v);
                    let body = walk(body, lookup, bound);
                    bound.pop();
                    Formula::forall(*v, body)
                }
                Formula::Exists(v, body) => {
                    bound.push(*v);
                    let body = walk(body, lookup, bound);
                    bound.pop();
                    Formula::exists(*v, body)
                }
            }
        }

        walk(self, lookup, &mut Vec::new())
    }

    /// Expand named schema atoms through a lookup. The lookup receives the
    /// atom's name and argument terms and returns the expansion, already
    /// instantiated for those arguments.
    pub fn replace_named(&self, lookup: &impl Fn(Symbol, &[Term]) -> Option<Formula>) -> Formula {
        match self {
            Formula::Named(n, args) => lookup(*n, args).unwrap_or_else(|| self.clone()),
            Formula::Predicate(..) | Formula::Equal(..) => self.clone(),
            Formula::Not(p) => Formula::not(p.replace_named(lookup)),
            Formula::And(cs) => Formula::And(cs.iter().map(|c| c.replace_named(lookup)).collect()),
            Formula::Or(cs) => Formula::Or(cs.iter().map(|c| c.replace_named(lookup)).collect()),
            Formula::Imply(p, q) => Formula::imply(p.replace_named(lookup), q.replace_named(lookup)),
            Formula::Equiv(p, q) => Formula::equiv(p.replace_named(lookup), q.replace_named(lookup)),
            Formula::ForAll(v, body) => Formula::forall(*v, body.replace_named(lookup)),
            Formula::Exists(v, body) => Formula::exists(*v, body.replace_named(lookup)),
        }
    }

    /// α-rename every bound variable from the given fresh supply, outermost
    /// binder first. Free variables are untouched.
    pub fn regularize_bound_vars(&self, supply: &mut FreshVars) -> Formula {
        fn walk(
            f: &Formula,
            supply: &mut FreshVars,
            env: &mut BTreeMap<Variable, Variable>,
        ) -> Formula {
            fn rename_term(t: &Term, env: &BTreeMap<Variable, Variable>) -> Term {
                t.map(&|t| match &t {
                    Term::Var(v) => match env.get(v) {
                        Some(nv) => Term::Var(*nv),
                        None => t,
                    },
                    _ => t,
                })
            }

            match f {
                Formula::Predicate(p, args) => {
                    Formula::Predicate(*p, args.iter().map(|a| rename_term(a, env)).collect())
                }
                Formula::Named(n, args) => {
                    Formula::Named(*n, args.iter().map(|a| rename_term(a, env)).collect())
                }
                Formula::Equal(lhs, rhs) => {
                    Formula::Equal(rename_term(lhs, env), rename_term(rhs, env))
                }
                Formula::Not(p) => Formula::not(walk(p, supply, env)),
                Formula::And(cs) => {
                    Formula::And(cs.iter().map(|c| walk(c, supply, env)).collect())
                }
                Formula::Or(cs) => Formula::Or(cs.iter().map(|c| walk(c, supply, env)).collect()),
                Formula::Imply(p, q) => {
                    Formula::imply(walk(p, supply, env), walk(q, supply, env))
                }
                Formula::Equiv(p, q) => {
                    Formula::equiv(walk(p, supply, env), walk(q, supply, env))
                }
                Formula::ForAll(v, body) => {
                    let nv = supply.fresh();
                    let shadowed = env.insert(*v, nv);
                    let body = walk(body, supply, env);
                    restore(env, *v, shadowed);
                    Formula::forall(nv, body)
                }
                Formula::Exists(v, body) => {
                    let nv = supply.fresh();
                    let shadowed = env.insert(*v, nv);
                    let body = walk(body, supply, env);
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

        walk(self, supply, &mut BTreeMap::new())
    }
}

// ============================================================================
// Total order (the formula comparator)
// ============================================================================

impl PartialOrd for Formula {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Formula {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(f: &Formula) -> u8 {
            match f {
                Formula::Predicate(..) => 0,
                Formula::Named(..) => 1,
                Formula::Equal(..) => 2,
                Formula::Not(_) => 3,
                Formula::And(_) => 4,
                Formula::Or(_) => 5,
                Formula::Imply(..) => 6,
                Formula::Equiv(..) => 7,
                Formula::ForAll(..) => 8,
                Formula::Exists(..) => 9,
            }
        }

        rank(self).cmp(&rank(other)).then_with(|| match (self, other) {
            (Formula::Predicate(p, xs), Formula::Predicate(q, ys))
            | (Formula::Named(p, xs), Formula::Named(q, ys)) => symbol_index(*p)
                .cmp(&symbol_index(*q))
                .then_with(|| xs.cmp(ys)),
            (Formula::Equal(a1, b1), Formula::Equal(a2, b2)) => {
                a1.cmp(a2).then_with(|| b1.cmp(b2))
            }
            (Formula::Not(a), Formula::Not(b)) => a.cmp(b),
            (Formula::And(xs), Formula::And(ys)) | (Formula::Or(xs), Formula::Or(ys)) => xs.cmp(ys),
            (Formula::Imply(p1, q1), Formula::Imply(p2, q2))
            | (Formula::Equiv(p1, q1), Formula::Equiv(p2, q2)) => {
                p1.cmp(p2).then_with(|| q1.cmp(q2))
            }
            (Formula::ForAll(v1, b1), Formula::ForAll(v2, b2))
            | (Formula::Exists(v1, b1), Formula::Exists(v2, b2)) => {
                v1.cmp(v2).then_with(|| b1.cmp(b2))
            }
            _ => Ordering::Equal,
        })
    }
}
