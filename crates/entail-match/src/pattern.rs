// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Formula patterns and the binding environment.
//!
//! Patterns mirror the formula shape, with two kinds of holes: `Any` binds
//! one formula, `Rest` (inside AND/OR only) absorbs the remaining children.
//! AND/OR matching is associative-commutative: subject children are taken
//! flattened and subpatterns are assigned to distinct children by
//! backtracking. Re-binding a hole succeeds only when the regular forms
//! agree, which is what makes non-linear patterns like `P ∨ ¬P` work.

use entail_core::{Formula, Variable};
use std::collections::BTreeMap;

/// A pattern over formulas. Hole names are static strings chosen by the
/// rule that owns the pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Bind any single formula.
    Any(&'static str),
    /// Absorb the remaining AND/OR children (possibly none).
    Rest(&'static str),
    /// Match a negation.
    Not(Box<Pattern>),
    /// Match a conjunction, AC.
    And(Vec<Pattern>),
    /// Match a disjunction, AC.
    Or(Vec<Pattern>),
    /// Match an implication.
    Imply(Box<Pattern>, Box<Pattern>),
    /// Match a biconditional.
    Equiv(Box<Pattern>, Box<Pattern>),
    /// Match a universal quantifier, binding its variable.
    ForAll(&'static str, Box<Pattern>),
    /// Match an existential quantifier, binding its variable.
    Exists(&'static str, Box<Pattern>),
    /// Match one specific formula: structurally when the flag is set, up to
    /// regular form otherwise.
    Exact(Formula, bool),
}

impl Pattern {
    /// Hole binding one formula.
    pub fn any(name: &'static str) -> Pattern {
        Pattern::Any(name)
    }

    /// Remainder hole for AND/OR children.
    pub fn rest(name: &'static str) -> Pattern {
        Pattern::Rest(name)
    }

    /// Negation pattern.
    pub fn not(p: Pattern) -> Pattern {
        Pattern::Not(Box::new(p))
    }

    /// Conjunction pattern.
    pub fn and(ps: Vec<Pattern>) -> Pattern {
        Pattern::And(ps)
    }

    /// Disjunction pattern.
    pub fn or(ps: Vec<Pattern>) -> Pattern {
        Pattern::Or(ps)
    }

    /// Implication pattern.
    pub fn imply(p: Pattern, q: Pattern) -> Pattern {
        Pattern::Imply(Box::new(p), Box::new(q))
    }

    /// Biconditional pattern.
    pub fn equiv(p: Pattern, q: Pattern) -> Pattern {
        Pattern::Equiv(Box::new(p), Box::new(q))
    }

    /// Universal quantifier pattern.
    pub fn forall(var: &'static str, body: Pattern) -> Pattern {
        Pattern::ForAll(var, Box::new(body))
    }

    /// Existential quantifier pattern.
    pub fn exists(var: &'static str, body: Pattern) -> Pattern {
        Pattern::Exists(var, Box::new(body))
    }

    /// A pattern built from an example formula: it matches that formula
    /// only, structurally when `strict`, up to regular form otherwise.
    pub fn from_formula(f: &Formula, strict: bool) -> Pattern {
        Pattern::Exact(f.clone(), strict)
    }
}

/// Variable assignment produced by a successful match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    formulas: BTreeMap<&'static str, Formula>,
    rests: BTreeMap<&'static str, Vec<Formula>>,
    vars: BTreeMap<&'static str, Variable>,
}

impl Bindings {
    /// The formula bound to an `Any` hole.
    pub fn formula(&self, name: &str) -> Option<&Formula> {
        self.formulas.get(name)
    }

    /// The children absorbed by a `Rest` hole (possibly empty).
    pub fn rest(&self, name: &str) -> Option<&[Formula]> {
        self.rests.get(name).map(Vec::as_slice)
    }

    /// The variable bound by a quantifier pattern.
    pub fn var(&self, name: &str) -> Option<Variable> {
        self.vars.get(name).copied()
    }

    /// Bind a formula hole; re-binding requires equal regular forms.
    fn bind_formula(&mut self, name: &'static str, f: &Formula) -> bool {
        match self.formulas.get(name) {
            Some(existing) => existing.regular_form() == f.regular_form(),
            None => {
                self.formulas.insert(name, f.clone());
                true
            }
        }
    }

    /// Bind a variable hole; re-binding requires the same variable.
    fn bind_var(&mut self, name: &'static str, v: Variable) -> bool {
        match self.vars.get(name) {
            Some(existing) => *existing == v,
            None => {
                self.vars.insert(name, v);
                true
            }
        }
    }
}

/// All consistent bindings of `pattern` against `subject`.
pub fn matches(pattern: &Pattern, subject: &Formula) -> Vec<Bindings> {
    match_with(pattern, subject, &Bindings::default())
}

fn match_with(pattern: &Pattern, subject: &Formula, binds: &Bindings) -> Vec<Bindings> {
    match (pattern, subject) {
        (Pattern::Any(name), _) => {
            let mut b = binds.clone();
            if b.bind_formula(name, subject) {
                vec![b]
            } else {
                Vec::new()
            }
        }
        (Pattern::Rest(_), _) => {
            debug_assert!(false, "Rest hole outside an AND/OR pattern");
            Vec::new()
        }
        (Pattern::Exact(g, strict), _) => {
            let hit = if *strict {
                g == subject
            } else {
                g.regular_form() == subject.regular_form()
            };
            if hit {
                vec![binds.clone()]
            } else {
                Vec::new()
            }
        }
        (Pattern::Not(p), Formula::Not(f)) => match_with(p, f, binds),
        (Pattern::And(ps), Formula::And(_)) => match subject.flatten() {
            Formula::And(children) => match_ac(ps, &children, binds),
            _ => Vec::new(),
        },
        (Pattern::Or(ps), Formula::Or(_)) => match subject.flatten() {
            Formula::Or(children) => match_ac(ps, &children, binds),
            _ => Vec::new(),
        },
        (Pattern::Imply(p1, p2), Formula::Imply(f1, f2))
        | (Pattern::Equiv(p1, p2), Formula::Equiv(f1, f2)) => match_with(p1, f1, binds)
            .into_iter()
            .flat_map(|b| match_with(p2, f2, &b))
            .collect(),
        (Pattern::ForAll(var, p), Formula::ForAll(v, body))
        | (Pattern::Exists(var, p), Formula::Exists(v, body)) => {
            let mut b = binds.clone();
            if b.bind_var(var, *v) {
                match_with(p, body, &b)
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

/// Associative-commutative matching of subpatterns against flattened
/// children: each non-rest subpattern takes a distinct child, one optional
/// `Rest` hole takes whatever is left.
fn match_ac(patterns: &[Pattern], children: &[Formula], binds: &Bindings) -> Vec<Bindings> {
    let mut rest = None;
    let mut fixed = Vec::new();
    for p in patterns {
        match p {
            Pattern::Rest(name) => {
                debug_assert!(rest.is_none(), "at most one Rest hole per AND/OR pattern");
                rest = Some(*name);
            }
            other => fixed.push(other),
        }
    }

    if fixed.len() > children.len() || (rest.is_none() && fixed.len() != children.len()) {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut used = vec![false; children.len()];
    assign(&fixed, 0, children, &mut used, binds, rest, &mut out);
    out
}

fn assign(
    fixed: &[&Pattern],
    i: usize,
    children: &[Formula],
    used: &mut Vec<bool>,
    binds: &Bindings,
    rest: Option<&'static str>,
    out: &mut Vec<Bindings>,
) {
    if i == fixed.len() {
        let mut b = binds.clone();
        if let Some(name) = rest {
            let leftovers = children
                .iter()
                .zip(used.iter())
                .filter(|(_, &u)| !u)
                .map(|(c, _)| c.clone())
                .collect();
            b.rests.insert(name, leftovers);
        }
        out.push(b);
        return;
    }

    for j in 0..children.len() {
        if used[j] {
            continue;
        }
        for b in match_with(fixed[i], &children[j], binds) {
            used[j] = true;
            assign(fixed, i + 1, children, used, &b, rest, out);
            used[j] = false;
        }
    }
}
