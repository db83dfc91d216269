// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Symbolic terms: variables, constants and function applications.

use crate::symbol::symbol_index;
use crate::Symbol;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A first-order variable.
///
/// `Named` variables come from user input through the symbol table. `Fresh`
/// variables are produced by the system itself (bound-variable renaming,
/// quantifier introduction) and display as `_0`, `_1`, …  Keeping the two
/// kinds apart makes fresh-name generation deterministic without threading a
/// symbol table through pure code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variable {
    /// A user-named variable.
    Named(Symbol),
    /// A generated variable with a numeric index.
    Fresh(u32),
}

impl Variable {
    /// The numeric index of a generated variable, if this is one.
    pub fn fresh_index(&self) -> Option<u32> {
        match self {
            Variable::Fresh(n) => Some(*n),
            Variable::Named(_) => None,
        }
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Variable::Named(a), Variable::Named(b)) => symbol_index(*a).cmp(&symbol_index(*b)),
            (Variable::Named(_), Variable::Fresh(_)) => Ordering::Less,
            (Variable::Fresh(_), Variable::Named(_)) => Ordering::Greater,
            (Variable::Fresh(a), Variable::Fresh(b)) => a.cmp(b),
        }
    }
}

/// A symbolic term denoting an individual.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    /// A bound or free variable.
    Var(Variable),
    /// A named constant.
    Const(Symbol),
    /// A function application with an ordered argument list.
    Fun(Symbol, Vec<Term>),
}

impl Term {
    /// Create a variable term from a named symbol.
    pub fn var(s: Symbol) -> Term {
        Term::Var(Variable::Named(s))
    }

    /// Collect every variable occurring in this term.
    pub fn variables(&self, out: &mut BTreeSet<Variable>) {
        match self {
            Term::Var(v) => {
                out.insert(*v);
            }
            Term::Const(_) => {}
            Term::Fun(_, args) => {
                for a in args {
                    a.variables(out);
                }
            }
        }
    }

    /// Collect every constant occurring in this term, in order of appearance.
    pub fn constants(&self, out: &mut Vec<Symbol>) {
        match self {
            Term::Var(_) => {}
            Term::Const(c) => out.push(*c),
            Term::Fun(_, args) => {
                for a in args {
                    a.constants(out);
                }
            }
        }
    }

    /// Bottom-up rewrite: children are mapped first, then `f` is applied to
    /// the rebuilt node.
    pub fn map(&self, f: &impl Fn(Term) -> Term) -> Term {
        let rebuilt = match self {
            Term::Var(_) | Term::Const(_) => self.clone(),
            Term::Fun(name, args) => Term::Fun(*name, args.iter().map(|a| a.map(f)).collect()),
        };
        f(rebuilt)
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(t: &Term) -> u8 {
            match t {
                Term::Var(_) => 0,
                Term::Const(_) => 1,
                Term::Fun(..) => 2,
            }
        }

        rank(self).cmp(&rank(other)).then_with(|| match (self, other) {
            (Term::Var(a), Term::Var(b)) => a.cmp(b),
            (Term::Const(a), Term::Const(b)) => symbol_index(*a).cmp(&symbol_index(*b)),
            (Term::Fun(f, xs), Term::Fun(g, ys)) => symbol_index(*f)
                .cmp(&symbol_index(*g))
                .then_with(|| xs.cmp(ys)),
            _ => Ordering::Equal,
        })
    }
}
