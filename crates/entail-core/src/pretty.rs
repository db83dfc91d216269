// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Human-readable formatting of terms and formulas.
//!
//! Formulas carry interned symbols, so formatting needs the [`SymbolTable`]
//! that produced them. Output uses the same surface syntax the parser
//! accepts, with minimal parenthesization.

use crate::{Formula, SymbolTable, Term, Variable};

/// Format a variable.
pub fn fmt_variable(v: &Variable, table: &SymbolTable) -> String {
    match v {
        Variable::Named(s) => table.resolve(*s).unwrap_or("?").to_string(),
        Variable::Fresh(n) => format!("_{n}"),
    }
}

/// Format a term.
pub fn fmt_term(t: &Term, table: &SymbolTable) -> String {
    match t {
        Term::Var(v) => fmt_variable(v, table),
        Term::Const(c) => table.resolve(*c).unwrap_or("?").to_string(),
        Term::Fun(f, args) => {
            let args: Vec<String> = args.iter().map(|a| fmt_term(a, table)).collect();
            format!("{}({})", table.resolve(*f).unwrap_or("?"), args.join(", "))
        }
    }
}

/// Format a formula.
pub fn fmt_formula(f: &Formula, table: &SymbolTable) -> String {
    go(f, table, 0)
}

/// Binding strength; quantifier bodies extend maximally, so quantifiers sit
/// at the bottom.
fn prec(f: &Formula) -> u8 {
    match f {
        Formula::ForAll(..) | Formula::Exists(..) => 0,
        Formula::Equiv(..) => 1,
        Formula::Imply(..) => 2,
        Formula::Or(_) => 3,
        Formula::And(_) => 4,
        Formula::Not(_) => 5,
        Formula::Predicate(..) | Formula::Named(..) | Formula::Equal(..) => 6,
    }
}

fn go(f: &Formula, table: &SymbolTable, required: u8) -> String {
    let rendered = match f {
        Formula::Predicate(p, args) | Formula::Named(p, args) => {
            let sigil = if matches!(f, Formula::Named(..)) { "@" } else { "" };
            let name = table.resolve(*p).unwrap_or("?");
            if args.is_empty() {
                format!("{sigil}{name}")
            } else {
                let args: Vec<String> = args.iter().map(|a| fmt_term(a, table)).collect();
                format!("{sigil}{name}({})", args.join(", "))
            }
        }
        Formula::Equal(lhs, rhs) => {
            format!("{} = {}", fmt_term(lhs, table), fmt_term(rhs, table))
        }
        Formula::Not(p) => format!("!{}", go(p, table, 5)),
        Formula::And(cs) => cs
            .iter()
            .map(|c| go(c, table, 5))
            .collect::<Vec<_>>()
            .join(" & "),
        Formula::Or(cs) => cs
            .iter()
            .map(|c| go(c, table, 4))
            .collect::<Vec<_>>()
            .join(" | "),
        Formula::Imply(p, q) => format!("{} -> {}", go(p, table, 3), go(q, table, 2)),
        Formula::Equiv(p, q) => format!("{} <-> {}", go(p, table, 1), go(q, table, 2)),
        Formula::ForAll(v, body) => {
            format!("forall {}. {}", fmt_variable(v, table), go(body, table, 0))
        }
        Formula::Exists(v, body) => {
            format!("exists {}. {}", fmt_variable(v, table), go(body, table, 0))
        }
    };

    if prec(f) < required {
        format!("({rendered})")
    } else {
        rendered
    }
}
