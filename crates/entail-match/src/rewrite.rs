// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-position subformula rewriting.

use entail_core::Formula;

/// Apply `rw` at every subformula position of `f`, the root included, and
/// return one result formula per produced rewrite. Each result differs from
/// `f` at exactly one position; positions inside terms are not visited.
pub fn rewrite_one(f: &Formula, rw: &mut impl FnMut(&Formula) -> Vec<Formula>) -> Vec<Formula> {
    let mut out = rw(f);

    match f {
        Formula::Predicate(..) | Formula::Named(..) | Formula::Equal(..) => {}
        Formula::Not(p) => {
            out.extend(rewrite_one(p, rw).into_iter().map(Formula::not));
        }
        Formula::And(cs) => {
            for (i, c) in cs.iter().enumerate() {
                for r in rewrite_one(c, rw) {
                    let mut children = cs.clone();
                    children[i] = r;
                    out.push(Formula::And(children));
                }
            }
        }
        Formula::Or(cs) => {
            for (i, c) in cs.iter().enumerate() {
                for r in rewrite_one(c, rw) {
                    let mut children = cs.clone();
                    children[i] = r;
                    out.push(Formula::Or(children));
                }
            }
        }
        Formula::Imply(p, q) => {
            out.extend(
                rewrite_one(p, rw)
                    .into_iter()
                    .map(|r| Formula::imply(r, (**q).clone())),
            );
            out.extend(
                rewrite_one(q, rw)
                    .into_iter()
                    .map(|r| Formula::imply((**p).clone(), r)),
            );
        }
        Formula::Equiv(p, q) => {
            out.extend(
                rewrite_one(p, rw)
                    .into_iter()
                    .map(|r| Formula::equiv(r, (**q).clone())),
            );
            out.extend(
                rewrite_one(q, rw)
                    .into_iter()
                    .map(|r| Formula::equiv((**p).clone(), r)),
            );
        }
        Formula::ForAll(v, body) => {
            out.extend(
                rewrite_one(body, rw)
                    .into_iter()
                    .map(|r| Formula::forall(*v, r)),
            );
        }
        Formula::Exists(v, body) => {
            out.extend(
                rewrite_one(body, rw)
                    .into_iter()
                    .map(|r| Formula::exists(*v, r)),
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use entail_core::{Parser, SymbolTable};

    #[test]
    fn test_rewrites_every_position() {
        let mut symbols = SymbolTable::new();
        let f = Parser::new(&mut symbols).parse("!!P & Q").unwrap();
        let expected = Parser::new(&mut symbols).parse("P & Q").unwrap();

        // Strip double negations.
        let mut strip = |g: &Formula| match g {
            Formula::Not(inner) => match inner.as_ref() {
                Formula::Not(core) => vec![(**core).clone()],
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        let results = rewrite_one(&f, &mut strip);
        assert!(results.contains(&expected));
    }

    #[test]
    fn test_each_result_changes_one_position() {
        let mut symbols = SymbolTable::new();
        let f = Parser::new(&mut symbols).parse("P | P").unwrap();
        let q = Parser::new(&mut symbols).parse("Q").unwrap();

        let p = Parser::new(&mut symbols).parse("P").unwrap();
        let mut to_q = |g: &Formula| {
            if g == &p {
                vec![q.clone()]
            } else {
                Vec::new()
            }
        };

        let results = rewrite_one(&f, &mut to_q);
        // One rewrite per disjunct, none at the root.
        assert_eq!(results.len(), 2);
        let qp = Parser::new(&mut symbols).parse("Q | P").unwrap();
        let pq = Parser::new(&mut symbols).parse("P | Q").unwrap();
        assert!(results.contains(&qp) && results.contains(&pq));
    }
}
