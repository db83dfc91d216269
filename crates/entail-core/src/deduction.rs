// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deduction records and proof trees.
//!
//! A [`Deduction`] justifies one derivation step: which rule produced which
//! formula from which dependencies. [`DeductionNode`] links deductions into
//! a proof tree rooted at a goal; [`TowardResult`] is the uniform result of
//! goal-directed rule application.

use crate::{Formula, Term};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Namespaced rule identifier, e.g. `logic::DoubleNegate`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Rule namespace (every built-in lives in `logic`).
    pub namespace: String,
    /// Local rule name.
    pub local: String,
}

impl QualifiedName {
    /// Create a qualified name.
    pub fn new(namespace: &str, local: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            local: local.to_string(),
        }
    }

    /// A name in the `logic` namespace.
    pub fn logic(local: &str) -> Self {
        Self::new("logic", local)
    }

    /// The name identity steps carry: a fact taken verbatim from the
    /// caller's context.
    pub fn premise() -> Self {
        Self::logic("Premise")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.namespace, self.local)
    }
}

/// A value attached to a deduction under a string key.
#[derive(Clone, Debug, PartialEq)]
pub enum MetaValue {
    /// A term, e.g. the constant generalized by an existential introduction.
    Term(Term),
    /// A proof tree, attached by the search meta-rule.
    Tree(Box<DeductionNode>),
}

/// Free-form side information produced by rules.
pub type Metadata = BTreeMap<String, MetaValue>;

/// One derivation step: `rule` produced `produced` from `dependencies`.
#[derive(Clone, Debug, PartialEq)]
pub struct Deduction {
    /// The rule that performed the step.
    pub rule: QualifiedName,
    /// The derived formula.
    pub produced: Formula,
    /// Formulas already known (context or frontier) that justified the step.
    pub dependencies: Vec<Formula>,
    /// Side information; see the metadata keys on individual rules.
    pub metadata: Metadata,
}

impl Deduction {
    /// Create a deduction with empty metadata.
    pub fn new(rule: QualifiedName, produced: Formula, dependencies: Vec<Formula>) -> Self {
        Self {
            rule,
            produced,
            dependencies,
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: &str, value: MetaValue) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// An identity step on a context fact.
    pub fn premise(fact: Formula) -> Self {
        Self::new(QualifiedName::premise(), fact, Vec::new())
    }

    /// Whether this is an identity step.
    pub fn is_premise(&self) -> bool {
        self.rule == QualifiedName::premise()
    }
}

/// Result of goal-directed rule application.
#[derive(Clone, Debug, PartialEq)]
pub enum TowardResult {
    /// A single deduction whose product closes the goal.
    Reached(Deduction),
    /// Newly derivable formulas that did not (yet) reach the goal. May be
    /// empty: an inapplicable rule is not an error.
    NotReached(Vec<Deduction>),
}

impl TowardResult {
    /// Whether the goal was closed.
    pub fn is_reached(&self) -> bool {
        matches!(self, TowardResult::Reached(_))
    }

    /// An empty `NotReached`.
    pub fn nothing() -> Self {
        TowardResult::NotReached(Vec::new())
    }
}

/// A node of a proof tree: a deduction plus the nodes justifying each of its
/// dependencies.
#[derive(Clone, Debug, PartialEq)]
pub struct DeductionNode {
    /// The step taken at this node.
    pub deduction: Deduction,
    /// One child per dependency, in dependency order.
    pub children: Vec<DeductionNode>,
}

impl DeductionNode {
    /// Create a node.
    pub fn new(deduction: Deduction, children: Vec<DeductionNode>) -> Self {
        Self {
            deduction,
            children,
        }
    }

    /// Create a node with no children.
    pub fn leaf(deduction: Deduction) -> Self {
        Self::new(deduction, Vec::new())
    }

    /// Visit this node and then its children, depth-first. The visitor
    /// returns `false` to stop the traversal; the function reports whether
    /// the traversal ran to completion.
    pub fn recur_apply(&self, visit: &mut impl FnMut(&DeductionNode) -> bool) -> bool {
        if !visit(self) {
            return false;
        }
        for child in &self.children {
            if !child.recur_apply(visit) {
                return false;
            }
        }
        true
    }

    /// The context facts this proof ultimately rests on: the products of all
    /// identity-step leaves, deduplicated by regular form, in traversal
    /// order.
    pub fn premises(&self) -> Vec<Formula> {
        let mut seen = std::collections::BTreeSet::new();
        let mut out = Vec::new();
        self.recur_apply(&mut |node| {
            if node.deduction.is_premise() && seen.insert(node.deduction.produced.regular_form()) {
                out.push(node.deduction.produced.clone());
            }
            true
        });
        out
    }
}
