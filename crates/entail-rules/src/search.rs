// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The search meta-rule: a bounded breadth-first fixed point over every
//! built-in logic rule, with deduction-tree bookkeeping.

use crate::rule::{logic_rules, LogicRule, Rule};
use entail_core::{
    Deduction, DeductionNode, Formula, FormulaContext, MetaValue, QualifiedName, Term,
    TowardResult,
};
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet};

/// Configuration for the forward search.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Maximum number of frontier advances.
    pub search_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { search_depth: 3 }
    }
}

/// `logic::Logic`: chains every built-in rule against a growing frontier
/// until the goal is reached, no rule yields anything new, or the depth
/// budget runs out.
///
/// The search owns a working copy of the caller's context; iteration order
/// is fixed (catalog order, sorted frontier, context insertion order), so
/// equal inputs produce equal results, deduction trees included.
pub struct AllLogicRule {
    name: QualifiedName,
    description: &'static str,
    config: SearchConfig,
    catalog: Vec<Box<dyn LogicRule>>,
}

impl Default for AllLogicRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AllLogicRule {
    /// Create the meta-rule with the default depth.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    /// Create the meta-rule with an explicit configuration.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            name: QualifiedName::logic("Logic"),
            description: "Chain every logic rule in a bounded forward search",
            config,
            catalog: logic_rules(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn run(
        &self,
        context: &FormulaContext,
        formulas: &[Formula],
        terms: &[Term],
        goal: Option<&Formula>,
    ) -> RunOutcome {
        let mut ctx = context.clone();

        // Every known fact enters the table as an identity step.
        let mut reached: BTreeMap<Formula, DeductionNode> = BTreeMap::new();
        for fact in ctx.formulas() {
            reached
                .entry(fact.regular_form())
                .or_insert_with(|| DeductionNode::leaf(Deduction::premise(fact.clone())));
        }

        if let Some(goal) = goal {
            if let Some(node) = reached.get(&goal.regular_form()) {
                return RunOutcome::Reached(self.conclude(goal, node.clone()));
            }
        }

        let mut obtained: BTreeSet<Formula> = reached.keys().cloned().collect();

        for depth in 0..self.config.search_depth {
            let mut new_obtained = BTreeSet::new();
            let mut applied = false;

            for rule in &self.catalog {
                match rule.apply_incremental(&ctx, &obtained, formulas, terms, goal) {
                    TowardResult::Reached(d) => {
                        trace!("{} reached the goal at depth {depth}", rule.name());
                        let Some(children) = children_of(&reached, &d) else {
                            continue;
                        };
                        let goal = goal.expect("rules only reach a provided goal");
                        return RunOutcome::Reached(
                            self.conclude(goal, DeductionNode::new(d, children)),
                        );
                    }
                    TowardResult::NotReached(ds) => {
                        for d in ds {
                            let regular = d.produced.regular_form();
                            if reached.contains_key(&regular) {
                                continue;
                            }
                            let Some(children) = children_of(&reached, &d) else {
                                continue;
                            };
                            reached.insert(regular.clone(), DeductionNode::new(d, children));
                            new_obtained.insert(regular);
                            applied = true;
                        }
                    }
                }
            }

            if !applied {
                debug!("fixed point after {depth} advances");
                break;
            }

            debug!(
                "depth {depth}: {} new formulas, context size {}",
                new_obtained.len(),
                ctx.len()
            );
            ctx.add_all(obtained);
            obtained = new_obtained;
        }

        RunOutcome::Exhausted(reached)
    }

    /// Final result assembly: the flat dependency list contains exactly the
    /// original context facts the proof rests on, and the metadata carries
    /// the proof tree under `"DeductionTree"`.
    fn conclude(&self, goal: &Formula, node: DeductionNode) -> Deduction {
        let premises = node.premises();
        Deduction::new(self.name.clone(), goal.clone(), premises)
            .with_metadata("DeductionTree", MetaValue::Tree(Box::new(node)))
    }
}

enum RunOutcome {
    Reached(Deduction),
    Exhausted(BTreeMap<Formula, DeductionNode>),
}

/// One child node per dependency. `None` when a dependency was never
/// recorded, which a well-behaved rule cannot produce.
fn children_of(
    reached: &BTreeMap<Formula, DeductionNode>,
    d: &Deduction,
) -> Option<Vec<DeductionNode>> {
    let mut children = Vec::with_capacity(d.dependencies.len());
    for dep in &d.dependencies {
        match reached.get(&dep.regular_form()) {
            Some(node) => children.push(node.clone()),
            None => {
                debug_assert!(false, "rule {} depends on an unknown formula", d.rule);
                return None;
            }
        }
    }
    Some(children)
}

impl Rule for AllLogicRule {
    fn name(&self) -> QualifiedName {
        self.name.clone()
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn apply(&self, ctx: &FormulaContext, formulas: &[Formula], terms: &[Term]) -> Vec<Deduction> {
        match self.run(ctx, formulas, terms, None) {
            // Unreachable without a goal, but harmless to surface.
            RunOutcome::Reached(d) => vec![d],
            RunOutcome::Exhausted(reached) => reached
                .into_values()
                .map(|node| node.deduction)
                .filter(|d| !d.is_premise())
                .collect(),
        }
    }

    fn apply_toward(
        &self,
        ctx: &FormulaContext,
        formulas: &[Formula],
        terms: &[Term],
        goal: &Formula,
    ) -> TowardResult {
        match self.run(ctx, formulas, terms, Some(goal)) {
            RunOutcome::Reached(d) => TowardResult::Reached(d),
            RunOutcome::Exhausted(_) => TowardResult::nothing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entail_core::{Parser, SymbolTable};

    fn parse(symbols: &mut SymbolTable, input: &str) -> Formula {
        Parser::new(symbols).parse(input).unwrap()
    }

    #[test]
    fn test_goal_already_in_context() {
        let mut symbols = SymbolTable::new();
        let p = parse(&mut symbols, "P & Q");
        let goal = parse(&mut symbols, "Q & P");

        let ctx = FormulaContext::from_formulas([p.clone()]);
        match AllLogicRule::new().apply_toward(&ctx, &[], &[], &goal) {
            TowardResult::Reached(d) => {
                assert_eq!(d.produced, goal);
                assert_eq!(d.dependencies, vec![p]);
            }
            other => panic!("expected Reached, got {other:?}"),
        }
    }

    #[test]
    fn test_forward_apply_collects_new_deductions() {
        let mut symbols = SymbolTable::new();
        let p = parse(&mut symbols, "P");
        let imp = parse(&mut symbols, "P -> Q");
        let q = parse(&mut symbols, "Q");

        let ctx = FormulaContext::from_formulas([p, imp]);
        let ds = AllLogicRule::new().apply(&ctx, &[], &[]);

        assert!(ds.iter().any(|d| d.produced.regular_form() == q.regular_form()));
        assert!(ds.iter().all(|d| !d.is_premise()));
    }

    #[test]
    fn test_unreachable_goal_exhausts() {
        let mut symbols = SymbolTable::new();
        let p = parse(&mut symbols, "P");
        let goal = parse(&mut symbols, "Q & R");

        let ctx = FormulaContext::from_formulas([p]);
        let result = AllLogicRule::new().apply_toward(&ctx, &[], &[], &goal);
        assert_eq!(result, TowardResult::nothing());
    }
}
