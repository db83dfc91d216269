//! End-to-end proof scenarios for the search meta-rule.
//!
//! Each scenario drives `logic::Logic` from a user-level context to a goal
//! and checks the returned dependencies and deduction tree.
//!
//! Usage: cargo test --test proof_suite -p entail-rules

use entail_core::{
    Formula, FormulaContext, MetaValue, Parser, QualifiedName, SymbolTable, Term, TowardResult,
};
use entail_rules::{AllLogicRule, Rule, SearchConfig};
use std::collections::BTreeSet;

// ============================================================================
// Test Infrastructure
// ============================================================================

fn build(symbols: &mut SymbolTable, inputs: &[&str]) -> FormulaContext {
    let mut ctx = FormulaContext::new();
    for input in inputs {
        let f = Parser::new(symbols).parse(input).unwrap();
        ctx.add(f);
    }
    ctx
}

fn prove(context: &[&str], goal: &str) -> (TowardResult, FormulaContext, Formula) {
    let mut symbols = SymbolTable::new();
    let ctx = build(&mut symbols, context);
    let goal = Parser::new(&mut symbols).parse(goal).unwrap();
    let result = AllLogicRule::new().apply_toward(&ctx, &[], &[], &goal);
    (result, ctx, goal)
}

/// The proof tree attached to a successful result.
fn tree(d: &entail_core::Deduction) -> &entail_core::DeductionNode {
    match d.metadata.get("DeductionTree") {
        Some(MetaValue::Tree(node)) => node.as_ref(),
        other => panic!("expected a DeductionTree, got {other:?}"),
    }
}

/// Every rule name appearing in the proof tree.
fn rules_used(node: &entail_core::DeductionNode) -> Vec<QualifiedName> {
    let mut names = Vec::new();
    node.recur_apply(&mut |n| {
        names.push(n.deduction.rule.clone());
        true
    });
    names
}

/// The checks every successful scenario must pass: the flat dependency list
/// is a subset of the input context, and the tree's leaves are identity
/// steps on that context.
fn assert_well_founded(d: &entail_core::Deduction, ctx: &FormulaContext) {
    let known: BTreeSet<Formula> = ctx.formulas().iter().map(Formula::regular_form).collect();

    for dep in &d.dependencies {
        assert!(
            known.contains(&dep.regular_form()),
            "dependency {dep:?} is not an input fact"
        );
    }

    tree(d).recur_apply(&mut |node| {
        if node.children.is_empty() && node.deduction.is_premise() {
            assert!(known.contains(&node.deduction.produced.regular_form()));
        }
        true
    });
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_01_modus_ponens() {
    let (result, ctx, goal) = prove(&["P", "P -> Q"], "Q");

    match result {
        TowardResult::Reached(d) => {
            assert_eq!(d.produced, goal);
            assert_eq!(d.rule, QualifiedName::logic("Logic"));

            let deps: BTreeSet<Formula> =
                d.dependencies.iter().map(Formula::regular_form).collect();
            let expected: BTreeSet<Formula> =
                ctx.formulas().iter().map(Formula::regular_form).collect();
            assert_eq!(deps, expected);

            assert_eq!(tree(&d).deduction.rule, QualifiedName::logic("Imply"));
            assert_well_founded(&d, &ctx);
        }
        other => panic!("expected Reached, got {other:?}"),
    }
}

#[test]
fn test_02_excluded_middle_from_empty_context() {
    let (result, ctx, goal) = prove(&[], "P | !P");

    match result {
        TowardResult::Reached(d) => {
            assert_eq!(d.produced, goal);
            assert!(d.dependencies.is_empty());
            assert_eq!(
                tree(&d).deduction.rule,
                QualifiedName::logic("ExcludeMiddle")
            );
            assert_well_founded(&d, &ctx);
        }
        other => panic!("expected Reached, got {other:?}"),
    }
}

#[test]
fn test_03_and_construction() {
    let (result, ctx, _goal) = prove(&["P", "Q"], "P & Q");

    match result {
        TowardResult::Reached(d) => {
            let deps: BTreeSet<Formula> =
                d.dependencies.iter().map(Formula::regular_form).collect();
            let expected: BTreeSet<Formula> =
                ctx.formulas().iter().map(Formula::regular_form).collect();
            assert_eq!(deps, expected);
            assert_eq!(
                tree(&d).deduction.rule,
                QualifiedName::logic("AndConstruct")
            );
            assert_well_founded(&d, &ctx);
        }
        other => panic!("expected Reached, got {other:?}"),
    }
}

#[test]
fn test_04_double_negation() {
    let (result, ctx, goal) = prove(&["!!P"], "P");

    match result {
        TowardResult::Reached(d) => {
            assert_eq!(d.produced, goal);
            assert_eq!(
                tree(&d).deduction.rule,
                QualifiedName::logic("DoubleNegate")
            );
            assert_well_founded(&d, &ctx);
        }
        other => panic!("expected Reached, got {other:?}"),
    }
}

#[test]
fn test_05_implication_chain() {
    let (result, ctx, goal) = prove(&["P -> Q", "Q -> R", "P"], "R");

    match result {
        TowardResult::Reached(d) => {
            assert_eq!(d.produced, goal);

            let used = rules_used(tree(&d));
            let ponens = used
                .iter()
                .filter(|n| **n == QualifiedName::logic("Imply"))
                .count();
            let composed = used.contains(&QualifiedName::logic("ImplyCompose"));
            assert!(
                ponens >= 2 || composed,
                "expected two Imply steps or one composition, saw {used:?}"
            );
            assert_well_founded(&d, &ctx);
        }
        other => panic!("expected Reached, got {other:?}"),
    }
}

#[test]
fn test_06_existential_generalization() {
    let (result, ctx, _goal) = prove(&["@phi(c)"], "exists x. @phi(x)");

    match result {
        TowardResult::Reached(d) => {
            let root = tree(&d);
            assert_eq!(root.deduction.rule, QualifiedName::logic("ExistConstant"));

            let mut symbols = SymbolTable::new();
            Parser::new(&mut symbols).parse("@phi(c)").unwrap();
            let c = symbols.intern("c");
            assert_eq!(
                root.deduction.metadata.get("constant"),
                Some(&MetaValue::Term(Term::Const(c)))
            );
            assert_well_founded(&d, &ctx);
        }
        other => panic!("expected Reached, got {other:?}"),
    }
}

// ============================================================================
// Universal properties
// ============================================================================

#[test]
fn test_determinism_of_search() {
    let run = || prove(&["P -> Q", "Q -> R", "P"], "R").0;
    assert_eq!(run(), run());
}

#[test]
fn test_depth_bound_cuts_off_chains() {
    let mut symbols = SymbolTable::new();
    let ctx = build(&mut symbols, &["P -> Q", "Q -> R", "P"]);
    let goal = Parser::new(&mut symbols).parse("R").unwrap();

    let shallow = AllLogicRule::with_config(SearchConfig { search_depth: 1 });
    assert!(!shallow.apply_toward(&ctx, &[], &[], &goal).is_reached());

    let deep = AllLogicRule::with_config(SearchConfig { search_depth: 3 });
    assert!(deep.apply_toward(&ctx, &[], &[], &goal).is_reached());
}

#[test]
fn test_exhaustion_returns_not_reached() {
    let (result, _ctx, _goal) = prove(&["P"], "Q & R");
    assert_eq!(result, TowardResult::NotReached(Vec::new()));
}

#[test]
fn test_goal_variant_modulo_commutativity() {
    // The goal is an AC-variant of a derivable conjunction.
    let (result, ctx, _goal) = prove(&["Q", "P"], "P & Q");
    match result {
        TowardResult::Reached(d) => assert_well_founded(&d, &ctx),
        other => panic!("expected Reached, got {other:?}"),
    }
}
