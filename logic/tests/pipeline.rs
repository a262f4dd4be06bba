//! # End-to-end pipeline scenarios
//!
//! The documented classification scenarios exercised through the public
//! `analyze` entry point, the way the driver invokes it.
//!
//! # Authors
//!
//! [Dominic Mulligan], Systems Research Group, [Arm Research] Cambridge.
//!
//! # Copyright
//!
//! Copyright (c) Arm Limited, 2021.  All rights reserved (r).  Please see the
//! `LICENSE.markdown` file in the *Refutary* root directory for licensing
//! information.
//!
//! [Dominic Mulligan]: https://dominic-mulligan.co.uk
//! [Arm Research]: http://www.arm.com/research

use logic::{analyze::analyze, tableau::Verdict};

/// The De Morgan equivalence classifies as a tautology within the step
/// budget.
#[test]
fn de_morgan_is_a_tautology() {
    let analysis = analyze("¬(P ∧ Q) ↔ (¬P ∨ ¬Q)").unwrap();

    assert_eq!(analysis.verdict, Verdict::Tautology);
}

/// The Russell comprehension formula reaches the paradox closure and
/// classifies as a tautology.
#[test]
fn russell_formula_classifies() {
    let analysis = analyze("∃R. ∀x. R x ↔ ¬(x x)").unwrap();

    assert_eq!(analysis.verdict, Verdict::Tautology);

    // The proof tree records the Skolem-named instantiations the closure
    // is keyed on.
    let rendered = analysis.tree.join("\n");

    assert!(rendered.contains("_sk_"));
}

/// The pipeline reports parse errors with a position and the unparsed
/// remainder, and runs no further stage.
#[test]
fn parse_errors_propagate() {
    let error = analyze("∀x. (P x").unwrap_err();

    assert_eq!(error.line, 1);
    assert!(error.remainder.is_empty());

    let error = analyze("P @ Q").unwrap_err();

    assert!(error.remainder.starts_with('@'));
}

/// The classification verdicts cover all three outcomes over a small
/// corpus.
#[test]
fn verdict_coverage() {
    let cases: &[(&str, Verdict)] = &[
        ("P → (Q → P)", Verdict::Tautology),
        ("(P ∧ Q) → P", Verdict::Tautology),
        ("P ∧ ¬P", Verdict::Contradiction),
        ("(P ∨ Q) ∧ R", Verdict::Contingent),
        ("∃x. P x", Verdict::Contingent),
    ];

    for (source, expected) in cases {
        let analysis = analyze(source).unwrap();

        assert_eq!(
            analysis.verdict, *expected,
            "misclassified {:?}",
            source
        );
    }
}

/// Analyses carry the full report: syntax tree, HOL form, steps, and proof
/// tree.
#[test]
fn analyses_are_complete_reports() {
    let analysis = analyze("∀x. P x → P x").unwrap();

    assert!(analysis.visualization.contains("FORALL (∀)"));
    assert!(format!("{}", analysis.hol_term).contains("∀"));
    assert!(analysis.steps.len() >= 2);

    for (position, step) in analysis.steps.iter().enumerate() {
        assert_eq!(step.step, position + 1);
    }
}
