//! # End-to-end unification problems
//!
//! Larger problems exercised through the public kernel interface, each also
//! exported in the TPTP-like textual form as a diagnostic artifact, the way
//! the interactive harness does.
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

use kernel::{
    export::{write_problem, write_problem_under},
    numeral::{addition, multiplication, numeral, numeral_type, successor},
    substitution::apply_list,
    term::Term,
    unification::unify,
};

/// Builds the three-equation system
/// `{x·y + z = 7, x + y + z = 7, x·z + y = 8}`, whose unique solution over
/// the naturals is `(x, y, z) = (2, 2, 3)`.
fn linear_system() -> Vec<(Term, Term)> {
    let x = Term::free_variable("x", numeral_type());
    let y = Term::free_variable("y", numeral_type());
    let z = Term::free_variable("z", numeral_type());

    let first = addition(&multiplication(&x, &y).unwrap(), &z).unwrap();
    let second = addition(&addition(&x, &y).unwrap(), &z).unwrap();
    let third = addition(&multiplication(&x, &z).unwrap(), &y).unwrap();

    vec![
        (first, numeral(7)),
        (second, numeral(7)),
        (third, numeral(8)),
    ]
}

/// The linear system admits at least one complete solution at depth 50, and
/// every complete solution it reports actually proves the equalities.
#[test]
fn linear_system_solves() {
    let equations = linear_system();

    let outcome = unify(equations.clone(), true, 50);

    let complete: Vec<_> = outcome
        .solutions()
        .iter()
        .filter(|solution| solution.is_complete())
        .collect();

    assert!(!complete.is_empty());

    for solution in &complete {
        for (left, right) in &equations {
            assert_eq!(
                apply_list(solution.substitutions(), left),
                apply_list(solution.substitutions(), right)
            );
        }
    }
}

/// The intended assignment `(x, y, z) = (2, 2, 3)` is among the complete
/// solutions.
#[test]
fn linear_system_finds_intended_assignment() {
    let x = Term::free_variable("x", numeral_type());
    let y = Term::free_variable("y", numeral_type());
    let z = Term::free_variable("z", numeral_type());

    let outcome = unify(linear_system(), true, 50);

    let intended = outcome.solutions().iter().any(|solution| {
        solution.is_complete()
            && apply_list(solution.substitutions(), &x) == numeral(2)
            && apply_list(solution.substitutions(), &y) == numeral(2)
            && apply_list(solution.substitutions(), &z) == numeral(3)
    });

    assert!(intended);
}

/// Substitution application is idempotent on the solutions the engine
/// returns: applying a solution twice is the same as applying it once.
#[test]
fn solutions_are_idempotent() {
    let x = Term::free_variable("x", numeral_type());

    let left = addition(&x, &numeral(2)).unwrap();
    let right = numeral(5);

    let outcome = unify(vec![(left.clone(), right)], true, 20);

    assert!(!outcome.solutions().is_empty());

    for solution in outcome.solutions() {
        let once = apply_list(solution.substitutions(), &left);
        let twice = apply_list(solution.substitutions(), &once);

        assert_eq!(once, twice);
    }
}

/// The successor problem exports to the default `exported_problems/`
/// directory.
#[test]
fn successor_problem_exports() {
    let x = Term::free_variable("x", numeral_type());

    let path = write_problem(
        "succ_unknown",
        &[(successor(&x).unwrap(), numeral(2))],
    )
    .unwrap();

    assert!(path.ends_with("succ_unknown.p"));
    assert!(std::fs::read_to_string(path).unwrap().contains("? [X:"));
}

/// Problems round-trip through the exporter: the harness writes each
/// problem under `exported_problems/` and the rendered text names every
/// symbol involved.
#[test]
fn linear_system_exports() {
    let directory = std::env::temp_dir().join("refutary_exported_problems");

    let path =
        write_problem_under(&directory, "linear_system", &linear_system())
            .unwrap();

    let rendered = std::fs::read_to_string(path).unwrap();

    assert!(rendered.contains("conjecture"));
    assert!(rendered.contains("X:"));
    assert!(rendered.contains("Y:"));
    assert!(rendered.contains("Z:"));
    assert!(rendered.contains("BV_"));
}
