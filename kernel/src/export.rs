//! # Problem export
//!
//! Renders a unification problem — a list of term equations — into a
//! TPTP-like `thf` textual form, and optionally persists it under the
//! `exported_problems/` directory as a diagnostic artifact.  Every constant
//! occurring in the problem receives a `thf(…_type, type, …)` declaration;
//! the equations themselves become a single existential conjecture over the
//! problem's free variables.
//!
//! Types flatten to `>`-separated TPTP atoms prefixed with `$`.  Bound
//! variables render as `BV_<index>`, free variables render uppercased, and
//! constants are quoted.  The output is deliberately close enough to TPTP
//! THF for a human to eyeball, but this module makes no promise of strict
//! conformance.
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

use crate::{
    _type::Type,
    declaration::{Constant, Declaration, FreeVariable},
    name::Name,
    term::Term,
};
use log::info;
use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

////////////////////////////////////////////////////////////////////////////////
// Miscellaneous material.
////////////////////////////////////////////////////////////////////////////////

/// The directory problems are exported into, relative to the working
/// directory of the process.
pub const EXPORT_DIRECTORY: &str = "exported_problems";

////////////////////////////////////////////////////////////////////////////////
// Rendering.
////////////////////////////////////////////////////////////////////////////////

/// Renders a problem into its TPTP-like textual form.
pub fn render_problem(name: &str, equations: &[(Term, Term)]) -> String {
    let mut buffer = String::new();

    buffer.push_str(&format!("% Problem: {}.\n", name));

    for constant in collect_constants(equations) {
        buffer.push_str(&format!(
            "thf({}_type, type, '{}': {}).\n",
            constant.name(),
            constant.name(),
            render_type(constant.tau())
        ));
    }

    let variables = collect_free_variables(equations);

    let binder = if variables.is_empty() {
        String::new()
    } else {
        let rendered: Vec<String> = variables
            .iter()
            .map(|variable| {
                format!(
                    "{}: {}",
                    render_name(variable.name()),
                    render_type(variable.tau())
                )
            })
            .collect();

        format!("? [{}] : ", rendered.join(", "))
    };

    let conjuncts: Vec<String> = equations
        .iter()
        .map(|(left, right)| {
            format!("({} = {})", render_term(left), render_term(right))
        })
        .collect();

    buffer.push_str(&format!(
        "thf({}, conjecture, {}( {} )).\n",
        name,
        binder,
        conjuncts.join(" & ")
    ));

    buffer
}

/// Renders a problem and writes it to `exported_problems/<name>.p`,
/// creating the directory if necessary.  Returns the path written.
pub fn write_problem(
    name: &str,
    equations: &[(Term, Term)],
) -> io::Result<PathBuf> {
    write_problem_under(Path::new(EXPORT_DIRECTORY), name, equations)
}

/// Renders a problem and writes it to `<directory>/<name>.p`.
pub fn write_problem_under(
    directory: &Path,
    name: &str,
    equations: &[(Term, Term)],
) -> io::Result<PathBuf> {
    fs::create_dir_all(directory)?;

    let path = directory.join(format!("{}.p", name));

    fs::write(&path, render_problem(name, equations))?;

    info!("Problem {} exported to {}.", name, path.display());

    Ok(path)
}

////////////////////////////////////////////////////////////////////////////////
// Rendering helpers.
////////////////////////////////////////////////////////////////////////////////

/// Flattens a type to its `>`-separated TPTP form with `$`-prefixed atoms.
fn render_type(tau: &Type) -> String {
    if tau.is_base() {
        return format!("${}", tau.goal());
    }

    let mut pieces: Vec<String> = tau
        .arguments()
        .iter()
        .map(|argument| {
            if argument.is_function() {
                format!("({})", render_type(argument))
            } else {
                render_type(argument)
            }
        })
        .collect();

    pieces.push(format!("${}", tau.goal()));

    pieces.join(" > ")
}

/// Renders a free-variable name: caller-supplied names uppercase, helper
/// identities with an `H` prefix.
fn render_name(name: &Name) -> String {
    match name {
        Name::Named(name) => name.to_uppercase(),
        Name::Helper(identity) => format!("H{}", identity),
    }
}

/// Renders a term: binder blocks as `^ [BV_i: τ, …] :`, applied spines with
/// `@`, constants quoted, bound variables as `BV_<index>`.
fn render_term(term: &Term) -> String {
    let mut buffer = String::new();

    if !term.binders().is_empty() {
        let binders: Vec<String> = term
            .binders()
            .iter()
            .map(|binder| {
                format!("BV_{}: {}", binder.index(), render_type(binder.tau()))
            })
            .collect();

        buffer.push_str(&format!("^ [{}] : ", binders.join(", ")));
    }

    let head = match term.head() {
        Declaration::Free(variable) => render_name(variable.name()),
        Declaration::Constant(constant) => format!("'{}'", constant.name()),
        Declaration::Bound(bound) => format!("BV_{}", bound.index()),
    };

    if term.arguments().is_empty() {
        buffer.push_str(&head);
        return buffer;
    }

    let mut spine = head;

    for argument in term.arguments() {
        spine.push_str(&format!(" @ {}", render_argument(argument)));
    }

    buffer.push_str(&format!("({})", spine));

    buffer
}

/// Renders an argument position, parenthesizing compound terms.
fn render_argument(argument: &Term) -> String {
    if argument.binders().is_empty() && argument.arguments().is_empty() {
        render_term(argument)
    } else {
        format!("({})", render_term(argument))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Symbol collection.
////////////////////////////////////////////////////////////////////////////////

/// Collects every constant occurring in the problem, without duplicates, in
/// first-occurrence order.
fn collect_constants(equations: &[(Term, Term)]) -> Vec<Constant> {
    let mut constants = Vec::new();

    for (left, right) in equations {
        walk_constants(left, &mut constants);
        walk_constants(right, &mut constants);
    }

    constants
}

fn walk_constants(term: &Term, constants: &mut Vec<Constant>) {
    if let Some(constant) = term.head().split_constant() {
        if !constants.contains(constant) {
            constants.push(constant.clone());
        }
    }

    for argument in term.arguments() {
        walk_constants(argument, constants);
    }
}

/// Collects every free variable occurring in the problem, without
/// duplicates, in first-occurrence order.
fn collect_free_variables(equations: &[(Term, Term)]) -> Vec<FreeVariable> {
    let mut variables = Vec::new();

    for (left, right) in equations {
        for variable in left
            .free_variables()
            .iter()
            .chain(right.free_variables())
        {
            if !variables.contains(variable) {
                variables.push(variable.clone());
            }
        }
    }

    variables
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////

/// Tests for problem-export functionality.
#[cfg(test)]
mod test {
    use crate::{
        _type::Type,
        export::render_problem,
        term::Term,
    };

    /// The type `ι → ι`.
    fn unary() -> Type {
        Type::function("i", vec![Type::individual()])
    }

    /// Tests that constants are declared and the conjecture quantifies the
    /// problem's free variables.
    #[test]
    pub fn export_test0() {
        let x = Term::free_variable("x", Type::individual());
        let f = Term::constant("f", unary());
        let a = Term::constant("a", Type::individual());

        let rendered = render_problem(
            "simple",
            &[(
                Term::apply(&f, &x).unwrap(),
                Term::apply(&f, &a).unwrap(),
            )],
        );

        assert!(rendered.contains("thf(f_type, type, 'f': $i > $i)."));
        assert!(rendered.contains("thf(a_type, type, 'a': $i)."));
        assert!(rendered.contains("? [X: $i]"));
        assert!(rendered.contains("('f' @ X) = ('f' @ 'a')"));
    }

    /// Tests that binder blocks render with `BV_` names and flattened
    /// types.
    #[test]
    pub fn export_test1() {
        let f = Term::constant("f", unary());

        let rendered = render_problem("eta", &[(f.clone(), f)]);

        assert!(rendered.contains("^ [BV_1: $i]"));
        assert!(rendered.contains("'f' @ BV_1"));
    }
}
