//! # Entry point for the driver application
//!
//! The Refutary command line: analyze a single formula, or print the
//! explanation of a logical concept.  A completed analysis — including one
//! that ends in a parse error, which is printed as error text — exits with
//! code zero; only a failure of command-line parsing itself is non-zero.
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

mod explain;

use anyhow::Result;
use clap::{App, Arg};
use log::info;
use logic::analyze::analyze;

////////////////////////////////////////////////////////////////////////////////
// Useful constants.
////////////////////////////////////////////////////////////////////////////////

const APPLICATION_NAME: &str = "Refutary";
const ABOUT_MESSAGE: &str =
    "Analyzes formulas of higher-order logic: parsing, HOL lowering, and a \
     semantic-tableau classification.";
const AUTHOR_LIST: &str = "The Refutary Development Team.";
const VERSION_NUMBER: &str = "0.1.0";

////////////////////////////////////////////////////////////////////////////////
// Command-line parsing.
////////////////////////////////////////////////////////////////////////////////

/// Captures the command line arguments passed to the program.
struct CommandLineArguments {
    /// The formula to analyze, if one was given.
    formula: Option<String>,
    /// The concept to explain, if one was requested.
    explain: Option<String>,
}

/// Parses the command line arguments of the program, exiting with an error
/// code if this cannot be done successfully.  Otherwise, packs the command
/// line arguments into a `CommandLineArguments` value, which is returned.
fn parse_command_line_arguments() -> CommandLineArguments {
    let app = App::new(APPLICATION_NAME)
        .about(ABOUT_MESSAGE)
        .version(VERSION_NUMBER)
        .author(AUTHOR_LIST)
        .mut_arg("version", |arg| arg.short('v'))
        .arg(
            Arg::new("formula")
                .index(1)
                .help("The formula to analyze, e.g. \"¬(P ∧ Q) ↔ (¬P ∨ ¬Q)\""),
        )
        .arg(
            Arg::new("explain")
                .short('e')
                .long("explain")
                .takes_value(true)
                .value_name("CONCEPT")
                .help("Print the explanation of a logical concept"),
        );

    let matches = app.get_matches();

    CommandLineArguments {
        formula: matches.value_of("formula").map(String::from),
        explain: matches.value_of("explain").map(String::from),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Reporting.
////////////////////////////////////////////////////////////////////////////////

/// Runs and prints the full analysis of a formula.  Parse failures are
/// printed as error text; they are a completed analysis, not a crash.
fn report_analysis(formula: &str) {
    match analyze(formula) {
        Ok(analysis) => {
            println!("Expression: {}", analysis.expression);
            println!("Parsed:     {}", analysis.parsed);
            println!();
            println!("Syntax tree:");
            print!("{}", analysis.visualization);
            println!();
            println!("HOL form:   {}", analysis.hol_term);
            println!();
            println!("Verdict:    {}", analysis.verdict);
            println!();
            println!("Proof:");

            for block in &analysis.tree {
                println!("{}", block);
            }

            println!();
            println!("Steps:");

            for step in &analysis.steps {
                println!("  {}. {}", step.step, step.description);
            }
        }
        Err(error) => {
            println!("Error: {}", error);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Entry point.
////////////////////////////////////////////////////////////////////////////////

fn main() -> Result<()> {
    env_logger::init();

    let command_line_args = parse_command_line_arguments();

    if let Some(concept) = &command_line_args.explain {
        info!("Explaining concept {:?}.", concept);
        println!("{}", explain::explanation(concept));

        return Ok(());
    }

    if let Some(formula) = &command_line_args.formula {
        report_analysis(formula);

        return Ok(());
    }

    println!(
        "{}: pass a formula to analyze, or --explain <concept>.  See --help.",
        APPLICATION_NAME
    );

    Ok(())
}
