//! # The analysis pipeline
//!
//! The end-to-end orchestration: parse a surface string, lower the syntax
//! tree to the higher-order term model, classify it with the tableau
//! prover, and collect the renderings.  The first error encountered — in
//! practice only a parse error, since lowering and proving are total —
//! propagates out and no downstream stage runs.
//!
//! The step reporter threads the phases together: one record for parsing,
//! one for lowering (noting soft lowering errors), then one per tableau
//! rule application.
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
    ast::Ast,
    hol::{lower, HolTerm},
    parser::{parse, ParseError},
    tableau::{prove, Proof, Verdict},
    visualize::expression_tree,
};
use log::info;

////////////////////////////////////////////////////////////////////////////////
// Step records.
////////////////////////////////////////////////////////////////////////////////

/// One record in the pipeline's step list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StepRecord {
    /// The 1-based step number.
    pub step: usize,
    /// What the step did.
    pub description: String,
    /// The formula the step concerned, in canonical text form.
    pub formula: String,
}

////////////////////////////////////////////////////////////////////////////////
// Analyses, proper.
////////////////////////////////////////////////////////////////////////////////

/// Everything the pipeline produces for one expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Analysis {
    /// The expression as given.
    pub expression: String,
    /// The parsed syntax tree.
    pub parsed: Ast,
    /// The lowered higher-order term.
    pub hol_term: HolTerm,
    /// The tableau classification.
    pub verdict: Verdict,
    /// The ordered step records of the whole pipeline.
    pub steps: Vec<StepRecord>,
    /// The rule-by-rule ASCII proof tree.
    pub tree: Vec<String>,
    /// The indented ASCII tree of the syntax tree.
    pub visualization: String,
}

/// Runs the full pipeline on an expression string.
///
/// # Errors
///
/// Returns the `ParseError` if the expression does not parse; no other
/// stage is attempted in that case.
pub fn analyze(expression: &str) -> Result<Analysis, ParseError> {
    info!("Analyzing {:?}.", expression);

    let parsed = parse(expression)?;
    let hol_term = lower(&parsed);
    let proof = prove(&parsed);
    let visualization = expression_tree(&parsed);

    let steps = process_steps(expression, &parsed, &hol_term, &proof);

    Ok(Analysis {
        expression: expression.to_string(),
        parsed,
        hol_term,
        verdict: proof.verdict,
        steps,
        tree: proof.tree,
        visualization,
    })
}

/// Builds the ordered step list: parsing, lowering, then one record per
/// tableau rule application.
fn process_steps(
    expression: &str,
    parsed: &Ast,
    hol_term: &HolTerm,
    proof: &Proof,
) -> Vec<StepRecord> {
    let mut steps = Vec::new();

    steps.push(StepRecord {
        step: 1,
        description: format!("parsed {:?}", expression),
        formula: parsed.stringify(),
    });

    let lowering = if hol_term.has_unknown() {
        String::from(
            "lowered to HOL with unrecognized fragments (soft error)",
        )
    } else {
        String::from("lowered to HOL")
    };

    steps.push(StepRecord {
        step: 2,
        description: lowering,
        formula: format!("{}", hol_term),
    });

    for proof_step in &proof.steps {
        steps.push(StepRecord {
            step: steps.len() + 1,
            description: proof_step.description.clone(),
            formula: proof_step.formula.clone(),
        });
    }

    steps
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////
