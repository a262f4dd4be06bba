//! # Semantic-tableau prover
//!
//! Classifies a surface formula as a tautology, a contradiction, or
//! contingent by refutation: first the formula's negation is put at the root
//! of a tableau and expanded with the α/β/γ/δ rules; if every branch
//! closes, the formula is a tautology.  Otherwise the formula itself is
//! refuted the same way; if that closes, it is a contradiction, and if
//! neither attempt closes the formula is contingent.  Each refutation
//! attempt works within a fixed budget of twenty rule applications.
//!
//! Branches are plain formula lists, copied whenever a β-rule forks.  A
//! branch closes when it contains a formula and its negation, when it
//! contains a biconditional whose sides are a formula and its negation, or
//! when it contains the Russell pattern: a (possibly negated) biconditional
//! whose printed sides are complementary and mention a Skolem constant.
//! The Russell check is the one place the prover compares printed forms
//! rather than structure.
//!
//! The quantifier rules instantiate once per branch, recorded with marker
//! entries; a universal whose marker is present is never expanded again.
//! This keeps the search finite at the cost of completeness for formulas
//! that need several instances of one universal — such formulas classify as
//! contingent.  Instantiation prefers a constant already on the branch and
//! mints a fresh one otherwise: numbered `c_k` constants for universals,
//! Skolem-named `{var}_sk_{k}` witnesses for the negated-quantifier and
//! existential rules.  A negated universal whose body self-applies its
//! bound variable re-uses the branch's newest Skolem constant, which is
//! what steers Russell-style formulas into the paradox closure.
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
    ast::{Ast, BinaryOperator, MarkerKind, QuantifierKind},
    visualize::rule_block,
};
use log::{debug, info};
use std::{
    fmt,
    fmt::{Display, Formatter},
};

////////////////////////////////////////////////////////////////////////////////
// Miscellaneous material.
////////////////////////////////////////////////////////////////////////////////

/// The rule-application budget of one refutation attempt.
pub const STEP_BUDGET: usize = 20;

////////////////////////////////////////////////////////////////////////////////
// Verdicts, steps, proofs.
////////////////////////////////////////////////////////////////////////////////

/// The three-way classification the prover produces.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Verdict {
    /// The negation was refuted: the formula holds in every valuation.
    Tautology,
    /// The formula itself was refuted: it holds in no valuation.
    Contradiction,
    /// Neither refutation closed within the budget.
    Contingent,
}

/// The four tableau rule classes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RuleClass {
    /// Non-branching decomposition.
    Alpha,
    /// Branching decomposition.
    Beta,
    /// Universal-family instantiation (non-consuming, marker-gated).
    Gamma,
    /// Existential-family witnessing.
    Delta,
}

/// One recorded rule application.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofStep {
    /// The 1-based position of the step in its proof.
    pub index: usize,
    /// The class of the applied rule.
    pub rule: RuleClass,
    /// A one-line description of the application.
    pub description: String,
    /// The principal formula, in canonical text form.
    pub formula: String,
}

/// The result of classification: the verdict, the recorded steps, and the
/// rule-by-rule ASCII proof tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proof {
    /// The classification.
    pub verdict: Verdict,
    /// The recorded rule applications, in order.
    pub steps: Vec<ProofStep>,
    /// One ASCII block per rule application, plus attempt headers.
    pub tree: Vec<String>,
    /// How many rule applications the deciding search performed.
    pub steps_used: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Classification.
////////////////////////////////////////////////////////////////////////////////

/// Classifies a formula by double refutation.
pub fn prove(ast: &Ast) -> Proof {
    info!("Classifying {}.", ast);

    let negated = refute(Ast::negation(ast.clone()));

    if negated.closed {
        info!("Negation refuted: {} is a tautology.", ast);

        return assemble_proof(
            Verdict::Tautology,
            vec![(format!("refuting ¬{}", ast), negated)],
        );
    }

    let direct = refute(ast.clone());

    if direct.closed {
        info!("Formula refuted: {} is a contradiction.", ast);

        return assemble_proof(
            Verdict::Contradiction,
            vec![(format!("refuting {}", ast), direct)],
        );
    }

    info!("Neither refutation closed: {} is contingent.", ast);

    assemble_proof(
        Verdict::Contingent,
        vec![
            (format!("refuting ¬{}", ast), negated),
            (format!("refuting {}", ast), direct),
        ],
    )
}

/// Merges one or two refutation attempts into a proof record, renumbering
/// the steps.
fn assemble_proof(
    verdict: Verdict,
    attempts: Vec<(String, Refutation)>,
) -> Proof {
    let mut steps = Vec::new();
    let mut tree = Vec::new();
    let mut steps_used = 0;

    for (header, attempt) in attempts {
        tree.push(format!(
            "=== {} ({}) ===",
            header,
            if attempt.closed { "closed" } else { "open" }
        ));

        for mut step in attempt.steps {
            step.index = steps.len() + 1;
            steps.push(step);
        }

        tree.extend(attempt.tree);
        steps_used += attempt.steps_used;
    }

    Proof {
        verdict,
        steps,
        tree,
        steps_used,
    }
}

////////////////////////////////////////////////////////////////////////////////
// Refutation search.
////////////////////////////////////////////////////////////////////////////////

/// One refutation attempt's outcome.
struct Refutation {
    closed: bool,
    steps: Vec<ProofStep>,
    tree: Vec<String>,
    steps_used: usize,
}

/// A branch: the formulas and markers accumulated along one path of the
/// tableau.
type Branch = Vec<Ast>;

/// Expands a tableau rooted at `start` until every branch closes, no rule
/// applies, or the step budget runs out.
fn refute(start: Ast) -> Refutation {
    let mut branches: Vec<Branch> = vec![vec![start]];
    let mut steps = Vec::new();
    let mut tree = Vec::new();
    let mut steps_used = 0;

    while steps_used < STEP_BUDGET {
        if branches.iter().all(|branch| branch_closed(branch)) {
            break;
        }

        // The first open branch holding an expandable formula.
        let target = branches.iter().enumerate().find_map(|(index, branch)| {
            if branch_closed(branch) {
                return None;
            }

            first_expandable(branch)
                .map(|formula_index| (index, formula_index))
        });

        let (branch_index, formula_index) = match target {
            Some(target) => target,
            None => break,
        };

        steps_used += 1;

        let step = expand(&mut branches, branch_index, formula_index);

        debug!("Step {}: {}.", steps_used, step.description);

        tree.push(step.block.clone());
        steps.push(ProofStep {
            index: steps_used,
            rule: step.rule,
            description: step.description,
            formula: step.formula,
        });
    }

    Refutation {
        closed: branches.iter().all(|branch| branch_closed(branch)),
        steps,
        tree,
        steps_used,
    }
}

////////////////////////////////////////////////////////////////////////////////
// Branch closure.
////////////////////////////////////////////////////////////////////////////////

/// Returns `true` iff the branch is closed: it contains a structural
/// complement pair, a biconditional with complementary sides, or the
/// Russell pattern.
fn branch_closed(branch: &Branch) -> bool {
    let formulas: Vec<&Ast> = branch
        .iter()
        .filter(|formula| !formula.is_marker())
        .collect();

    for formula in &formulas {
        if let Some(operand) = formula.split_negation() {
            if formulas.iter().any(|other| *other == operand) {
                return true;
            }
        }

        if biconditional_complement(formula) {
            return true;
        }

        if russell_pattern(formula) {
            return true;
        }
    }

    false
}

/// A biconditional whose sides are a formula and its negation is itself
/// unsatisfiable and closes the branch.  Structural comparison only.
fn biconditional_complement(formula: &Ast) -> bool {
    if let Ast::Binary {
        operator: BinaryOperator::Biconditional,
        left,
        right,
    } = formula
    {
        return right.split_negation() == Some(left)
            || left.split_negation() == Some(right);
    }

    false
}

/// The Russell-paradox closure: a biconditional — possibly under one
/// negation — whose printed sides are complementary and mention a Skolem
/// constant.  This is the single place formulas are compared by their
/// printed image instead of structurally.
fn russell_pattern(formula: &Ast) -> bool {
    let inner = match formula.split_negation() {
        Some(operand) => operand,
        None => formula,
    };

    if let Ast::Binary {
        operator: BinaryOperator::Biconditional,
        left,
        right,
    } = inner
    {
        let left = left.stringify();
        let right = right.stringify();

        let complementary = right == format!("¬{}", left)
            || left == format!("¬{}", right);

        return complementary
            && (left.contains("_sk_") || right.contains("_sk_"));
    }

    false
}

////////////////////////////////////////////////////////////////////////////////
// Rule selection.
////////////////////////////////////////////////////////////////////////////////

/// The expansion rules.
enum Rule {
    AlphaConjunction(Ast, Ast),
    AlphaNegatedDisjunction(Ast, Ast),
    AlphaNegatedImplication(Ast, Ast),
    AlphaDoubleNegation(Ast),
    BetaDisjunction(Ast, Ast),
    BetaImplication(Ast, Ast),
    BetaNegatedConjunction(Ast, Ast),
    BetaBiconditional(Ast, Ast),
    BetaNegatedBiconditional(Ast, Ast),
    GammaUniversal { variable: String, body: Ast },
    GammaNegatedExistential { variable: String, body: Ast },
    DeltaNegatedUniversal { variable: String, body: Ast },
    DeltaExistential { variable: String, body: Ast },
}

/// Returns the index of the first formula on the branch a rule applies to.
fn first_expandable(branch: &Branch) -> Option<usize> {
    branch
        .iter()
        .position(|formula| rule_for(formula, branch).is_some())
}

/// Matches a formula against the rule table.  Universal-family formulas
/// whose instantiation marker is already on the branch do not match.
fn rule_for(formula: &Ast, branch: &Branch) -> Option<Rule> {
    if formula.is_marker() {
        return None;
    }

    match formula {
        Ast::Binary {
            operator: BinaryOperator::Conjunction,
            left,
            right,
        } => Some(Rule::AlphaConjunction(
            (**left).clone(),
            (**right).clone(),
        )),
        Ast::Binary {
            operator: BinaryOperator::Disjunction,
            left,
            right,
        } => Some(Rule::BetaDisjunction(
            (**left).clone(),
            (**right).clone(),
        )),
        Ast::Binary {
            operator: BinaryOperator::Implication,
            left,
            right,
        } => Some(Rule::BetaImplication(
            (**left).clone(),
            (**right).clone(),
        )),
        Ast::Binary {
            operator: BinaryOperator::Biconditional,
            left,
            right,
        } => Some(Rule::BetaBiconditional(
            (**left).clone(),
            (**right).clone(),
        )),
        Ast::Quantifier {
            quantifier: QuantifierKind::Universal,
            variable,
            body,
        } => {
            if marker_present(
                branch,
                MarkerKind::InstantiatedUniversal,
                formula,
            ) {
                return None;
            }

            Some(Rule::GammaUniversal {
                variable: variable.binder_name()?.to_string(),
                body: (**body).clone(),
            })
        }
        Ast::Quantifier {
            quantifier: QuantifierKind::Existential,
            variable,
            body,
        }
        | Ast::Quantifier {
            quantifier: QuantifierKind::UniqueExistential,
            variable,
            body,
        } => Some(Rule::DeltaExistential {
            variable: variable.binder_name()?.to_string(),
            body: (**body).clone(),
        }),
        Ast::Negation { operand } => match &**operand {
            Ast::Negation { operand } => {
                Some(Rule::AlphaDoubleNegation((**operand).clone()))
            }
            Ast::Binary {
                operator: BinaryOperator::Disjunction,
                left,
                right,
            } => Some(Rule::AlphaNegatedDisjunction(
                (**left).clone(),
                (**right).clone(),
            )),
            Ast::Binary {
                operator: BinaryOperator::Implication,
                left,
                right,
            } => Some(Rule::AlphaNegatedImplication(
                (**left).clone(),
                (**right).clone(),
            )),
            Ast::Binary {
                operator: BinaryOperator::Conjunction,
                left,
                right,
            } => Some(Rule::BetaNegatedConjunction(
                (**left).clone(),
                (**right).clone(),
            )),
            Ast::Binary {
                operator: BinaryOperator::Biconditional,
                left,
                right,
            } => Some(Rule::BetaNegatedBiconditional(
                (**left).clone(),
                (**right).clone(),
            )),
            Ast::Quantifier {
                quantifier: QuantifierKind::Universal,
                variable,
                body,
            } => {
                if marker_present(
                    branch,
                    MarkerKind::InstantiatedNegatedUniversal,
                    formula,
                ) {
                    return None;
                }

                Some(Rule::DeltaNegatedUniversal {
                    variable: variable.binder_name()?.to_string(),
                    body: (**body).clone(),
                })
            }
            Ast::Quantifier {
                quantifier: QuantifierKind::Existential,
                variable,
                body,
            } => {
                if marker_present(
                    branch,
                    MarkerKind::InstantiatedNegatedExistential,
                    formula,
                ) {
                    return None;
                }

                Some(Rule::GammaNegatedExistential {
                    variable: variable.binder_name()?.to_string(),
                    body: (**body).clone(),
                })
            }
            _ => None,
        },
        // Equality and the remaining operators are atomic for the tableau.
        _ => None,
    }
}

/// Returns `true` iff the branch carries a marker of the given kind for the
/// given original formula.
fn marker_present(branch: &Branch, kind: MarkerKind, original: &Ast) -> bool {
    branch.iter().any(|entry| {
        matches!(
            entry,
            Ast::Marker { kind: k, original: o }
                if *k == kind && **o == *original
        )
    })
}

////////////////////////////////////////////////////////////////////////////////
// Rule application.
////////////////////////////////////////////////////////////////////////////////

/// What one expansion reports back to the search loop.
struct Expansion {
    rule: RuleClass,
    description: String,
    formula: String,
    block: String,
}

/// Applies the selected rule to `branches[branch_index][formula_index]`.
fn expand(
    branches: &mut Vec<Branch>,
    branch_index: usize,
    formula_index: usize,
) -> Expansion {
    let formula = branches[branch_index][formula_index].clone();
    let rule = rule_for(&formula, &branches[branch_index])
        .expect("The search loop only selects expandable formulas.");

    let printed = formula.stringify();

    match rule {
        Rule::AlphaConjunction(a, b) => alpha(
            branches,
            branch_index,
            formula_index,
            &printed,
            "∧",
            vec![a, b],
        ),
        Rule::AlphaNegatedDisjunction(a, b) => alpha(
            branches,
            branch_index,
            formula_index,
            &printed,
            "¬∨",
            vec![Ast::negation(a), Ast::negation(b)],
        ),
        Rule::AlphaNegatedImplication(a, b) => alpha(
            branches,
            branch_index,
            formula_index,
            &printed,
            "¬→",
            vec![a, Ast::negation(b)],
        ),
        Rule::AlphaDoubleNegation(a) => alpha(
            branches,
            branch_index,
            formula_index,
            &printed,
            "¬¬",
            vec![a],
        ),
        Rule::BetaDisjunction(a, b) => beta(
            branches,
            branch_index,
            formula_index,
            &printed,
            "∨",
            vec![a],
            vec![b],
        ),
        Rule::BetaImplication(a, b) => beta(
            branches,
            branch_index,
            formula_index,
            &printed,
            "→",
            vec![Ast::negation(a)],
            vec![b],
        ),
        Rule::BetaNegatedConjunction(a, b) => beta(
            branches,
            branch_index,
            formula_index,
            &printed,
            "¬∧",
            vec![Ast::negation(a)],
            vec![Ast::negation(b)],
        ),
        Rule::BetaBiconditional(a, b) => {
            let both = Ast::binary(
                BinaryOperator::Conjunction,
                a.clone(),
                b.clone(),
            );
            let neither = Ast::binary(
                BinaryOperator::Conjunction,
                Ast::negation(a),
                Ast::negation(b),
            );

            beta(
                branches,
                branch_index,
                formula_index,
                &printed,
                "↔",
                vec![both],
                vec![neither],
            )
        }
        Rule::BetaNegatedBiconditional(a, b) => {
            let first = Ast::binary(
                BinaryOperator::Conjunction,
                a.clone(),
                Ast::negation(b.clone()),
            );
            let second = Ast::binary(
                BinaryOperator::Conjunction,
                Ast::negation(a),
                b,
            );

            beta(
                branches,
                branch_index,
                formula_index,
                &printed,
                "¬↔",
                vec![first],
                vec![second],
            )
        }
        Rule::GammaUniversal { variable, body } => gamma(
            branches,
            branch_index,
            formula_index,
            &printed,
            "∀",
            MarkerKind::InstantiatedUniversal,
            &variable,
            body,
            false,
            WitnessNaming::Numbered,
        ),
        Rule::GammaNegatedExistential { variable, body } => gamma(
            branches,
            branch_index,
            formula_index,
            &printed,
            "¬∃",
            MarkerKind::InstantiatedNegatedExistential,
            &variable,
            body,
            true,
            WitnessNaming::Skolem,
        ),
        Rule::DeltaNegatedUniversal { variable, body } => {
            delta_negated_universal(
                branches,
                branch_index,
                formula_index,
                &printed,
                &variable,
                body,
            )
        }
        Rule::DeltaExistential { variable, body } => delta_existential(
            branches,
            branch_index,
            formula_index,
            &printed,
            &variable,
            body,
        ),
    }
}

/// Applies a non-branching rule: the principal formula is consumed and the
/// components join the branch.
fn alpha(
    branches: &mut Vec<Branch>,
    branch_index: usize,
    formula_index: usize,
    printed: &str,
    name: &str,
    components: Vec<Ast>,
) -> Expansion {
    branches[branch_index].remove(formula_index);

    let children: Vec<String> = components
        .iter()
        .map(|component| component.stringify())
        .collect();

    branches[branch_index].extend(components);

    Expansion {
        rule: RuleClass::Alpha,
        description: format!("α-rule ({}) on {}", name, printed),
        formula: printed.to_string(),
        block: rule_block(&format!("[α {}] {}", name, printed), &children),
    }
}

/// Applies a branching rule: the branch is replaced by two copies, one per
/// alternative.
fn beta(
    branches: &mut Vec<Branch>,
    branch_index: usize,
    formula_index: usize,
    printed: &str,
    name: &str,
    first: Vec<Ast>,
    second: Vec<Ast>,
) -> Expansion {
    let mut base = branches[branch_index].clone();
    base.remove(formula_index);

    let mut left = base.clone();
    let mut right = base;

    let children = vec![
        format!(
            "branch 1: {}",
            first
                .iter()
                .map(Ast::stringify)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        format!(
            "branch 2: {}",
            second
                .iter()
                .map(Ast::stringify)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    ];

    left.extend(first);
    right.extend(second);

    branches[branch_index] = left;
    branches.insert(branch_index + 1, right);

    Expansion {
        rule: RuleClass::Beta,
        description: format!("β-rule ({}) on {}", name, printed),
        formula: printed.to_string(),
        block: rule_block(&format!("[β {}] {}", name, printed), &children),
    }
}

/// How a fresh witness is named when no branch constant is re-usable.
enum WitnessNaming {
    /// `c_k`, `k` one above the largest numbered constant on the branch.
    Numbered,
    /// `{var}_sk_{k}`, `k` one above the number of constants on the branch.
    Skolem,
}

/// Applies a universal-family rule: the instance and a marker join the
/// branch; the principal formula stays.
#[allow(clippy::too_many_arguments)]
fn gamma(
    branches: &mut Vec<Branch>,
    branch_index: usize,
    formula_index: usize,
    printed: &str,
    name: &str,
    marker: MarkerKind,
    variable: &str,
    body: Ast,
    negate: bool,
    naming: WitnessNaming,
) -> Expansion {
    let branch = &branches[branch_index];

    let witness = match most_recent_constant(branch) {
        Some(existing) => existing,
        None => mint_witness(branch, variable, naming),
    };

    let original = branches[branch_index][formula_index].clone();

    let mut instance =
        substitute(&body, variable, &Ast::identifier(witness.clone()));

    if negate {
        instance = Ast::negation(instance);
    }

    let child = format!("instantiate {} ≔ {}: {}", variable, witness, instance);

    branches[branch_index].push(instance);
    branches[branch_index].push(Ast::marker(marker, original));

    Expansion {
        rule: RuleClass::Gamma,
        description: format!("γ-rule ({}) on {}", name, printed),
        formula: printed.to_string(),
        block: rule_block(&format!("[γ {}] {}", name, printed), &[child]),
    }
}

/// Applies the negated-universal rule: non-consuming and marker-gated like
/// the γ rules, but Skolem-named like the δ rules.  A body that
/// self-applies its bound variable re-uses the branch's newest Skolem
/// constant; this is the device that steers Russell-style formulas into the
/// paradox closure.
fn delta_negated_universal(
    branches: &mut Vec<Branch>,
    branch_index: usize,
    formula_index: usize,
    printed: &str,
    variable: &str,
    body: Ast,
) -> Expansion {
    let branch = &branches[branch_index];

    let witness = if contains_self_application(&body, variable) {
        most_recent_skolem_constant(branch).unwrap_or_else(|| {
            mint_witness(branch, variable, WitnessNaming::Skolem)
        })
    } else {
        mint_witness(branch, variable, WitnessNaming::Skolem)
    };

    let original = branches[branch_index][formula_index].clone();

    let instance = Ast::negation(substitute(
        &body,
        variable,
        &Ast::identifier(witness.clone()),
    ));

    let child =
        format!("instantiate {} ≔ {}: {}", variable, witness, instance);

    branches[branch_index].push(instance);
    branches[branch_index].push(Ast::marker(
        MarkerKind::InstantiatedNegatedUniversal,
        original,
    ));

    Expansion {
        rule: RuleClass::Delta,
        description: format!("δ-rule (¬∀) on {}", printed),
        formula: printed.to_string(),
        block: rule_block(&format!("[δ ¬∀] {}", printed), &[child]),
    }
}

/// Applies an existential rule: the principal formula is consumed and
/// replaced by its Skolem instance.
fn delta_existential(
    branches: &mut Vec<Branch>,
    branch_index: usize,
    formula_index: usize,
    printed: &str,
    variable: &str,
    body: Ast,
) -> Expansion {
    let witness = mint_witness(
        &branches[branch_index],
        variable,
        WitnessNaming::Skolem,
    );

    let instance =
        substitute(&body, variable, &Ast::identifier(witness.clone()));

    let child =
        format!("witness {} ≔ {}: {}", variable, witness, instance);

    branches[branch_index].remove(formula_index);
    branches[branch_index].push(instance);

    Expansion {
        rule: RuleClass::Delta,
        description: format!("δ-rule (∃) on {}", printed),
        formula: printed.to_string(),
        block: rule_block(&format!("[δ ∃] {}", printed), &[child]),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Witness bookkeeping.
////////////////////////////////////////////////////////////////////////////////

/// Mints a fresh witness name for a branch under the given naming scheme.
fn mint_witness(
    branch: &Branch,
    variable: &str,
    naming: WitnessNaming,
) -> String {
    let constants = branch_constants(branch);

    match naming {
        WitnessNaming::Numbered => {
            let largest = constants
                .iter()
                .filter_map(|name| {
                    name.strip_prefix("c_")
                        .and_then(|digits| digits.parse::<usize>().ok())
                })
                .max()
                .unwrap_or(0);

            format!("c_{}", largest + 1)
        }
        WitnessNaming::Skolem => {
            format!("{}_sk_{}", variable, constants.len() + 1)
        }
    }
}

/// The distinct instantiation constants mentioned on the branch, in order
/// of first appearance.
fn branch_constants(branch: &Branch) -> Vec<String> {
    let mut constants = Vec::new();

    for formula in branch.iter().filter(|entry| !entry.is_marker()) {
        collect_constants(formula, &mut constants);
    }

    constants
}

/// The most recently introduced constant on the branch, if any.
fn most_recent_constant(branch: &Branch) -> Option<String> {
    branch_constants(branch).pop()
}

/// The most recently introduced Skolem-named constant on the branch, if
/// any.
fn most_recent_skolem_constant(branch: &Branch) -> Option<String> {
    branch_constants(branch)
        .into_iter()
        .filter(|name| name.contains("_sk_"))
        .last()
}

/// Returns `true` iff the name is an instantiation constant: `c_<digits>`
/// or Skolem-named.
fn is_instantiation_constant(name: &str) -> bool {
    name.contains("_sk_")
        || name
            .strip_prefix("c_")
            .map(|digits| {
                !digits.is_empty()
                    && digits.chars().all(|c| c.is_ascii_digit())
            })
            .unwrap_or(false)
}

/// Walks a formula collecting instantiation constants.
fn collect_constants(formula: &Ast, constants: &mut Vec<String>) {
    match formula {
        Ast::Variable { name } | Ast::Identifier { name } => {
            if is_instantiation_constant(name)
                && !constants.iter().any(|existing| existing == name)
            {
                constants.push(name.clone());
            }
        }
        Ast::TypedVariable { variable, .. } => {
            collect_constants(variable, constants)
        }
        Ast::Negation { operand } => collect_constants(operand, constants),
        Ast::Binary { left, right, .. } => {
            collect_constants(left, constants);
            collect_constants(right, constants);
        }
        Ast::Quantifier { body, .. } | Ast::Lambda { body, .. } => {
            collect_constants(body, constants)
        }
        Ast::Application { function, argument } => {
            collect_constants(function, constants);
            collect_constants(argument, constants);
        }
        Ast::Marker { .. } => (),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Formula substitution.
////////////////////////////////////////////////////////////////////////////////

/// Structurally replaces free occurrences of `name` by `replacement`,
/// refusing to descend under a quantifier or λ that rebinds the same name.
/// Self-applications `v(v)` rewrite in both positions through the ordinary
/// recursion into applications.
pub fn substitute(ast: &Ast, name: &str, replacement: &Ast) -> Ast {
    match ast {
        Ast::Variable { name: n } | Ast::Identifier { name: n } => {
            if n == name {
                replacement.clone()
            } else {
                ast.clone()
            }
        }
        Ast::TypedVariable { variable, .. } => {
            if variable.split_name() == Some(name) {
                replacement.clone()
            } else {
                ast.clone()
            }
        }
        Ast::Negation { operand } => {
            Ast::negation(substitute(operand, name, replacement))
        }
        Ast::Binary {
            operator,
            left,
            right,
        } => Ast::binary(
            *operator,
            substitute(left, name, replacement),
            substitute(right, name, replacement),
        ),
        Ast::Quantifier {
            quantifier,
            variable,
            body,
        } => {
            if variable.binder_name() == Some(name) {
                ast.clone()
            } else {
                Ast::quantifier(
                    *quantifier,
                    (**variable).clone(),
                    substitute(body, name, replacement),
                )
            }
        }
        Ast::Lambda { variable, body } => {
            if variable.binder_name() == Some(name) {
                ast.clone()
            } else {
                Ast::lambda(
                    (**variable).clone(),
                    substitute(body, name, replacement),
                )
            }
        }
        Ast::Application { function, argument } => Ast::application(
            substitute(function, name, replacement),
            substitute(argument, name, replacement),
        ),
        Ast::Marker { .. } => ast.clone(),
    }
}

/// Returns `true` iff the formula contains a self-application `v(v)` of the
/// given name, outside any rebinding binder.
fn contains_self_application(ast: &Ast, name: &str) -> bool {
    match ast {
        Ast::Application { function, argument } => {
            (function.split_name() == Some(name)
                && argument.split_name() == Some(name))
                || contains_self_application(function, name)
                || contains_self_application(argument, name)
        }
        Ast::Negation { operand } => {
            contains_self_application(operand, name)
        }
        Ast::Binary { left, right, .. } => {
            contains_self_application(left, name)
                || contains_self_application(right, name)
        }
        Ast::Quantifier {
            variable, body, ..
        }
        | Ast::Lambda { variable, body } => {
            variable.binder_name() != Some(name)
                && contains_self_application(body, name)
        }
        _ => false,
    }
}

////////////////////////////////////////////////////////////////////////////////
// Trait implementations.
////////////////////////////////////////////////////////////////////////////////

/// Pretty-printing for verdicts, in the lowercase form the driver prints.
impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Verdict::Tautology => write!(f, "tautology"),
            Verdict::Contradiction => write!(f, "contradiction"),
            Verdict::Contingent => write!(f, "contingent"),
        }
    }
}

/// Pretty-printing for rule classes.
impl Display for RuleClass {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RuleClass::Alpha => write!(f, "α"),
            RuleClass::Beta => write!(f, "β"),
            RuleClass::Gamma => write!(f, "γ"),
            RuleClass::Delta => write!(f, "δ"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////
