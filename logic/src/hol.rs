//! # HOL lowering
//!
//! Maps the surface syntax tree onto a structured higher-order term model:
//! every atom becomes a symbol carrying an arrow-typed annotation from the
//! kernel's type model — the one piece of the kernel the surface pipeline
//! shares.  Connectives become curried constants at their fixed signatures;
//! quantifiers apply their constant to an abstraction over the bound
//! variable.
//!
//! Name classification follows the notation's conventions: the letters
//! `P`–`T` are predicate letters over individuals, any other single
//! uppercase letter is a propositional variable, lowercase identifiers are
//! function constants over individuals, capitalized identifiers are
//! predicates, `c_`-prefixed names are individual constants, and names
//! containing `_sk_` are Skolem constants minted by the prover.
//!
//! Lowering is total: anything the classification does not cover — a
//! marker reaching the lowering, a malformed annotation — becomes an
//! `Unknown` node wrapping the original syntax, which callers report as a
//! soft error rather than a failure.
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

use crate::ast::{Ast, BinaryOperator, QuantifierKind};
use kernel::_type::Type;
use lazy_static::lazy_static;
use std::{
    collections::HashMap,
    fmt,
    fmt::{Display, Formatter},
};

////////////////////////////////////////////////////////////////////////////////
// Connective signatures.
////////////////////////////////////////////////////////////////////////////////

lazy_static! {
    /// The fixed signatures of the logical constants: connectives over
    /// propositions, arithmetic over individuals, composition over one-place
    /// functions, and the quantifier constants over one-place predicates.
    static ref SIGNATURES: HashMap<&'static str, Type> = {
        let individual = Type::individual();
        let proposition = Type::proposition();
        let unary_function =
            Type::function("i", vec![Type::individual()]);
        let predicate =
            Type::function("o", vec![Type::individual()]);

        let mut table = HashMap::new();

        table.insert("¬", Type::function("o", vec![proposition.clone()]));

        for connective in &["∧", "∨", "→", "↔"] {
            table.insert(
                *connective,
                Type::function(
                    "o",
                    vec![proposition.clone(), proposition.clone()],
                ),
            );
        }

        table.insert(
            "=",
            Type::function(
                "o",
                vec![individual.clone(), individual.clone()],
            ),
        );

        for operator in &["+", "×"] {
            table.insert(
                *operator,
                Type::function(
                    "i",
                    vec![individual.clone(), individual.clone()],
                ),
            );
        }

        table.insert(
            "∘",
            Type::function(
                "i",
                vec![
                    unary_function.clone(),
                    unary_function.clone(),
                    individual.clone(),
                ],
            ),
        );

        for quantifier in &["∀", "∃", "∃!"] {
            table.insert(
                *quantifier,
                Type::function("o", vec![predicate.clone()]),
            );
        }

        table
    };
}

/// The predicate letters: single uppercase letters in this set lower to
/// predicate constants over individuals.
const PREDICATE_LETTERS: &[char] = &['P', 'Q', 'R', 'S', 'T'];

////////////////////////////////////////////////////////////////////////////////
// The term model, proper.
////////////////////////////////////////////////////////////////////////////////

/// Structured higher-order terms: symbols with type annotations,
/// applications, abstractions, and the `Unknown` soft-error node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HolTerm {
    /// A constant symbol at its annotated type.
    Constant { name: String, tau: Type },
    /// A variable symbol at its annotated type.
    Variable { name: String, tau: Type },
    /// An application of one term to another.
    Application {
        function: Box<HolTerm>,
        argument: Box<HolTerm>,
    },
    /// An abstraction over a named bound variable, optionally annotated.
    Abstraction {
        binder: String,
        annotation: Option<Type>,
        body: Box<HolTerm>,
    },
    /// Syntax the lowering does not cover, carried verbatim as a soft
    /// error.
    Unknown { original: Ast },
}

impl HolTerm {
    /// Returns `true` iff the term or any subterm is an `Unknown` node.
    pub fn has_unknown(&self) -> bool {
        match self {
            HolTerm::Constant { .. } | HolTerm::Variable { .. } => false,
            HolTerm::Application { function, argument } => {
                function.has_unknown() || argument.has_unknown()
            }
            HolTerm::Abstraction { body, .. } => body.has_unknown(),
            HolTerm::Unknown { .. } => true,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Lowering, proper.
////////////////////////////////////////////////////////////////////////////////

/// Lowers a surface formula to the higher-order term model.  Total: nodes
/// outside the classification become `Unknown`.
pub fn lower(ast: &Ast) -> HolTerm {
    match ast {
        Ast::Variable { name } | Ast::Identifier { name } => {
            classify_name(name, ast)
        }
        Ast::TypedVariable {
            variable,
            annotation,
        } => match (variable.split_name(), annotation.split_name()) {
            (Some(name), Some(annotation)) => HolTerm::Variable {
                name: name.to_string(),
                tau: annotation_type(annotation),
            },
            _ => HolTerm::Unknown {
                original: ast.clone(),
            },
        },
        Ast::Negation { operand } => HolTerm::Application {
            function: Box::new(signature_constant("¬")),
            argument: Box::new(lower(operand)),
        },
        Ast::Binary {
            operator,
            left,
            right,
        } => {
            let symbol = operator_symbol(operator);

            HolTerm::Application {
                function: Box::new(HolTerm::Application {
                    function: Box::new(signature_constant(symbol)),
                    argument: Box::new(lower(left)),
                }),
                argument: Box::new(lower(right)),
            }
        }
        Ast::Quantifier {
            quantifier,
            variable,
            body,
        } => {
            let symbol = quantifier_symbol(quantifier);

            HolTerm::Application {
                function: Box::new(signature_constant(symbol)),
                argument: Box::new(abstraction(variable, body)),
            }
        }
        Ast::Lambda { variable, body } => abstraction(variable, body),
        Ast::Application { function, argument } => HolTerm::Application {
            function: Box::new(lower(function)),
            argument: Box::new(lower(argument)),
        },
        Ast::Marker { .. } => HolTerm::Unknown {
            original: ast.clone(),
        },
    }
}

/// Builds an abstraction node from a binder (possibly annotated) and a
/// body.
fn abstraction(variable: &Ast, body: &Ast) -> HolTerm {
    let (binder, annotation) = match variable {
        Ast::TypedVariable {
            variable,
            annotation,
        } => (
            variable.split_name().unwrap_or("_").to_string(),
            annotation
                .split_name()
                .map(annotation_type),
        ),
        _ => (
            variable.split_name().unwrap_or("_").to_string(),
            None,
        ),
    };

    HolTerm::Abstraction {
        binder,
        annotation,
        body: Box::new(lower(body)),
    }
}

/// Classifies a bare name per the notation's conventions.
fn classify_name(name: &str, original: &Ast) -> HolTerm {
    if name.starts_with("c_") {
        return HolTerm::Constant {
            name: name.to_string(),
            tau: Type::individual(),
        };
    }

    if name.contains("_sk_") {
        return HolTerm::Constant {
            name: name.to_string(),
            tau: Type::individual(),
        };
    }

    let mut characters = name.chars();

    let first = match characters.next() {
        Some(first) => first,
        None => {
            return HolTerm::Unknown {
                original: original.clone(),
            }
        }
    };

    if name.chars().count() == 1 && first.is_ascii_uppercase() {
        if PREDICATE_LETTERS.contains(&first) {
            return HolTerm::Constant {
                name: name.to_string(),
                tau: Type::function("o", vec![Type::individual()]),
            };
        }

        return HolTerm::Variable {
            name: name.to_string(),
            tau: Type::proposition(),
        };
    }

    if first.is_lowercase() || first == '_' {
        return HolTerm::Constant {
            name: name.to_string(),
            tau: Type::function("i", vec![Type::individual()]),
        };
    }

    if first.is_uppercase() {
        return HolTerm::Constant {
            name: name.to_string(),
            tau: Type::function("o", vec![Type::individual()]),
        };
    }

    HolTerm::Unknown {
        original: original.clone(),
    }
}

/// Resolves a type-annotation name to a kernel type.
fn annotation_type(name: &str) -> Type {
    match name {
        "i" | "ι" => Type::individual(),
        "o" | "ο" => Type::proposition(),
        other => Type::base(other),
    }
}

/// Looks up a logical constant's signature.
fn signature_constant(symbol: &str) -> HolTerm {
    match SIGNATURES.get(symbol) {
        Some(tau) => HolTerm::Constant {
            name: symbol.to_string(),
            tau: tau.clone(),
        },
        None => HolTerm::Constant {
            name: symbol.to_string(),
            tau: Type::proposition(),
        },
    }
}

/// The surface symbol of a binary operator.
fn operator_symbol(operator: &BinaryOperator) -> &'static str {
    match operator {
        BinaryOperator::Conjunction => "∧",
        BinaryOperator::Disjunction => "∨",
        BinaryOperator::Implication => "→",
        BinaryOperator::Biconditional => "↔",
        BinaryOperator::Equality => "=",
        BinaryOperator::Addition => "+",
        BinaryOperator::Multiplication => "×",
        BinaryOperator::Composition => "∘",
    }
}

/// The surface symbol of a quantifier.
fn quantifier_symbol(quantifier: &QuantifierKind) -> &'static str {
    match quantifier {
        QuantifierKind::Universal => "∀",
        QuantifierKind::Existential => "∃",
        QuantifierKind::UniqueExistential => "∃!",
    }
}

////////////////////////////////////////////////////////////////////////////////
// Trait implementations.
////////////////////////////////////////////////////////////////////////////////

/// Pretty-printing for the term model: atoms annotated with their types,
/// applications parenthesized, abstractions with `λ`.
impl Display for HolTerm {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            HolTerm::Constant { name, tau } => {
                write!(f, "{}:({})", name, tau)
            }
            HolTerm::Variable { name, tau } => {
                write!(f, "{}:({})", name, tau)
            }
            HolTerm::Application { function, argument } => {
                write!(f, "({} {})", function, argument)
            }
            HolTerm::Abstraction {
                binder,
                annotation,
                body,
            } => match annotation {
                Some(tau) => write!(f, "(λ{}:({}). {})", binder, tau, body),
                None => write!(f, "(λ{}. {})", binder, body),
            },
            HolTerm::Unknown { original } => {
                write!(f, "?unknown({})", original)
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////

/// Tests for lowering functionality.
#[cfg(test)]
mod test {
    use crate::{
        ast::Ast,
        hol::{lower, HolTerm},
        parser::parse,
    };
    use kernel::_type::Type;

    /// Tests the name-classification rules.
    #[test]
    pub fn hol_test0() {
        let predicate = lower(&Ast::variable("P"));
        let proposition = lower(&Ast::variable("A"));
        let function = lower(&Ast::identifier("succ"));
        let individual = lower(&Ast::identifier("c_1"));
        let skolem = lower(&Ast::identifier("x_sk_2"));

        assert_eq!(
            predicate,
            HolTerm::Constant {
                name: String::from("P"),
                tau: Type::function("o", vec![Type::individual()]),
            }
        );
        assert_eq!(
            proposition,
            HolTerm::Variable {
                name: String::from("A"),
                tau: Type::proposition(),
            }
        );
        assert_eq!(
            function,
            HolTerm::Constant {
                name: String::from("succ"),
                tau: Type::function("i", vec![Type::individual()]),
            }
        );
        assert_eq!(
            individual,
            HolTerm::Constant {
                name: String::from("c_1"),
                tau: Type::individual(),
            }
        );
        assert_eq!(
            skolem,
            HolTerm::Constant {
                name: String::from("x_sk_2"),
                tau: Type::individual(),
            }
        );
    }

    /// Tests that connectives lower to curried applications of their
    /// signature constants.
    #[test]
    pub fn hol_test1() {
        let lowered = lower(&parse("P x ∧ Q").unwrap());

        match lowered {
            HolTerm::Application { function, .. } => match *function {
                HolTerm::Application { function, .. } => {
                    assert_eq!(
                        *function,
                        HolTerm::Constant {
                            name: String::from("∧"),
                            tau: Type::function(
                                "o",
                                vec![
                                    Type::proposition(),
                                    Type::proposition(),
                                ],
                            ),
                        }
                    );
                }
                _ => panic!("expected a curried application"),
            },
            _ => panic!("expected an application"),
        }
    }

    /// Tests that quantifiers lower to their constant applied to an
    /// abstraction, with annotations preserved.
    #[test]
    pub fn hol_test2() {
        let lowered = lower(&parse("∀x:i. P x").unwrap());

        match lowered {
            HolTerm::Application { function, argument } => {
                assert!(matches!(
                    *function,
                    HolTerm::Constant { ref name, .. } if name == "∀"
                ));

                match *argument {
                    HolTerm::Abstraction {
                        ref binder,
                        ref annotation,
                        ..
                    } => {
                        assert_eq!(binder, "x");
                        assert_eq!(
                            annotation,
                            &Some(Type::individual())
                        );
                    }
                    _ => panic!("expected an abstraction"),
                }
            }
            _ => panic!("expected an application"),
        }
    }

    /// Tests that markers surface as `Unknown` soft errors rather than
    /// panics.
    #[test]
    pub fn hol_test3() {
        let marker = Ast::marker(
            crate::ast::MarkerKind::InstantiatedUniversal,
            Ast::variable("P"),
        );

        assert!(lower(&marker).has_unknown());
        assert!(!lower(&Ast::variable("P")).has_unknown());
    }
}
