//! # Visualization
//!
//! Textual rendering of syntax trees and tableau rule applications: an
//! indented ASCII tree of an AST with symbolic node labels, and one compact
//! ASCII block per tableau rule application, distinguishing the α/β/γ/δ
//! classes in the block header.
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

////////////////////////////////////////////////////////////////////////////////
// Expression trees.
////////////////////////////////////////////////////////////////////////////////

/// Renders the indented ASCII tree of a syntax tree, with symbolic node
/// labels such as `AND (∧)`.
pub fn expression_tree(ast: &Ast) -> String {
    let mut buffer = String::new();

    render_node(ast, 0, &mut buffer);

    buffer
}

/// Appends one node and its children at the given indentation.
fn render_node(ast: &Ast, depth: usize, buffer: &mut String) {
    let indent = "  ".repeat(depth);

    match ast {
        Ast::Variable { name } => {
            buffer.push_str(&format!("{}VAR {}\n", indent, name));
        }
        Ast::Identifier { name } => {
            buffer.push_str(&format!("{}IDENT {}\n", indent, name));
        }
        Ast::TypedVariable {
            variable,
            annotation,
        } => {
            buffer.push_str(&format!("{}TYPED\n", indent));
            render_node(variable, depth + 1, buffer);
            render_node(annotation, depth + 1, buffer);
        }
        Ast::Negation { operand } => {
            buffer.push_str(&format!("{}NOT (¬)\n", indent));
            render_node(operand, depth + 1, buffer);
        }
        Ast::Binary {
            operator,
            left,
            right,
        } => {
            buffer.push_str(&format!(
                "{}{} ({})\n",
                indent,
                operator_label(operator),
                operator
            ));
            render_node(left, depth + 1, buffer);
            render_node(right, depth + 1, buffer);
        }
        Ast::Quantifier {
            quantifier,
            variable,
            body,
        } => {
            buffer.push_str(&format!(
                "{}{} ({})\n",
                indent,
                quantifier_label(quantifier),
                quantifier
            ));
            render_node(variable, depth + 1, buffer);
            render_node(body, depth + 1, buffer);
        }
        Ast::Lambda { variable, body } => {
            buffer.push_str(&format!("{}LAMBDA (λ)\n", indent));
            render_node(variable, depth + 1, buffer);
            render_node(body, depth + 1, buffer);
        }
        Ast::Application { function, argument } => {
            buffer.push_str(&format!("{}APPLY\n", indent));
            render_node(function, depth + 1, buffer);
            render_node(argument, depth + 1, buffer);
        }
        Ast::Marker { original, .. } => {
            buffer.push_str(&format!("{}MARKER\n", indent));
            render_node(original, depth + 1, buffer);
        }
    }
}

/// The uppercase label of a binary operator.
fn operator_label(operator: &BinaryOperator) -> &'static str {
    match operator {
        BinaryOperator::Conjunction => "AND",
        BinaryOperator::Disjunction => "OR",
        BinaryOperator::Implication => "IMPLIES",
        BinaryOperator::Biconditional => "IFF",
        BinaryOperator::Equality => "EQUALS",
        BinaryOperator::Addition => "PLUS",
        BinaryOperator::Multiplication => "TIMES",
        BinaryOperator::Composition => "COMPOSE",
    }
}

/// The uppercase label of a quantifier.
fn quantifier_label(quantifier: &QuantifierKind) -> &'static str {
    match quantifier {
        QuantifierKind::Universal => "FORALL",
        QuantifierKind::Existential => "EXISTS",
        QuantifierKind::UniqueExistential => "EXISTS-UNIQUE",
    }
}

////////////////////////////////////////////////////////////////////////////////
// Rule blocks.
////////////////////////////////////////////////////////////////////////////////

/// Renders one tableau rule application as an ASCII block: the header
/// (carrying the rule class and principal formula) followed by the
/// resulting formulas, tree-drawn.
pub fn rule_block(header: &str, children: &[String]) -> String {
    let mut buffer = String::from(header);

    for (position, child) in children.iter().enumerate() {
        let connector = if position + 1 == children.len() {
            "└─"
        } else {
            "├─"
        };

        buffer.push_str(&format!("\n {} {}", connector, child));
    }

    buffer
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////
