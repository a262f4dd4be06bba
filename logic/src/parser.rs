//! # Surface parser
//!
//! Hand-written recursive descent over the token stream, one function per
//! precedence level.  From loosest to tightest: biconditional, implication,
//! disjunction, conjunction, equality, composition, addition,
//! multiplication, then negation and application.  Every binary level folds
//! to the left — including implication, which mathematical convention would
//! make right-associative; the left fold is kept deliberately for
//! compatibility with the notation's existing corpus.  Application is
//! left-associative currying and binds tighter than any operator.
//!
//! Quantified formulas and λ-abstractions are recognized at the top of an
//! expression (or inside parentheses), with `∃!` taking precedence over
//! `∃` in the lexer.  Binders may carry `:` type annotations.
//!
//! Errors carry the unparsed remainder of the input and the `(line,
//! column)` position where parsing stopped.
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
    ast::{Ast, BinaryOperator, QuantifierKind},
    lexer::tokenize,
    token::{Token, TokenKind},
};
use log::debug;
use std::{
    fmt,
    fmt::{Display, Formatter},
};

////////////////////////////////////////////////////////////////////////////////
// Parse errors.
////////////////////////////////////////////////////////////////////////////////

/// A parse failure: the unparsed remainder of the input together with the
/// position parsing stopped at.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ParseError {
    /// The source text from the failure position onwards.
    pub remainder: String,
    /// The 1-based line of the failure.
    pub line: usize,
    /// The 1-based column of the failure.
    pub column: usize,
}

/// Pretty-printing for parse errors.
impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: unparsed input {:?}",
            self.line, self.column, self.remainder
        )
    }
}

/// The result type of every parsing function.
pub type ParseResult<T> = Result<T, ParseError>;

////////////////////////////////////////////////////////////////////////////////
// The parser, proper.
////////////////////////////////////////////////////////////////////////////////

/// Parses a surface-logic string into its syntax tree.
///
/// # Errors
///
/// Returns a `ParseError` if the string does not lex, does not parse, or
/// leaves trailing tokens behind.
pub fn parse(source: &str) -> ParseResult<Ast> {
    let tokens = tokenize(source)?;

    debug!("Parsing {:?} ({} token(s)).", source, tokens.len());

    let mut parser = Parser {
        source,
        tokens,
        position: 0,
    };

    let ast = parser.parse_expression()?;

    if parser.position < parser.tokens.len() {
        return Err(parser.error_here());
    }

    Ok(ast)
}

/// Token-stream cursor.
struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Returns the current token's kind without consuming it.
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.position).map(|token| &token.kind)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();

        if token.is_some() {
            self.position += 1;
        }

        token
    }

    /// Consumes the current token if it has the expected kind.
    fn expect(&mut self, kind: &TokenKind) -> ParseResult<()> {
        if self.peek() == Some(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here())
        }
    }

    /// Builds the error for the current position: the remainder from the
    /// current token onwards, or an end-of-input error past the last token.
    fn error_here(&self) -> ParseError {
        match self.tokens.get(self.position) {
            Some(token) => ParseError {
                remainder: self.source[token.offset..].to_string(),
                line: token.line,
                column: token.column,
            },
            None => {
                let line = self.source.matches('\n').count() + 1;
                let column = self
                    .source
                    .rsplit('\n')
                    .next()
                    .map(|last| last.chars().count())
                    .unwrap_or(0)
                    + 1;

                ParseError {
                    remainder: String::new(),
                    line,
                    column,
                }
            }
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    // The precedence ladder.
    ////////////////////////////////////////////////////////////////////////////

    /// `expr := quantified | lambda | biconditional`.
    fn parse_expression(&mut self) -> ParseResult<Ast> {
        match self.peek() {
            Some(TokenKind::Forall) => {
                self.parse_quantified(QuantifierKind::Universal)
            }
            Some(TokenKind::Exists) => {
                self.parse_quantified(QuantifierKind::Existential)
            }
            Some(TokenKind::ExistsUnique) => {
                self.parse_quantified(QuantifierKind::UniqueExistential)
            }
            Some(TokenKind::Lambda) => self.parse_lambda(),
            _ => self.parse_biconditional(),
        }
    }

    /// A quantified formula: quantifier, binder, `.`, body expression.
    fn parse_quantified(
        &mut self,
        quantifier: QuantifierKind,
    ) -> ParseResult<Ast> {
        self.advance();

        let variable = self.parse_binder()?;

        self.expect(&TokenKind::Dot)?;

        let body = self.parse_expression()?;

        Ok(Ast::quantifier(quantifier, variable, body))
    }

    /// A λ-abstraction: `λ`, binder, `.`, body expression.
    fn parse_lambda(&mut self) -> ParseResult<Ast> {
        self.advance();

        let variable = self.parse_binder()?;

        self.expect(&TokenKind::Dot)?;

        let body = self.parse_expression()?;

        Ok(Ast::lambda(variable, body))
    }

    /// A binder: a variable or identifier, optionally `:`-annotated.
    fn parse_binder(&mut self) -> ParseResult<Ast> {
        let name = match self.peek() {
            Some(TokenKind::Variable(name)) => Ast::variable(name.clone()),
            Some(TokenKind::Identifier(name)) => {
                Ast::identifier(name.clone())
            }
            _ => return Err(self.error_here()),
        };

        self.advance();

        self.maybe_annotated(name)
    }

    /// Attaches a `:` type annotation to a name when one follows.
    fn maybe_annotated(&mut self, name: Ast) -> ParseResult<Ast> {
        if self.peek() != Some(&TokenKind::Colon) {
            return Ok(name);
        }

        self.advance();

        let annotation = match self.peek() {
            Some(TokenKind::Variable(name)) => Ast::variable(name.clone()),
            Some(TokenKind::Identifier(name)) => {
                Ast::identifier(name.clone())
            }
            _ => return Err(self.error_here()),
        };

        self.advance();

        Ok(Ast::typed_variable(name, annotation))
    }

    /// Folds one left-associative binary level.
    fn parse_binary_level(
        &mut self,
        operators: &[(TokenKind, BinaryOperator)],
        next: fn(&mut Self) -> ParseResult<Ast>,
    ) -> ParseResult<Ast> {
        let mut left = next(self)?;

        loop {
            let operator = match self.peek() {
                Some(kind) => operators
                    .iter()
                    .find(|(token, _operator)| token == kind)
                    .map(|(_token, operator)| *operator),
                None => None,
            };

            match operator {
                Some(operator) => {
                    self.advance();
                    let right = next(self)?;
                    left = Ast::binary(operator, left, right);
                }
                None => return Ok(left),
            }
        }
    }

    fn parse_biconditional(&mut self) -> ParseResult<Ast> {
        self.parse_binary_level(
            &[(TokenKind::Biconditional, BinaryOperator::Biconditional)],
            Self::parse_implication,
        )
    }

    fn parse_implication(&mut self) -> ParseResult<Ast> {
        self.parse_binary_level(
            &[(TokenKind::Implication, BinaryOperator::Implication)],
            Self::parse_disjunction,
        )
    }

    fn parse_disjunction(&mut self) -> ParseResult<Ast> {
        self.parse_binary_level(
            &[(TokenKind::Disjunction, BinaryOperator::Disjunction)],
            Self::parse_conjunction,
        )
    }

    fn parse_conjunction(&mut self) -> ParseResult<Ast> {
        self.parse_binary_level(
            &[(TokenKind::Conjunction, BinaryOperator::Conjunction)],
            Self::parse_equality,
        )
    }

    fn parse_equality(&mut self) -> ParseResult<Ast> {
        self.parse_binary_level(
            &[(TokenKind::Equality, BinaryOperator::Equality)],
            Self::parse_composition,
        )
    }

    fn parse_composition(&mut self) -> ParseResult<Ast> {
        self.parse_binary_level(
            &[(TokenKind::Composition, BinaryOperator::Composition)],
            Self::parse_addition,
        )
    }

    fn parse_addition(&mut self) -> ParseResult<Ast> {
        self.parse_binary_level(
            &[(TokenKind::Addition, BinaryOperator::Addition)],
            Self::parse_multiplication,
        )
    }

    fn parse_multiplication(&mut self) -> ParseResult<Ast> {
        self.parse_binary_level(
            &[(TokenKind::Multiplication, BinaryOperator::Multiplication)],
            Self::parse_term,
        )
    }

    /// `term := negation | application`.
    fn parse_term(&mut self) -> ParseResult<Ast> {
        if self.peek() == Some(&TokenKind::Negation) {
            self.advance();

            let operand = self.parse_term()?;

            return Ok(Ast::negation(operand));
        }

        self.parse_application()
    }

    /// Left-associative currying: `atom (atom)*`.
    fn parse_application(&mut self) -> ParseResult<Ast> {
        let mut function = self.parse_atom()?;

        while let Some(kind) = self.peek() {
            if !kind.starts_atom() {
                break;
            }

            let argument = self.parse_atom()?;

            function = Ast::application(function, argument);
        }

        Ok(function)
    }

    /// `atom := '(' expr ')' | typed_variable | variable | identifier`.
    fn parse_atom(&mut self) -> ParseResult<Ast> {
        match self.peek() {
            Some(TokenKind::LeftParen) => {
                self.advance();

                let inner = self.parse_expression()?;

                self.expect(&TokenKind::RightParen)?;

                Ok(inner)
            }
            Some(TokenKind::Variable(name)) => {
                let name = Ast::variable(name.clone());
                self.advance();
                self.maybe_annotated(name)
            }
            Some(TokenKind::Identifier(name)) => {
                let name = Ast::identifier(name.clone());
                self.advance();
                self.maybe_annotated(name)
            }
            _ => Err(self.error_here()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////

/// Tests for parser functionality.
#[cfg(test)]
mod test {
    use crate::{
        ast::{Ast, BinaryOperator, QuantifierKind},
        parser::parse,
    };

    /// Tests atom and connective parsing with the canonical rendering.
    #[test]
    pub fn parser_test0() {
        assert_eq!(parse("P ∧ Q").unwrap().stringify(), "(P ∧ Q)");
        assert_eq!(parse("¬P ∨ Q").unwrap().stringify(), "(¬P ∨ Q)");
        assert_eq!(parse("¬¬P").unwrap().stringify(), "¬¬P");
    }

    /// Tests that every binary level folds to the left, including
    /// implication.
    #[test]
    pub fn parser_test1() {
        assert_eq!(
            parse("P → Q → R").unwrap().stringify(),
            "((P → Q) → R)"
        );
        assert_eq!(
            parse("P ∧ Q ∨ R").unwrap().stringify(),
            "((P ∧ Q) ∨ R)"
        );
        assert_eq!(
            parse("a + b × c").unwrap().stringify(),
            "(a + (b × c))"
        );
    }

    /// Tests that application binds tighter than any operator and curries
    /// to the left.
    #[test]
    pub fn parser_test2() {
        let ast = parse("P x y ∧ Q").unwrap();

        assert_eq!(ast.stringify(), "(P(x)(y) ∧ Q)");
    }

    /// Tests the composition-application example: `(f ∘ g)(x)` applies the
    /// parenthesized composition.
    #[test]
    pub fn parser_test3() {
        let ast = parse("(f ∘ g)(x)").unwrap();

        assert_eq!(ast.stringify(), "(f ∘ g)(x)");

        match ast {
            Ast::Application { function, .. } => {
                assert!(matches!(
                    *function,
                    Ast::Binary {
                        operator: BinaryOperator::Composition,
                        ..
                    }
                ));
            }
            _ => panic!("expected an application"),
        }
    }

    /// Tests quantifiers, `∃!` priority, and typed binders.
    #[test]
    pub fn parser_test4() {
        let ast = parse("∃!x:i. P x").unwrap();

        match &ast {
            Ast::Quantifier {
                quantifier,
                variable,
                ..
            } => {
                assert_eq!(
                    quantifier,
                    &QuantifierKind::UniqueExistential
                );
                assert_eq!(variable.binder_name(), Some("x"));
            }
            _ => panic!("expected a quantifier"),
        }

        assert_eq!(ast.stringify(), "∃!x:i.(P(x))");
    }

    /// Tests the Russell formula's shape end to end.
    #[test]
    pub fn parser_test5() {
        let ast = parse("∃R. ∀x. R x ↔ ¬(x x)").unwrap();

        assert_eq!(
            ast.stringify(),
            "∃R.(∀x.((R(x) ↔ ¬(x(x)))))"
        );
    }

    /// Tests λ-abstraction with application bodies.
    #[test]
    pub fn parser_test6() {
        assert_eq!(
            parse("λf. λx. f (f x)").unwrap().stringify(),
            "λf.(λx.(f(f(x))))"
        );
    }

    /// Tests the parse-then-print fixpoint: printing is stable on canonical
    /// forms.
    #[test]
    pub fn parser_test7() {
        for source in &[
            "(P ∧ Q)",
            "((P → Q) → R)",
            "∀x.(P(x))",
            "¬(P ∨ Q)",
            "λx.((f(x) = g(x)))",
        ] {
            let printed = parse(source).unwrap().stringify();

            assert_eq!(&parse(&printed).unwrap().stringify(), &printed);
        }
    }

    /// Tests error positions and remainders.
    #[test]
    pub fn parser_test8() {
        let error = parse("P ∧").unwrap_err();

        assert_eq!(error.line, 1);
        assert!(error.remainder.is_empty());

        let error = parse("P ∧ ∧ Q").unwrap_err();

        assert_eq!(error.column, 5);
        assert!(error.remainder.starts_with('∧'));
    }

    /// Tests that trailing tokens are rejected.
    #[test]
    pub fn parser_test9() {
        assert!(parse("P Q)").is_err());
        assert!(parse(")").is_err());
    }
}
