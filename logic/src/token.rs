//! # Surface tokens
//!
//! The token alphabet of the surface logic: Unicode connectives and
//! quantifiers, punctuation, and the two name classes the grammar
//! distinguishes — *variables* (a single uppercase ASCII letter) and
//! *identifiers* (longer runs of letters, digits, underscores, and Greek
//! minuscules).  Each token remembers the line, column, and byte offset it
//! started at, so parse errors can report a position and the unparsed
//! remainder of the input.
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

use std::{
    fmt,
    fmt::{Display, Formatter},
};

////////////////////////////////////////////////////////////////////////////////
// Token kinds.
////////////////////////////////////////////////////////////////////////////////

/// The kinds of token the lexer produces.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    /// `¬`.
    Negation,
    /// `∧`.
    Conjunction,
    /// `∨`.
    Disjunction,
    /// `→` or `⇒`.
    Implication,
    /// `↔` or `⇔`.
    Biconditional,
    /// `=`.
    Equality,
    /// `+`.
    Addition,
    /// `×` or `*`.
    Multiplication,
    /// `∘`.
    Composition,
    /// `∀`.
    Forall,
    /// `∃`.
    Exists,
    /// `∃!`.
    ExistsUnique,
    /// `λ`.
    Lambda,
    /// `(`.
    LeftParen,
    /// `)`.
    RightParen,
    /// `:`, introducing a type annotation.
    Colon,
    /// `.`, separating a binder from its body.
    Dot,
    /// A single uppercase ASCII letter.
    Variable(String),
    /// A longer name: letters, digits, underscores, Greek minuscules.
    Identifier(String),
}

impl TokenKind {
    /// Returns `true` iff the token can start an application atom: an
    /// opening parenthesis, a variable, or an identifier.
    pub fn starts_atom(&self) -> bool {
        matches!(
            self,
            TokenKind::LeftParen
                | TokenKind::Variable(_)
                | TokenKind::Identifier(_)
        )
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tokens, proper.
////////////////////////////////////////////////////////////////////////////////

/// A token together with the position it started at.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    /// The kind of the token.
    pub kind: TokenKind,
    /// The 1-based line the token started on.
    pub line: usize,
    /// The 1-based column the token started at.
    pub column: usize,
    /// The byte offset of the token in the source string.
    pub offset: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Trait implementations.
////////////////////////////////////////////////////////////////////////////////

/// Pretty-printing for token kinds, using the canonical surface symbol.
impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TokenKind::Negation => write!(f, "¬"),
            TokenKind::Conjunction => write!(f, "∧"),
            TokenKind::Disjunction => write!(f, "∨"),
            TokenKind::Implication => write!(f, "→"),
            TokenKind::Biconditional => write!(f, "↔"),
            TokenKind::Equality => write!(f, "="),
            TokenKind::Addition => write!(f, "+"),
            TokenKind::Multiplication => write!(f, "×"),
            TokenKind::Composition => write!(f, "∘"),
            TokenKind::Forall => write!(f, "∀"),
            TokenKind::Exists => write!(f, "∃"),
            TokenKind::ExistsUnique => write!(f, "∃!"),
            TokenKind::Lambda => write!(f, "λ"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Variable(name) => write!(f, "{}", name),
            TokenKind::Identifier(name) => write!(f, "{}", name),
        }
    }
}
