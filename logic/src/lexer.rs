//! # Surface lexer
//!
//! Hand-rolled character-level lexer for the surface logic.  The recognized
//! symbol set is fixed: the Unicode connectives (with their ASCII aliases
//! `⇒`, `⇔`, `*`), the three quantifiers with `∃!` matched before `∃`, the
//! λ binder, parentheses, `:`, and `.`.  Whitespace is ignorable and only
//! advances the position bookkeeping.
//!
//! Name tokens are runs of ASCII letters, digits, underscores, and Greek
//! minuscules `α`–`ω`; a run consisting of exactly one uppercase ASCII
//! letter lexes as a *variable*, anything longer as an *identifier*.  The
//! letter `λ` is carved out of the identifier alphabet — it is always the
//! abstraction binder.
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
    parser::ParseError,
    token::{Token, TokenKind},
};

////////////////////////////////////////////////////////////////////////////////
// The lexer, proper.
////////////////////////////////////////////////////////////////////////////////

/// Character-level scanner with line/column bookkeeping.
struct Lexer<'a> {
    source: &'a str,
    characters: Vec<(usize, char)>,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            source,
            characters: source.char_indices().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the current character without consuming it.
    fn peek(&self) -> Option<char> {
        self.characters
            .get(self.position)
            .map(|(_offset, character)| *character)
    }

    /// Returns the byte offset of the current character, or the source
    /// length at the end of input.
    fn offset(&self) -> usize {
        self.characters
            .get(self.position)
            .map(|(offset, _character)| *offset)
            .unwrap_or_else(|| self.source.len())
    }

    /// Consumes one character, updating the line and column counters.
    fn advance(&mut self) -> Option<char> {
        let character = self.peek()?;

        self.position += 1;

        if character == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(character)
    }

    /// Builds the error for an unrecognized character, carrying the
    /// unparsed remainder and the position.
    fn unrecognized(&self) -> ParseError {
        ParseError {
            remainder: self.source[self.offset()..].to_string(),
            line: self.line,
            column: self.column,
        }
    }
}

/// Returns `true` iff the character can appear in a name token.
fn is_name_character(character: char) -> bool {
    character.is_ascii_alphanumeric()
        || character == '_'
        || (('α'..='ω').contains(&character) && character != 'λ')
}

/// Tokenizes a surface-logic string.
///
/// # Errors
///
/// Returns a `ParseError` carrying the unparsed remainder and the `(line,
/// column)` position of the first unrecognized character.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(character) = lexer.peek() {
        if character.is_whitespace() {
            lexer.advance();
            continue;
        }

        let line = lexer.line;
        let column = lexer.column;
        let offset = lexer.offset();

        let kind = match character {
            '¬' => {
                lexer.advance();
                TokenKind::Negation
            }
            '∧' => {
                lexer.advance();
                TokenKind::Conjunction
            }
            '∨' => {
                lexer.advance();
                TokenKind::Disjunction
            }
            '→' | '⇒' => {
                lexer.advance();
                TokenKind::Implication
            }
            '↔' | '⇔' => {
                lexer.advance();
                TokenKind::Biconditional
            }
            '=' => {
                lexer.advance();
                TokenKind::Equality
            }
            '+' => {
                lexer.advance();
                TokenKind::Addition
            }
            '×' | '*' => {
                lexer.advance();
                TokenKind::Multiplication
            }
            '∘' => {
                lexer.advance();
                TokenKind::Composition
            }
            '∀' => {
                lexer.advance();
                TokenKind::Forall
            }
            '∃' => {
                lexer.advance();

                // `∃!` must win over `∃`.
                if lexer.peek() == Some('!') {
                    lexer.advance();
                    TokenKind::ExistsUnique
                } else {
                    TokenKind::Exists
                }
            }
            'λ' => {
                lexer.advance();
                TokenKind::Lambda
            }
            '(' => {
                lexer.advance();
                TokenKind::LeftParen
            }
            ')' => {
                lexer.advance();
                TokenKind::RightParen
            }
            ':' => {
                lexer.advance();
                TokenKind::Colon
            }
            '.' => {
                lexer.advance();
                TokenKind::Dot
            }
            character if is_name_character(character) => {
                let mut name = String::new();

                while let Some(next) = lexer.peek() {
                    if is_name_character(next) {
                        name.push(next);
                        lexer.advance();
                    } else {
                        break;
                    }
                }

                if name.len() == 1
                    && name.chars().all(|c| c.is_ascii_uppercase())
                {
                    TokenKind::Variable(name)
                } else {
                    TokenKind::Identifier(name)
                }
            }
            _ => return Err(lexer.unrecognized()),
        };

        tokens.push(Token {
            kind,
            line,
            column,
            offset,
        });
    }

    Ok(tokens)
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////
