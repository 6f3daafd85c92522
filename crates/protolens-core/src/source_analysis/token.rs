// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for proto3 lexical analysis.
//!
//! Each token pairs a coarse [`TokenKind`] with the verbatim source text it
//! covers (the lexeme). The lexer deliberately keeps the kinds coarse —
//! keywords, booleans, and type names all lex as [`TokenKind::Id`] — and the
//! [`grammar`](super::grammar) predicates refine the classification at parse
//! time. String lexemes keep their quotes and escape sequences untouched.
//!
//! Newlines are tokens too ([`TokenKind::EndLine`]): the parser uses them to
//! bound inline comments and to absorb formatting between statements.

use ecow::EcoString;

use super::{Position, Span};

/// The coarse lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An identifier-shaped word: `message`, `int32`, `foo.bar.Baz`, `true`.
    ///
    /// Also the fallback for any character sequence the lexer does not
    /// recognize, so the parser can report a targeted error.
    Id,
    /// A quoted string literal, quotes and escapes preserved: `"proto3"`.
    String,
    /// A numeric literal: `42`, `0x1F`, `0755`, `3.25e-1`.
    Numeric,
    /// A single punctuation character: `{ } ( ) < > [ ] ; , = .`
    Control,
    /// A comment opener or closer: `//`, `/*`, or `*/`.
    Comment,
    /// A logical line break.
    EndLine,
}

/// A single token: kind, verbatim lexeme, and source location.
///
/// Tokens are immutable; the lexer produces them in one pass and the parser
/// consumes each exactly once.
///
/// # Examples
///
/// ```
/// use protolens_core::source_analysis::{Position, Span, Token, TokenKind};
///
/// let token = Token::new(TokenKind::Id, "syntax", Span::new(0, 6), Position::new(1, 1));
/// assert_eq!(token.kind(), TokenKind::Id);
/// assert_eq!(token.lexeme(), "syntax");
/// assert_eq!(token.line(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    lexeme: EcoString,
    span: Span,
    position: Position,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<EcoString>,
        span: Span,
        position: Position,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
            position,
        }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the verbatim source text of this token.
    #[must_use]
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Consumes the token and returns its lexeme.
    #[must_use]
    pub fn into_lexeme(self) -> EcoString {
        self.lexeme
    }

    /// Returns the byte span of this token.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the 1-based line/column where this token starts.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the 1-based line number.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.position.line
    }

    /// Returns the 1-based column number.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Returns `true` if this is an identifier-class token.
    #[must_use]
    pub fn is_id(&self) -> bool {
        self.kind == TokenKind::Id
    }

    /// Returns `true` if this is a string literal token.
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.kind == TokenKind::String
    }

    /// Returns `true` if this is a numeric literal token.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.kind == TokenKind::Numeric
    }

    /// Returns `true` if this is a comment opener/closer token.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    /// Returns `true` if this is a line break token.
    #[must_use]
    pub fn is_end_line(&self) -> bool {
        self.kind == TokenKind::EndLine
    }

    /// Returns `true` if this is the given control character.
    #[must_use]
    pub fn is_control(&self, lexeme: &str) -> bool {
        self.kind == TokenKind::Control && self.lexeme == lexeme
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EndLine => write!(f, "<end of line>"),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, Span::default(), Position::default())
    }

    #[test]
    fn kind_predicates() {
        assert!(token(TokenKind::Id, "message").is_id());
        assert!(token(TokenKind::String, "\"x\"").is_string());
        assert!(token(TokenKind::Numeric, "42").is_numeric());
        assert!(token(TokenKind::Comment, "//").is_comment());
        assert!(token(TokenKind::EndLine, "\n").is_end_line());
        assert!(!token(TokenKind::Id, "message").is_numeric());
    }

    #[test]
    fn control_matches_exact_lexeme() {
        let semi = token(TokenKind::Control, ";");
        assert!(semi.is_control(";"));
        assert!(!semi.is_control(","));
        // Same lexeme, wrong kind.
        assert!(!token(TokenKind::Id, ";").is_control(";"));
    }

    #[test]
    fn display_shows_lexeme() {
        assert_eq!(token(TokenKind::Id, "enum").to_string(), "enum");
        assert_eq!(token(TokenKind::EndLine, "\n").to_string(), "<end of line>");
    }

    #[test]
    fn position_accessors() {
        let t = Token::new(TokenKind::Id, "x", Span::new(10, 11), Position::new(3, 4));
        assert_eq!(t.line(), 3);
        assert_eq!(t.column(), 4);
        assert_eq!(t.span().start(), 10);
    }
}
