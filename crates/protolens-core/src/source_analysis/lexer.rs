// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for proto3 schema source.
//!
//! This module converts source text into a stream of [`Token`]s. The lexer
//! is hand-written for maximum control over error recovery.
//!
//! # Design Principles
//!
//! - **Never fails**: unrecognized input becomes an [`TokenKind::Id`] token
//!   with its raw lexeme, so the parser can emit a targeted error.
//! - **Newlines are tokens**: each logical line break produces
//!   [`TokenKind::EndLine`]; the parser uses them to bound inline comments
//!   and absorb formatting.
//! - **Comments are tokens**: `//`, `/*`, and `*/` lex as openers/closers
//!   and comment body text lexes as ordinary tokens; reassembly is the
//!   parser's job.
//! - **Precise positions**: every token carries a byte span and a 1-based
//!   line/column.
//!
//! # Example
//!
//! ```
//! use protolens_core::source_analysis::{lex, TokenKind};
//!
//! let tokens = lex("syntax = \"proto3\";");
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Id, TokenKind::Control, TokenKind::String, TokenKind::Control]
//! );
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use super::{Position, Span, Token, TokenKind};

/// Tokenizes the given source text.
///
/// Convenience wrapper that drains a [`Lexer`] into a `Vec`. The result is
/// the token FIFO the parser consumes.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// A lexer that tokenizes proto3 source code.
///
/// Implements [`Iterator`] for easy consumption; iteration ends when the
/// source is exhausted. There is no end-of-file token — the parser treats
/// an empty queue as end of input.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// 1-based line of the next unconsumed character.
    line: u32,
    /// 1-based column of the next unconsumed character.
    column: u32,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is the same as
    /// `peek_char`).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        let mut iter = self.chars.clone();
        for _ in 0..n {
            iter.next();
        }
        iter.next().map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the line/column of the next unconsumed character.
    fn location(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Builds a token from the text scanned since `start`.
    fn token(&self, kind: TokenKind, start: usize, position: Position) -> Token {
        let span = Span::from(start..self.position);
        Token::new(kind, &self.source[start..self.position], span, position)
    }

    /// Skips spaces, tabs, and carriage returns that are not part of a
    /// `\r\n` line break.
    fn skip_blank(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t') => {
                    self.advance();
                }
                Some('\r') if self.peek_char_n(1) != Some('\n') => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    /// Lexes the next token, or returns `None` at end of input.
    fn next_token(&mut self) -> Option<Token> {
        self.skip_blank();

        let start = self.position;
        let position = self.location();
        let c = self.peek_char()?;

        let kind = match c {
            '\n' => {
                self.advance();
                TokenKind::EndLine
            }
            // Only reachable for `\r\n`; lone `\r` is blank-skipped.
            '\r' => {
                self.advance();
                self.advance();
                TokenKind::EndLine
            }
            'a'..='z' | 'A'..='Z' => self.lex_identifier(),
            '0'..='9' => self.lex_number(),
            '"' | '`' => self.lex_string(c),
            '/' if self.peek_char_n(1) == Some('/') => self.lex_comment_marker(),
            '/' if self.peek_char_n(1) == Some('*') => self.lex_comment_marker(),
            '*' if self.peek_char_n(1) == Some('/') => self.lex_comment_marker(),
            '{' | '}' | '(' | ')' | '<' | '>' | '[' | ']' | ';' | ',' | '=' | '.' => {
                self.advance();
                TokenKind::Control
            }
            // Anything else is unrecognized; hand it to the parser verbatim.
            _ => {
                self.advance();
                TokenKind::Id
            }
        };

        Some(self.token(kind, start, position))
    }

    /// Lexes an identifier, gluing dotted segments (`foo.bar.Baz`) into a
    /// single lexeme so full identifiers are one token.
    fn lex_identifier(&mut self) -> TokenKind {
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        while self.peek_char() == Some('.')
            && self.peek_char_n(1).is_some_and(|c| c.is_ascii_alphabetic())
        {
            self.advance(); // .
            self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        }
        TokenKind::Id
    }

    /// Lexes a numeric literal: decimal, octal, hex, or float.
    ///
    /// The lexer scans the broadest plausible shape; whether the lexeme is a
    /// well-formed literal is the grammar predicates' call.
    fn lex_number(&mut self) -> TokenKind {
        if self.peek_char() == Some('0') && matches!(self.peek_char_n(1), Some('x' | 'X')) {
            self.advance(); // 0
            self.advance(); // x
            self.advance_while(|c| c.is_ascii_hexdigit());
            return TokenKind::Numeric;
        }

        self.advance_while(|c| c.is_ascii_digit());

        // Fractional part: a decimal point only counts when a digit follows,
        // so `1.` stays Numeric + Control.
        if self.peek_char() == Some('.') && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // .
            self.advance_while(|c| c.is_ascii_digit());
        }

        // Exponent: e/E with optional sign, only when digits follow.
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let digits_at = if matches!(self.peek_char_n(1), Some('+' | '-')) {
                2
            } else {
                1
            };
            if self.peek_char_n(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digits_at {
                    self.advance();
                }
                self.advance_while(|c| c.is_ascii_digit());
            }
        }

        TokenKind::Numeric
    }

    /// Lexes a string literal delimited by `"` or `` ` ``.
    ///
    /// A raw newline or NUL inside the string, or end of input before the
    /// closing quote, invalidates the literal: the scanned text is emitted
    /// as an `Id` token and the parser reports the error.
    fn lex_string(&mut self, quote: char) -> TokenKind {
        self.advance(); // opening quote
        loop {
            match self.peek_char() {
                None | Some('\n' | '\0') => return TokenKind::Id,
                Some(c) if c == quote => {
                    self.advance();
                    return TokenKind::String;
                }
                Some('\\') => {
                    self.advance();
                    self.lex_escape();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Consumes the body of an escape sequence after the backslash.
    ///
    /// Recognizes `\xHH`, `\NNN` (octal), and single-character escapes.
    /// The escape text stays verbatim in the lexeme.
    fn lex_escape(&mut self) {
        match self.peek_char() {
            Some('x' | 'X') => {
                self.advance();
                for _ in 0..2 {
                    if self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                        self.advance();
                    }
                }
            }
            Some('0'..='7') => {
                for _ in 0..3 {
                    if self.peek_char().is_some_and(|c| ('0'..='7').contains(&c)) {
                        self.advance();
                    }
                }
            }
            Some(c) if c != '\n' && c != '\0' => {
                self.advance();
            }
            _ => {}
        }
    }

    /// Lexes a two-character comment marker: `//`, `/*`, or `*/`.
    fn lex_comment_marker(&mut self) -> TokenKind {
        self.advance();
        self.advance();
        TokenKind::Comment
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).iter().map(Token::kind).collect()
    }

    fn lexemes(source: &str) -> Vec<String> {
        lex(source).iter().map(|t| t.lexeme().to_string()).collect()
    }

    #[test]
    fn lexes_minimal_syntax_statement() {
        assert_eq!(lexemes("syntax = \"proto3\";"), ["syntax", "=", "\"proto3\"", ";"]);
        assert_eq!(
            kinds("syntax = \"proto3\";"),
            [
                TokenKind::Id,
                TokenKind::Control,
                TokenKind::String,
                TokenKind::Control
            ]
        );
    }

    #[test]
    fn glues_dotted_identifiers() {
        assert_eq!(lexemes("foo.bar.Baz"), ["foo.bar.Baz"]);
        assert_eq!(kinds("foo.bar.Baz"), [TokenKind::Id]);
        // Trailing dot is not part of the identifier.
        assert_eq!(lexemes("foo.bar."), ["foo.bar", "."]);
    }

    #[test]
    fn identifier_may_contain_digits_and_underscores() {
        assert_eq!(lexemes("ival_2x"), ["ival_2x"]);
    }

    #[test]
    fn lexes_numbers() {
        assert_eq!(kinds("42"), [TokenKind::Numeric]);
        assert_eq!(lexemes("0x1F 0755 0"), ["0x1F", "0755", "0"]);
        assert_eq!(lexemes("3.25e-1"), ["3.25e-1"]);
        assert_eq!(lexemes("2.5E10"), ["2.5E10"]);
        // `1.` is a number then a control dot.
        assert_eq!(lexemes("1."), ["1", "."]);
        assert_eq!(kinds("1."), [TokenKind::Numeric, TokenKind::Control]);
    }

    #[test]
    fn lexes_strings_with_escapes() {
        assert_eq!(lexemes(r#""a\tb""#), [r#""a\tb""#]);
        assert_eq!(lexemes(r#""quote: \" end""#), [r#""quote: \" end""#]);
        assert_eq!(lexemes(r#""\x41\101""#), [r#""\x41\101""#]);
        assert_eq!(kinds("`back`"), [TokenKind::String]);
    }

    #[test]
    fn unterminated_string_degrades_to_id() {
        let tokens = lex("\"oops");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::Id);
        assert_eq!(tokens[0].lexeme(), "\"oops");
    }

    #[test]
    fn newline_inside_string_degrades_to_id() {
        let tokens = lex("\"oops\nrest");
        assert_eq!(tokens[0].kind(), TokenKind::Id);
        assert_eq!(tokens[0].lexeme(), "\"oops");
        assert_eq!(tokens[1].kind(), TokenKind::EndLine);
        assert_eq!(tokens[2].lexeme(), "rest");
    }

    #[test]
    fn nul_inside_string_degrades_to_id() {
        let tokens = lex("\"a\0b\"");
        assert_eq!(tokens[0].kind(), TokenKind::Id);
        assert_eq!(tokens[0].lexeme(), "\"a");
    }

    #[test]
    fn lexes_control_characters() {
        let source = "{}()<>[];,=.";
        let tokens = lex(source);
        assert_eq!(tokens.len(), source.len());
        assert!(tokens.iter().all(|t| t.kind() == TokenKind::Control));
    }

    #[test]
    fn lexes_comment_markers() {
        assert_eq!(kinds("//"), [TokenKind::Comment]);
        assert_eq!(lexemes("/* x */"), ["/*", "x", "*/"]);
        assert_eq!(
            kinds("/* x */"),
            [TokenKind::Comment, TokenKind::Id, TokenKind::Comment]
        );
    }

    #[test]
    fn comment_body_lexes_as_ordinary_tokens() {
        assert_eq!(lexemes("// field numbers"), ["//", "field", "numbers"]);
    }

    #[test]
    fn emits_end_line_tokens() {
        assert_eq!(
            kinds("a\nb"),
            [TokenKind::Id, TokenKind::EndLine, TokenKind::Id]
        );
        // Windows line endings are one EndLine with the full lexeme.
        let tokens = lex("a\r\nb");
        assert_eq!(tokens[1].kind(), TokenKind::EndLine);
        assert_eq!(tokens[1].lexeme(), "\r\n");
    }

    #[test]
    fn discards_blank_whitespace() {
        assert_eq!(kinds("  a \t b  "), [TokenKind::Id, TokenKind::Id]);
    }

    #[test]
    fn unrecognized_characters_become_id_tokens() {
        let tokens = lex("@ #");
        assert_eq!(tokens[0].kind(), TokenKind::Id);
        assert_eq!(tokens[0].lexeme(), "@");
        assert_eq!(tokens[1].lexeme(), "#");
        // A lone slash is unrecognized too.
        assert_eq!(lexemes("/"), ["/"]);
    }

    #[test]
    fn leading_underscore_is_not_an_identifier_start() {
        // `_foo` lexes as the unrecognized `_` then the identifier `foo`.
        assert_eq!(lexemes("_foo"), ["_", "foo"]);
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = lex("syntax = \"proto3\";\n  message");
        assert_eq!(tokens[0].position(), Position::new(1, 1));
        assert_eq!(tokens[1].position(), Position::new(1, 8));
        assert_eq!(tokens[2].position(), Position::new(1, 10));
        assert_eq!(tokens[3].position(), Position::new(1, 18));
        // EndLine sits at the break itself.
        assert_eq!(tokens[4].position(), Position::new(1, 19));
        assert_eq!(tokens[5].position(), Position::new(2, 3));
    }

    #[test]
    fn spans_index_back_into_source() {
        let source = "enum Color { RED = 1; }";
        for token in lex(source) {
            assert_eq!(&source[token.span().as_range()], token.lexeme());
        }
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert!(lex("").is_empty());
        assert!(lex("   \t ").is_empty());
    }

    #[test]
    fn true_and_false_lex_as_identifiers() {
        assert_eq!(kinds("true false"), [TokenKind::Id, TokenKind::Id]);
    }
}
