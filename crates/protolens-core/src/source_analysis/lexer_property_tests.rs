// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the lexer.
//!
//! These tests use `proptest` to verify lexer invariants over generated
//! inputs:
//!
//! 1. **Lexer never panics** — arbitrary string input always tokenizes
//! 2. **Spans index the source** — every lexeme equals its span's text
//! 3. **Positions advance monotonically** — tokens appear in source order
//! 4. **Nothing meaningful is lost** — non-whitespace input produces tokens

use proptest::prelude::*;

use crate::source_analysis::{Position, lex};

proptest! {
    #[test]
    fn lexer_never_panics(input in ".*") {
        let _ = lex(&input);
    }

    #[test]
    fn lexemes_match_their_spans(input in "[a-zA-Z0-9_.;,={}<>\"`/* \n-]*") {
        for token in lex(&input) {
            prop_assert_eq!(&input[token.span().as_range()], token.lexeme());
        }
    }

    #[test]
    fn token_positions_are_monotonic(input in ".*") {
        let mut last = Position::new(1, 1);
        for token in lex(&input) {
            prop_assert!(
                token.position() >= last,
                "token {token:?} goes backwards from {last:?}"
            );
            last = token.position();
        }
    }

    #[test]
    fn spans_are_ordered_and_in_bounds(input in ".*") {
        let mut last_end = 0;
        for token in lex(&input) {
            prop_assert!(token.span().start() >= last_end);
            prop_assert!(token.span().end() as usize <= input.len());
            last_end = token.span().end();
        }
    }

    #[test]
    fn lexemes_are_never_empty(input in ".*") {
        for token in lex(&input) {
            prop_assert!(!token.lexeme().is_empty());
        }
    }

    #[test]
    fn identifier_words_tokenize_to_one_token(word in "[a-z][a-zA-Z0-9_]{0,12}") {
        let tokens = lex(&word);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].lexeme(), word.as_str());
    }
}
