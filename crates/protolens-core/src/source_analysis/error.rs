// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parse error records.
//!
//! Errors carry source locations for precise diagnostics and integrate with
//! [`miette`] for rendered error reporting. The parser collects errors
//! instead of raising them; a parse always produces a tree, and callers
//! inspect the error list to decide whether the tree is trustworthy.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::{Position, Span, Token};

/// A syntax error recorded during parsing.
///
/// Errors are appended to a per-parse list in discovery order and handed to
/// the finished tree; they never abort the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic()]
pub struct ParseError {
    /// Human-readable description of the problem.
    pub message: EcoString,
    /// Byte span of the offending token, when one was available.
    #[label("here")]
    pub span: Option<Span>,
    /// Line/column of the offending token, when one was available.
    pub position: Option<Position>,
}

impl ParseError {
    /// Creates an error with no source location, for failures discovered at
    /// end of input.
    #[must_use]
    pub fn new(message: impl Into<EcoString>) -> Self {
        Self {
            message: message.into(),
            span: None,
            position: None,
        }
    }

    /// Creates an error anchored at the given token.
    #[must_use]
    pub fn at_token(message: impl Into<EcoString>, token: &Token) -> Self {
        Self {
            message: message.into(),
            span: Some(token.span()),
            position: Some(token.position()),
        }
    }

    /// Returns the 1-based line of the offending token, if known.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        self.position.map(|p| p.line)
    }

    /// Returns the 1-based column of the offending token, if known.
    #[must_use]
    pub fn column(&self) -> Option<u32> {
        self.position.map(|p| p.column)
    }
}
