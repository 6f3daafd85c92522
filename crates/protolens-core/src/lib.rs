// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Protolens compiler core: the front-end of a proto3 schema compiler.
//!
//! This crate turns `.proto` source text into a typed abstract syntax tree
//! annotated with diagnostics:
//!
//! - Lexical analysis (tokenization with positions)
//! - Grammar predicates (lexeme classification)
//! - Parsing (AST construction with error recovery)
//!
//! Parsing is total: it always returns a tree, and syntax problems are
//! collected as [`ParseError`](source_analysis::ParseError)s on the tree
//! rather than raised. Code generation, file enumeration, and import
//! resolution are collaborators built on top of this crate, not part of it.
//!
//! # Example
//!
//! ```
//! use protolens_core::ast::NodeKind;
//! use protolens_core::source_analysis::parse;
//!
//! let tree = parse("syntax = \"proto3\";\n\nmessage Greeting {\n  string text = 1;\n}\n");
//! assert!(!tree.has_errors());
//!
//! let message = tree.root().child(1).unwrap();
//! assert_eq!(message.kind(), NodeKind::Message);
//! assert_eq!(message.child(0).unwrap().value(), "Greeting");
//! ```

pub mod ast;
pub mod ast_walker;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{NodeId, NodeKind, NodeRef, SyntaxTree};
    pub use crate::ast_walker::{walk_node, walk_tree};
    pub use crate::source_analysis::{
        Lexer, ParseError, Position, Span, Token, TokenKind, lex, parse,
    };
}
