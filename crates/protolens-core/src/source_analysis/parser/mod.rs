// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for proto3 schema source.
//!
//! This parser builds a [`SyntaxTree`] from a stream of tokens. It is
//! designed for batch diagnostics with comprehensive error recovery.
//!
//! # Design Philosophy
//!
//! - **Error recovery is mandatory** - parsing MUST always produce a tree
//! - **Multiple errors** - report all errors, don't stop at the first
//! - **Precise positions** - every error points at the offending token
//! - **Line-based recovery** - a malformed top-level statement burns the
//!   rest of its line and parsing resumes at the next one
//!
//! # Token Consumption
//!
//! The token stream is a FIFO consumed destructively: `peek` never moves,
//! `dequeue` is the only mutation. Each production consumes the tokens it
//! recognizes and nothing more; a production that cannot proceed records an
//! error, returns `None`, and leaves recovery to its caller.
//!
//! # Usage
//!
//! ```
//! use protolens_core::ast::NodeKind;
//! use protolens_core::source_analysis::parse;
//!
//! let tree = parse("syntax = \"proto3\";\n");
//! assert!(!tree.has_errors());
//! assert_eq!(tree.root().child(0).unwrap().kind(), NodeKind::Syntax);
//! ```

use ecow::EcoString;
use tracing::{debug, trace};

use crate::ast::{NodeId, NodeKind, SyntaxTree};
use crate::source_analysis::{ParseError, Token, TokenKind, grammar, lex};

// Block-construct productions (message, enum, oneof, map, reserved, service)
mod declarations;

#[cfg(test)]
mod property_tests;

/// Parses proto3 source text into a syntax tree.
///
/// This is the main entry point. It always returns a tree, even for
/// malformed input; check [`SyntaxTree::errors`] before trusting the
/// result.
///
/// # Examples
///
/// ```
/// use protolens_core::source_analysis::parse;
///
/// let tree = parse("package foo.bar;\n");
/// assert!(!tree.has_errors());
///
/// let tree = parse("package foo.bar");
/// assert!(tree.has_errors()); // missing terminator
/// ```
#[must_use]
pub fn parse(source: &str) -> SyntaxTree {
    let tokens = lex(source);
    debug!(tokens = tokens.len(), "analyzing proto3 source");
    Parser::new(tokens).analyze()
}

/// The parser state: the token FIFO, the tree under construction, and the
/// errors collected so far.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    current: usize,
    errors: Vec<ParseError>,
    tree: SyntaxTree,
}

impl Parser {
    /// Creates a new parser for the given tokens.
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            tree: SyntaxTree::new(),
        }
    }

    /// Runs the analysis to completion and returns the finished tree.
    fn analyze(mut self) -> SyntaxTree {
        while self.peek().is_some() {
            self.skip_end_lines();
            if self.peek().is_none() {
                break;
            }
            if let Some(statement) = self.parse_top_level_statement() {
                let root = self.tree.root_id();
                self.tree.add_child(root, statement);
            }
        }
        let errors = std::mem::take(&mut self.errors);
        debug!(errors = errors.len(), "analysis finished");
        self.tree.attach_errors(errors);
        self.tree
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Peeks at the head of the token queue without consuming.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    /// Removes and returns the head of the token queue.
    fn dequeue(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current)?.clone();
        self.current += 1;
        Some(token)
    }

    /// Dequeues the head token only if it satisfies the predicate.
    fn dequeue_if(&mut self, predicate: impl Fn(&Token) -> bool) -> Option<Token> {
        if self.peek().is_some_and(|token| predicate(token)) {
            self.dequeue()
        } else {
            None
        }
    }

    /// Consumes `EndLine` tokens until something else is at the head.
    fn skip_end_lines(&mut self) {
        while self.peek().is_some_and(Token::is_end_line) {
            self.dequeue();
        }
    }

    // ========================================================================
    // Error Handling & Recovery
    // ========================================================================

    /// Records an error with no source location.
    fn error(&mut self, message: impl Into<EcoString>) {
        self.errors.push(ParseError::new(message));
    }

    /// Records an error anchored at the given token.
    fn error_at(&mut self, message: impl Into<EcoString>, token: &Token) {
        self.errors.push(ParseError::at_token(message, token));
    }

    /// Records an error anchored at the head of the queue, or without a
    /// location when the queue is empty.
    fn error_here(&mut self, message: impl Into<EcoString>) {
        match self.peek().cloned() {
            Some(token) => self.error_at(message, &token),
            None => self.error(message),
        }
    }

    /// Discards tokens up to and including the next `EndLine`.
    ///
    /// This is the top-level recovery strategy: give up on the current line
    /// and resume at the next one.
    fn burn_line(&mut self) {
        trace!("burning tokens to end of line");
        while let Some(token) = self.dequeue() {
            if token.is_end_line() {
                break;
            }
        }
    }

    /// Dequeues one token and complains unless it is `;`.
    ///
    /// Never aborts the caller; a missing terminator is an error worth
    /// reporting but the statement itself already parsed.
    fn terminate_single_line_statement(&mut self) {
        match self.dequeue() {
            Some(token)
                if token.kind() == TokenKind::Control
                    && grammar::is_empty_statement(token.lexeme()) => {}
            Some(token) => {
                self.error_at(
                    format!("expected ';' at the end of the statement, found '{token}'"),
                    &token,
                );
            }
            None => self.error("expected ';' at the end of the statement"),
        }
    }

    /// Dequeues one token and checks it is the `=` operator.
    fn expect_assignment(&mut self) -> bool {
        match self.dequeue() {
            Some(token)
                if token.kind() == TokenKind::Control && grammar::is_assignment(token.lexeme()) =>
            {
                true
            }
            Some(token) => {
                self.error_at(format!("expected '=', found '{token}'"), &token);
                false
            }
            None => {
                self.error("expected '='");
                false
            }
        }
    }

    /// Dequeues one token and checks it is the given control character.
    fn expect_control(&mut self, symbol: &str) -> bool {
        match self.dequeue() {
            Some(token) if token.is_control(symbol) => true,
            Some(token) => {
                self.error_at(format!("expected '{symbol}', found '{token}'"), &token);
                false
            }
            None => {
                self.error(format!("expected '{symbol}'"));
                false
            }
        }
    }

    // ========================================================================
    // Shared Sub-Productions
    // ========================================================================

    /// Consumes a trailing inline comment, if one starts at the head, and
    /// attaches it to `parent`.
    fn scoop_comment(&mut self, parent: NodeId) {
        let starts_comment = self
            .peek()
            .is_some_and(|t| t.is_comment() && grammar::is_inline_comment(t.lexeme()));
        if starts_comment {
            if let Some(comment) = self.parse_inline_comment() {
                self.tree.add_child(parent, comment);
            }
        }
    }

    /// Consumes one `EndLine` if it is at the head; otherwise does nothing.
    fn dump_endline(&mut self) {
        if self.peek().is_some_and(Token::is_end_line) {
            self.dequeue();
        }
    }

    /// Parses a string literal into a node, quotes stripped.
    ///
    /// Leaves the queue untouched and returns `None` when the head is not a
    /// well-formed string literal.
    fn parse_string_literal(&mut self) -> Option<NodeId> {
        let token =
            self.dequeue_if(|t| t.is_string() && grammar::is_string_literal(t.lexeme()))?;
        let lexeme = token.lexeme();
        let value = EcoString::from(&lexeme[1..lexeme.len() - 1]);
        Some(
            self.tree
                .add_node(NodeKind::StringLiteral, value, token.position()),
        )
    }

    /// Parses a plain (undotted) identifier into a node.
    fn parse_identifier(&mut self) -> Option<NodeId> {
        let token = self.dequeue_if(|t| t.is_id() && grammar::is_identifier(t.lexeme()))?;
        let position = token.position();
        Some(
            self.tree
                .add_node(NodeKind::Identifier, token.into_lexeme(), position),
        )
    }

    /// Parses a full (possibly dotted) identifier into a node.
    fn parse_full_identifier(&mut self) -> Option<NodeId> {
        let token = self.dequeue_if(|t| t.is_id() && grammar::is_full_identifier(t.lexeme()))?;
        let position = token.position();
        Some(
            self.tree
                .add_node(NodeKind::Identifier, token.into_lexeme(), position),
        )
    }

    /// Parses an integer literal (decimal, octal, or hex) into a node.
    fn parse_integer_literal(&mut self) -> Option<NodeId> {
        let token = self.dequeue_if(|t| t.is_numeric() && grammar::is_integer_literal(t.lexeme()))?;
        let position = token.position();
        Some(
            self.tree
                .add_node(NodeKind::IntegerLiteral, token.into_lexeme(), position),
        )
    }

    /// Parses an integer literal into a `FieldNumber` node.
    fn parse_field_number(&mut self) -> Option<NodeId> {
        let token = self.dequeue_if(|t| t.is_numeric() && grammar::is_integer_literal(t.lexeme()))?;
        let position = token.position();
        Some(
            self.tree
                .add_node(NodeKind::FieldNumber, token.into_lexeme(), position),
        )
    }

    /// Parses an option constant: a string, boolean, integer, or float
    /// literal, or an identifier naming e.g. an enum value.
    fn parse_constant(&mut self) -> Option<NodeId> {
        let token = self.peek()?.clone();
        let kind = match token.kind() {
            TokenKind::String if grammar::is_string_literal(token.lexeme()) => {
                return self.parse_string_literal();
            }
            TokenKind::Id if grammar::is_boolean_literal(token.lexeme()) => {
                NodeKind::BooleanLiteral
            }
            TokenKind::Numeric if grammar::is_integer_literal(token.lexeme()) => {
                NodeKind::IntegerLiteral
            }
            TokenKind::Numeric if grammar::is_float_literal(token.lexeme()) => NodeKind::FloatLiteral,
            TokenKind::Id if grammar::is_full_identifier(token.lexeme()) => NodeKind::Identifier,
            _ => return None,
        };
        self.dequeue();
        let position = token.position();
        Some(self.tree.add_node(kind, token.into_lexeme(), position))
    }

    // ========================================================================
    // Top-Level Statements
    // ========================================================================

    /// Parses one top-level statement, or returns `None` after recording an
    /// error and recovering.
    fn parse_top_level_statement(&mut self) -> Option<NodeId> {
        // Anything that is not a word or a comment cannot begin a statement;
        // burn the line and look again.
        loop {
            let token = self.peek()?.clone();
            if token.is_comment() || token.is_id() {
                break;
            }
            self.error_at(format!("invalid top level statement '{token}'"), &token);
            self.burn_line();
            self.skip_end_lines();
        }

        let token = self.peek()?.clone();
        if token.is_comment() {
            let comment = if grammar::is_inline_comment(token.lexeme()) {
                self.parse_inline_comment()
            } else if grammar::is_multiline_comment_open(token.lexeme()) {
                self.parse_multiline_comment()
            } else {
                // A stray `*/` with no opener.
                self.error_at(format!("unexpected '{token}' outside a comment"), &token);
                self.burn_line();
                None
            };
            self.dump_endline();
            return comment;
        }

        let lexeme = token.lexeme();
        if grammar::is_syntax(lexeme) {
            self.parse_syntax()
        } else if grammar::is_import(lexeme) {
            self.parse_import()
        } else if grammar::is_package(lexeme) {
            self.parse_package()
        } else if grammar::is_option(lexeme) {
            self.parse_option()
        } else if grammar::is_enum(lexeme) {
            self.parse_enum()
        } else if grammar::is_service(lexeme) {
            self.parse_service()
        } else if grammar::is_message(lexeme) {
            self.parse_message()
        } else {
            self.error_at(format!("invalid top level statement '{lexeme}'"), &token);
            self.burn_line();
            None
        }
    }

    /// Parses `syntax = "proto3";`.
    fn parse_syntax(&mut self) -> Option<NodeId> {
        let keyword = self.dequeue()?;
        let position = keyword.position();
        let node = self
            .tree
            .add_node(NodeKind::Syntax, keyword.into_lexeme(), position);

        if !self.expect_assignment() {
            return None;
        }
        let Some(value) = self.parse_string_literal() else {
            self.error_here("expected string literal after 'syntax ='");
            return None;
        };
        self.tree.add_child(node, value);

        self.terminate_single_line_statement();
        self.scoop_comment(node);
        self.dump_endline();
        Some(node)
    }

    /// Parses `import [weak | public] "path";`.
    fn parse_import(&mut self) -> Option<NodeId> {
        let keyword = self.dequeue()?;
        let position = keyword.position();
        let node = self
            .tree
            .add_node(NodeKind::Import, keyword.into_lexeme(), position);

        if let Some(modifier) =
            self.dequeue_if(|t| t.is_id() && grammar::is_import_modifier(t.lexeme()))
        {
            let modifier_position = modifier.position();
            let modifier_node = self.tree.add_node(
                NodeKind::ImportModifier,
                modifier.into_lexeme(),
                modifier_position,
            );
            self.tree.add_child(node, modifier_node);
        }

        let Some(path) = self.parse_string_literal() else {
            self.error_here("expected string literal after 'import'");
            return None;
        };
        self.tree.add_child(node, path);

        self.terminate_single_line_statement();
        self.scoop_comment(node);
        self.dump_endline();
        Some(node)
    }

    /// Parses `package full.ident;`.
    fn parse_package(&mut self) -> Option<NodeId> {
        let keyword = self.dequeue()?;
        let position = keyword.position();
        let node = self
            .tree
            .add_node(NodeKind::Package, keyword.into_lexeme(), position);

        let Some(name) = self.parse_full_identifier() else {
            self.error_here("expected package name");
            return None;
        };
        self.tree.add_child(node, name);

        self.terminate_single_line_statement();
        self.scoop_comment(node);
        self.dump_endline();
        Some(node)
    }

    /// Parses `option name = constant;`.
    fn parse_option(&mut self) -> Option<NodeId> {
        let keyword = self.dequeue()?;
        let position = keyword.position();
        let node = self
            .tree
            .add_node(NodeKind::Option, keyword.into_lexeme(), position);

        let Some(name) = self.parse_full_identifier() else {
            self.error_here("expected option name");
            return None;
        };
        self.tree.add_child(node, name);

        if !self.expect_assignment() {
            return None;
        }

        let Some(value) = self.parse_constant() else {
            self.error_here("expected option value");
            return None;
        };
        self.tree.add_child(node, value);

        self.terminate_single_line_statement();
        self.scoop_comment(node);
        self.dump_endline();
        Some(node)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Parses `// text...` up to (not including) the next `EndLine`.
    fn parse_inline_comment(&mut self) -> Option<NodeId> {
        let opener = self.dequeue_if(|t| t.is_comment() && grammar::is_inline_comment(t.lexeme()))?;
        let position = opener.position();
        let node = self
            .tree
            .add_node(NodeKind::Comment, opener.into_lexeme(), position);

        let mut text = String::new();
        let mut text_position = position;
        let mut first = true;
        while self.peek().is_some_and(|t| !t.is_end_line()) {
            let Some(token) = self.dequeue() else { break };
            if first {
                text_position = token.position();
                first = false;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(token.lexeme());
        }

        let text_node = self
            .tree
            .add_node(NodeKind::CommentText, text, text_position);
        self.tree.add_child(node, text_node);
        Some(node)
    }

    /// Parses `/* text... */`, turning interior line breaks into newlines
    /// and dropping interior punctuation.
    fn parse_multiline_comment(&mut self) -> Option<NodeId> {
        let opener =
            self.dequeue_if(|t| t.is_comment() && grammar::is_multiline_comment_open(t.lexeme()))?;
        let position = opener.position();
        let node = self
            .tree
            .add_node(NodeKind::Comment, opener.into_lexeme(), position);

        let mut text = String::new();
        let mut text_position = position;
        let mut first = true;
        let mut closed = false;
        while let Some(token) = self.dequeue() {
            if token.is_comment() && grammar::is_multiline_comment_close(token.lexeme()) {
                closed = true;
                break;
            }
            match token.kind() {
                TokenKind::EndLine => text.push('\n'),
                TokenKind::Control => {}
                _ => {
                    if first {
                        text_position = token.position();
                        first = false;
                    }
                    if !text.is_empty() && !text.ends_with('\n') {
                        text.push(' ');
                    }
                    text.push_str(token.lexeme());
                }
            }
        }
        if !closed {
            self.error("expected '*/' to close the comment");
        }

        let text_node = self
            .tree
            .add_node(NodeKind::CommentText, text, text_position);
        self.tree.add_child(node, text_node);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeRef;

    /// Parses source that must be error-free.
    fn parse_ok(source: &str) -> SyntaxTree {
        let tree = parse(source);
        assert!(
            !tree.has_errors(),
            "unexpected errors {:?} for tree:\n{tree}",
            tree.errors()
        );
        tree
    }

    /// Returns the `index`th child of the root.
    fn root_child(tree: &SyntaxTree, index: usize) -> NodeRef<'_> {
        tree.root()
            .child(index)
            .unwrap_or_else(|| panic!("missing root child {index} in tree:\n{tree}"))
    }

    fn assert_node(node: NodeRef<'_>, kind: NodeKind, value: &str) {
        assert_eq!(node.kind(), kind);
        assert_eq!(node.value(), value);
    }

    #[test]
    fn minimal_file() {
        let tree = parse_ok("syntax = \"proto3\";");
        assert_eq!(tree.root().child_count(), 1);
        let syntax = root_child(&tree, 0);
        assert_node(syntax, NodeKind::Syntax, "syntax");
        assert_eq!(syntax.child_count(), 1);
        assert_node(syntax.child(0).unwrap(), NodeKind::StringLiteral, "proto3");
    }

    #[test]
    fn package_statement() {
        let tree = parse_ok("package foo.bar;");
        let package = root_child(&tree, 0);
        assert_node(package, NodeKind::Package, "package");
        assert_node(package.child(0).unwrap(), NodeKind::Identifier, "foo.bar");
    }

    #[test]
    fn import_statement() {
        let tree = parse_ok("import \"other.proto\";");
        let import = root_child(&tree, 0);
        assert_node(import, NodeKind::Import, "import");
        assert_eq!(import.child_count(), 1);
        assert_node(
            import.child(0).unwrap(),
            NodeKind::StringLiteral,
            "other.proto",
        );
    }

    #[test]
    fn import_with_modifier() {
        for modifier in ["weak", "public"] {
            let tree = parse_ok(&format!("import {modifier} \"other.proto\";"));
            let import = root_child(&tree, 0);
            assert_eq!(import.child_count(), 2);
            assert_node(import.child(0).unwrap(), NodeKind::ImportModifier, modifier);
            assert_node(
                import.child(1).unwrap(),
                NodeKind::StringLiteral,
                "other.proto",
            );
        }
    }

    #[test]
    fn option_with_string_constant() {
        let tree = parse_ok("option java_package = \"com.example\";");
        let option = root_child(&tree, 0);
        assert_node(option, NodeKind::Option, "option");
        assert_node(option.child(0).unwrap(), NodeKind::Identifier, "java_package");
        assert_node(
            option.child(1).unwrap(),
            NodeKind::StringLiteral,
            "com.example",
        );
    }

    #[test]
    fn option_constants_by_shape() {
        let cases = [
            ("option cc_enable_arenas = true;", NodeKind::BooleanLiteral, "true"),
            ("option magic = 42;", NodeKind::IntegerLiteral, "42"),
            ("option ratio = 0.5;", NodeKind::FloatLiteral, "0.5"),
            ("option mode = SPEED;", NodeKind::Identifier, "SPEED"),
        ];
        for (source, kind, value) in cases {
            let tree = parse_ok(source);
            let option = root_child(&tree, 0);
            assert_node(option.child(1).unwrap(), kind, value);
        }
    }

    #[test]
    fn multiple_statements_with_blank_lines() {
        let tree = parse_ok("syntax = \"proto3\";\n\npackage foo;\n\nimport \"a.proto\";\n");
        assert_eq!(tree.root().child_count(), 3);
        assert_eq!(root_child(&tree, 0).kind(), NodeKind::Syntax);
        assert_eq!(root_child(&tree, 1).kind(), NodeKind::Package);
        assert_eq!(root_child(&tree, 2).kind(), NodeKind::Import);
    }

    #[test]
    fn missing_semicolon_reports_terminator_error() {
        let tree = parse("package foo\n");
        assert!(tree.has_errors());
        assert!(
            tree.errors()
                .iter()
                .any(|e| e.message.contains("expected ';'")),
            "errors: {:?}",
            tree.errors()
        );
        // The statement itself still parsed.
        assert_eq!(root_child(&tree, 0).kind(), NodeKind::Package);
    }

    #[test]
    fn parse_continues_after_malformed_statement() {
        let tree = parse("package foo\npackage bar;\n");
        assert!(tree.has_errors());
        assert_eq!(tree.root().child_count(), 2);
        assert_node(
            root_child(&tree, 1).child(0).unwrap(),
            NodeKind::Identifier,
            "bar",
        );
    }

    #[test]
    fn invalid_top_level_statement_is_burned() {
        let tree = parse("= 3;\npackage foo;\n");
        assert!(tree.has_errors());
        assert!(
            tree.errors()
                .iter()
                .any(|e| e.message.contains("invalid top level statement"))
        );
        assert_eq!(tree.root().child_count(), 1);
        assert_eq!(root_child(&tree, 0).kind(), NodeKind::Package);
    }

    #[test]
    fn unknown_keyword_reports_error() {
        let tree = parse("packge foo;\n");
        assert!(tree.has_errors());
        assert_eq!(tree.root().child_count(), 0);
    }

    #[test]
    fn error_references_offending_line() {
        let tree = parse("syntax = \"proto3\";\npackage = ;\n");
        assert!(tree.has_errors());
        assert!(
            tree.errors().iter().any(|e| e.line() == Some(2)),
            "errors: {:?}",
            tree.errors()
        );
    }

    #[test]
    fn errors_are_in_discovery_order() {
        let tree = parse("package\nimport 42;\n");
        let lines: Vec<_> = tree.errors().iter().map(ParseError::line).collect();
        let mut sorted = lines.clone();
        sorted.sort();
        assert_eq!(lines, sorted);
        assert!(tree.errors().len() >= 2);
    }

    #[test]
    fn standalone_inline_comment() {
        let tree = parse_ok("// a remark about the schema\n");
        let comment = root_child(&tree, 0);
        assert_node(comment, NodeKind::Comment, "//");
        assert_node(
            comment.child(0).unwrap(),
            NodeKind::CommentText,
            "a remark about the schema",
        );
    }

    #[test]
    fn trailing_comment_is_scooped_onto_statement() {
        let tree = parse_ok("package foo; // owning team\n");
        let package = root_child(&tree, 0);
        assert_eq!(package.child_count(), 2);
        let comment = package.child(1).unwrap();
        assert_node(comment, NodeKind::Comment, "//");
        assert_node(comment.child(0).unwrap(), NodeKind::CommentText, "owning team");
    }

    #[test]
    fn block_comment_joins_lines_with_newlines() {
        let tree = parse_ok("/* first line\nsecond line */\n");
        let comment = root_child(&tree, 0);
        assert_node(comment, NodeKind::Comment, "/*");
        assert_node(
            comment.child(0).unwrap(),
            NodeKind::CommentText,
            "first line\nsecond line",
        );
    }

    #[test]
    fn block_comment_drops_interior_punctuation() {
        let tree = parse_ok("/* see { braces } ; */\n");
        let comment = root_child(&tree, 0);
        assert_node(comment.child(0).unwrap(), NodeKind::CommentText, "see braces");
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let tree = parse("/* never closed\n");
        assert!(tree.has_errors());
        // The comment node still lands in the tree.
        assert_eq!(root_child(&tree, 0).kind(), NodeKind::Comment);
    }

    #[test]
    fn stray_comment_close_is_an_error() {
        let tree = parse("*/\npackage foo;\n");
        assert!(tree.has_errors());
        assert_eq!(tree.root().child_count(), 1);
        assert_eq!(root_child(&tree, 0).kind(), NodeKind::Package);
    }

    #[test]
    fn empty_source_parses_clean() {
        let tree = parse_ok("");
        assert_eq!(tree.root().child_count(), 0);
    }

    #[test]
    fn blank_source_parses_clean() {
        let tree = parse_ok("\n\n   \n");
        assert_eq!(tree.root().child_count(), 0);
    }

    #[test]
    fn syntax_with_backtick_quotes() {
        let tree = parse_ok("syntax = `proto3`;");
        let syntax = root_child(&tree, 0);
        assert_node(syntax.child(0).unwrap(), NodeKind::StringLiteral, "proto3");
    }

    #[test]
    fn unterminated_string_is_an_invalid_literal() {
        let tree = parse("import \"half.proto\n");
        assert!(tree.has_errors());
        assert!(
            tree.errors()
                .iter()
                .any(|e| e.message.contains("expected string literal"))
        );
    }

    #[test]
    fn statements_may_share_a_line() {
        let tree = parse_ok("syntax = \"proto3\"; package foo;");
        assert_eq!(tree.root().child_count(), 2);
    }
}
