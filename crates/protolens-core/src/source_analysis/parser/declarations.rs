// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Block-construct parsing for proto3 schemas.
//!
//! This module handles every `{ ... }` production:
//! - `message` bodies with fields, maps, oneofs, reservations, and nested
//!   definitions
//! - `enum` bodies with constants and options
//! - `oneof` groups
//! - `service` bodies with rpc declarations
//!
//! Every body loop carries the same obligation: it must consume at least
//! one token per iteration. When no production matches and nothing was
//! consumed, the loop force-discards a token and records an error rather
//! than spinning.

use tracing::trace;

use crate::ast::{NodeId, NodeKind};
use crate::source_analysis::{Position, Token, TokenKind, grammar};

use super::Parser;

impl Parser {
    // ========================================================================
    // Messages
    // ========================================================================

    /// Parses `message Name { ... }`.
    pub(super) fn parse_message(&mut self) -> Option<NodeId> {
        let keyword = self.dequeue()?;
        let position = keyword.position();
        let node = self
            .tree
            .add_node(NodeKind::Message, keyword.into_lexeme(), position);

        let Some(name) = self.parse_identifier() else {
            self.error_here("expected message name");
            return None;
        };
        self.tree.add_child(node, name);

        if !self.expect_control("{") {
            return None;
        }
        self.scoop_comment(node);
        self.dump_endline();

        loop {
            self.skip_end_lines();
            let Some(token) = self.peek().cloned() else {
                self.error("expected '}' to close the message body");
                break;
            };
            if token.is_control("}") {
                self.dequeue();
                self.scoop_comment(node);
                self.dump_endline();
                break;
            }

            let before = self.consumed();
            self.parse_message_body_statement(node, &token);
            self.ensure_progress(before, "message body");
        }
        Some(node)
    }

    /// Tries each message-body production in turn for the statement that
    /// starts at `token`.
    fn parse_message_body_statement(&mut self, node: NodeId, token: &Token) {
        let lexeme = token.lexeme();
        if token.kind() == TokenKind::Control && grammar::is_empty_statement(lexeme) {
            self.dequeue();
        } else if token.is_comment() && grammar::is_inline_comment(lexeme) {
            if let Some(comment) = self.parse_inline_comment() {
                self.tree.add_child(node, comment);
            }
        } else if token.is_comment() && grammar::is_multiline_comment_open(lexeme) {
            if let Some(comment) = self.parse_multiline_comment() {
                self.tree.add_child(node, comment);
            }
        } else if token.is_id() && grammar::is_reserved(lexeme) {
            if let Some(reserved) = self.parse_reservation() {
                self.tree.add_child(node, reserved);
            }
        } else if token.is_id() && grammar::is_message(lexeme) {
            if let Some(nested) = self.parse_message() {
                self.tree.add_child(node, nested);
            }
        } else if token.is_id() && grammar::is_enum(lexeme) {
            if let Some(nested) = self.parse_enum() {
                self.tree.add_child(node, nested);
            }
        } else if token.is_id() && grammar::is_option(lexeme) {
            if let Some(option) = self.parse_option() {
                self.tree.add_child(node, option);
            }
        } else if token.is_id() && grammar::is_oneof(lexeme) {
            if let Some(oneof) = self.parse_oneof() {
                self.tree.add_child(node, oneof);
            }
        } else if token.is_id() && grammar::is_map(lexeme) {
            if let Some(map) = self.parse_map_field() {
                self.tree.add_child(node, map);
            }
        } else if token.is_id() && grammar::is_field_start(lexeme) {
            if let Some(field) = self.parse_field() {
                self.tree.add_child(node, field);
            }
        } else {
            self.error_at(format!("invalid statement in message body: '{token}'"), token);
            self.burn_line();
        }
    }

    /// Parses `[repeated] type name = number [options];`.
    pub(super) fn parse_field(&mut self) -> Option<NodeId> {
        let repeated = self.dequeue_if(|t| t.is_id() && grammar::is_repeated(t.lexeme()));

        let Some(type_token) = self.dequeue_if(|t| {
            t.is_id() && (grammar::is_basic_type(t.lexeme()) || grammar::is_full_identifier(t.lexeme()))
        }) else {
            self.error_here("expected field type");
            return None;
        };

        let position = repeated.as_ref().map_or(type_token.position(), Token::position);
        let node = self
            .tree
            .add_node(NodeKind::Field, type_token.lexeme(), position);

        if let Some(modifier) = repeated {
            let modifier_position = modifier.position();
            let repeated_node =
                self.tree
                    .add_node(NodeKind::Repeated, modifier.into_lexeme(), modifier_position);
            self.tree.add_child(node, repeated_node);
        }

        // A recognized scalar is a builtin type; anything else names a
        // message or enum defined elsewhere.
        let type_kind = if grammar::is_basic_type(type_token.lexeme()) {
            NodeKind::Type
        } else {
            NodeKind::UserType
        };
        let type_position = type_token.position();
        let type_node = self
            .tree
            .add_node(type_kind, type_token.into_lexeme(), type_position);
        self.tree.add_child(node, type_node);

        let Some(name) = self.parse_identifier() else {
            self.error_here("expected field name");
            return None;
        };
        self.tree.add_child(node, name);

        if !self.expect_assignment() {
            return None;
        }
        let Some(number) = self.parse_field_number() else {
            self.error_here("expected field number");
            return None;
        };
        self.tree.add_child(node, number);

        if self.peek().is_some_and(|t| t.is_control("[")) {
            self.parse_field_options(node);
        }

        self.terminate_single_line_statement();
        self.scoop_comment(node);
        self.dump_endline();
        Some(node)
    }

    /// Parses `[name = constant, ...]` after a field number, attaching one
    /// `Option` node per entry.
    fn parse_field_options(&mut self, field: NodeId) {
        self.dequeue(); // [
        loop {
            let Some(name_token) =
                self.dequeue_if(|t| t.is_id() && grammar::is_full_identifier(t.lexeme()))
            else {
                self.error_here("expected option name in field options");
                self.recover_field_options();
                return;
            };
            let position = name_token.position();
            let option = self
                .tree
                .add_node(NodeKind::Option, name_token.lexeme(), position);
            let name = self
                .tree
                .add_node(NodeKind::Identifier, name_token.into_lexeme(), position);
            self.tree.add_child(option, name);

            if !self.expect_assignment() {
                self.recover_field_options();
                return;
            }
            let Some(value) = self.parse_constant() else {
                self.error_here("expected option value in field options");
                self.recover_field_options();
                return;
            };
            self.tree.add_child(option, value);
            self.tree.add_child(field, option);

            match self.dequeue() {
                Some(token) if token.is_control(",") => {}
                Some(token) if token.is_control("]") => return,
                Some(token) => {
                    self.error_at(
                        format!("expected ',' or ']' in field options, found '{token}'"),
                        &token,
                    );
                    self.recover_field_options();
                    return;
                }
                None => {
                    self.error("expected ']' to close field options");
                    return;
                }
            }
        }
    }

    /// Skips to the closing `]` of a field-option list, stopping at the end
    /// of the line so a missing bracket cannot swallow the file.
    fn recover_field_options(&mut self) {
        loop {
            let Some(token) = self.peek().cloned() else { return };
            if token.is_control("]") {
                self.dequeue();
                return;
            }
            if token.is_end_line() {
                return;
            }
            self.dequeue();
        }
    }

    /// Parses `map<key, value> name = number;`.
    ///
    /// The map node's children follow the documented order — name, key
    /// type, value type, number — rather than source order.
    pub(super) fn parse_map_field(&mut self) -> Option<NodeId> {
        let keyword = self.dequeue()?;
        let position = keyword.position();
        let node = self
            .tree
            .add_node(NodeKind::Map, keyword.into_lexeme(), position);

        if !self.expect_control("<") {
            return None;
        }
        let Some(key_token) = self.dequeue_if(|t| t.is_id() && grammar::is_map_key_type(t.lexeme()))
        else {
            self.error_here("expected map key type");
            return None;
        };
        if !self.expect_control(",") {
            return None;
        }
        let Some(value_token) = self.dequeue_if(|t| {
            t.is_id() && (grammar::is_basic_type(t.lexeme()) || grammar::is_full_identifier(t.lexeme()))
        }) else {
            self.error_here("expected map value type");
            return None;
        };
        if !self.expect_control(">") {
            return None;
        }
        let Some(name) = self.parse_identifier() else {
            self.error_here("expected map field name");
            return None;
        };
        if !self.expect_assignment() {
            return None;
        }
        let Some(number) = self.parse_field_number() else {
            self.error_here("expected field number");
            return None;
        };

        self.tree.add_child(node, name);
        let key_position = key_token.position();
        let key = self
            .tree
            .add_node(NodeKind::MapKey, key_token.into_lexeme(), key_position);
        self.tree.add_child(node, key);
        let value_position = value_token.position();
        let value = self
            .tree
            .add_node(NodeKind::MapValue, value_token.into_lexeme(), value_position);
        self.tree.add_child(node, value);
        self.tree.add_child(node, number);

        self.terminate_single_line_statement();
        self.scoop_comment(node);
        self.dump_endline();
        Some(node)
    }

    /// Parses `oneof Name { ... }` with fields and nested oneofs.
    pub(super) fn parse_oneof(&mut self) -> Option<NodeId> {
        let keyword = self.dequeue()?;
        let position = keyword.position();
        let node = self
            .tree
            .add_node(NodeKind::OneOfField, keyword.into_lexeme(), position);

        let Some(name) = self.parse_identifier() else {
            self.error_here("expected oneof name");
            return None;
        };
        self.tree.add_child(node, name);

        if !self.expect_control("{") {
            return None;
        }
        self.scoop_comment(node);
        self.dump_endline();

        loop {
            self.skip_end_lines();
            let Some(token) = self.peek().cloned() else {
                self.error("expected '}' to close the oneof body");
                break;
            };
            if token.is_control("}") {
                self.dequeue();
                self.scoop_comment(node);
                self.dump_endline();
                break;
            }

            let before = self.consumed();
            let lexeme = token.lexeme();
            if token.kind() == TokenKind::Control && grammar::is_empty_statement(lexeme) {
                self.dequeue();
            } else if token.is_comment() && grammar::is_inline_comment(lexeme) {
                if let Some(comment) = self.parse_inline_comment() {
                    self.tree.add_child(node, comment);
                }
            } else if token.is_comment() && grammar::is_multiline_comment_open(lexeme) {
                if let Some(comment) = self.parse_multiline_comment() {
                    self.tree.add_child(node, comment);
                }
            } else if token.is_id() && grammar::is_oneof(lexeme) {
                if let Some(nested) = self.parse_oneof() {
                    self.tree.add_child(node, nested);
                }
            } else if token.is_id() && grammar::is_field_start(lexeme) {
                if let Some(field) = self.parse_field() {
                    self.tree.add_child(node, field);
                }
            } else {
                self.error_at(format!("invalid statement in oneof body: '{token}'"), &token);
                self.burn_line();
            }
            self.ensure_progress(before, "oneof body");
        }
        Some(node)
    }

    // ========================================================================
    // Enums
    // ========================================================================

    /// Parses `enum Name { ... }`.
    pub(super) fn parse_enum(&mut self) -> Option<NodeId> {
        let keyword = self.dequeue()?;
        let position = keyword.position();
        let node = self
            .tree
            .add_node(NodeKind::Enum, keyword.into_lexeme(), position);

        let Some(name) = self.parse_identifier() else {
            self.error_here("expected enum name");
            return None;
        };
        self.tree.add_child(node, name);

        if !self.expect_control("{") {
            return None;
        }
        self.scoop_comment(node);
        self.dump_endline();

        loop {
            self.skip_end_lines();
            let Some(token) = self.peek().cloned() else {
                self.error("expected '}' to close the enum body");
                break;
            };
            if token.is_control("}") {
                self.dequeue();
                self.scoop_comment(node);
                self.dump_endline();
                break;
            }

            let before = self.consumed();
            let lexeme = token.lexeme();
            if token.kind() == TokenKind::Control && grammar::is_empty_statement(lexeme) {
                self.dequeue();
            } else if token.is_comment() && grammar::is_inline_comment(lexeme) {
                if let Some(comment) = self.parse_inline_comment() {
                    self.tree.add_child(node, comment);
                }
            } else if token.is_comment() && grammar::is_multiline_comment_open(lexeme) {
                if let Some(comment) = self.parse_multiline_comment() {
                    self.tree.add_child(node, comment);
                }
            } else if token.is_id() && grammar::is_option(lexeme) {
                if let Some(option) = self.parse_option() {
                    self.tree.add_child(node, option);
                }
            } else if token.is_id() && grammar::is_identifier(lexeme) {
                if let Some(constant) = self.parse_enum_field() {
                    self.tree.add_child(node, constant);
                }
            } else {
                self.error_at(format!("invalid statement in enum body: '{token}'"), &token);
                self.burn_line();
            }
            self.ensure_progress(before, "enum body");
        }
        Some(node)
    }

    /// Parses one `NAME = number;` enum constant.
    fn parse_enum_field(&mut self) -> Option<NodeId> {
        let name_token = self.dequeue_if(|t| t.is_id() && grammar::is_identifier(t.lexeme()))?;
        let position = name_token.position();
        let node = self
            .tree
            .add_node(NodeKind::EnumField, name_token.lexeme(), position);
        let name = self
            .tree
            .add_node(NodeKind::Identifier, name_token.into_lexeme(), position);
        self.tree.add_child(node, name);

        if !self.expect_assignment() {
            return None;
        }
        let Some(value) = self.parse_integer_literal() else {
            self.error_here("expected integer value for enum constant");
            return None;
        };
        self.tree.add_child(node, value);

        self.terminate_single_line_statement();
        self.scoop_comment(node);
        self.dump_endline();
        Some(node)
    }

    // ========================================================================
    // Reservations
    // ========================================================================

    /// Parses `reserved 2, 15, 9 to 11;` or `reserved "foo", "bar";`.
    pub(super) fn parse_reservation(&mut self) -> Option<NodeId> {
        let keyword = self.dequeue()?;
        let position = keyword.position();
        let node = self
            .tree
            .add_node(NodeKind::Reserved, keyword.into_lexeme(), position);

        match self.peek().cloned() {
            Some(token) if token.is_string() => self.parse_reserved_names(node)?,
            Some(token) if token.is_numeric() => self.parse_reserved_ranges(node)?,
            _ => {
                self.error_here("expected field numbers or field names after 'reserved'");
                return None;
            }
        }

        self.scoop_comment(node);
        self.dump_endline();
        Some(node)
    }

    /// Parses a comma-separated list of quoted field names up to `;`.
    fn parse_reserved_names(&mut self, node: NodeId) -> Option<()> {
        loop {
            let Some(name) = self.parse_string_literal() else {
                self.error_here("expected field name in reserved statement");
                return None;
            };
            self.tree.add_child(node, name);

            match self.dequeue() {
                Some(token) if token.is_control(",") => {}
                Some(token)
                    if token.kind() == TokenKind::Control
                        && grammar::is_empty_statement(token.lexeme()) =>
                {
                    return Some(());
                }
                Some(token) => {
                    self.error_at(
                        format!("expected ',' or ';' in reserved statement, found '{token}'"),
                        &token,
                    );
                    return None;
                }
                None => {
                    self.error("expected ';' at the end of the statement");
                    return None;
                }
            }
        }
    }

    /// Parses comma-separated field numbers and `N to M` ranges up to `;`.
    ///
    /// Ranges are flattened: each reserved number becomes one
    /// `IntegerLiteral` child, in source order, duplicates preserved. An
    /// inverted range (`9 to 7`) contributes its start and nothing further.
    fn parse_reserved_ranges(&mut self, node: NodeId) -> Option<()> {
        let mut buffer: Vec<(u64, Position)> = Vec::new();
        loop {
            let Some(token) = self.dequeue() else {
                self.error("expected ';' at the end of the statement");
                return None;
            };

            if token.is_control(",") {
                if buffer.is_empty() {
                    self.error_at("unexpected ',' in reserved statement", &token);
                    return None;
                }
            } else if token.is_numeric() && grammar::is_decimal_literal(token.lexeme()) {
                let Ok(value) = token.lexeme().parse::<u64>() else {
                    self.error_at(
                        format!("field number '{}' is out of range", token.lexeme()),
                        &token,
                    );
                    return None;
                };
                buffer.push((value, token.position()));
            } else if token.is_id() && grammar::is_to(token.lexeme()) {
                let Some((start, start_position)) = buffer.pop() else {
                    self.error_at("'to' without a range start", &token);
                    return None;
                };
                let Some(end_token) =
                    self.dequeue_if(|t| t.is_numeric() && grammar::is_decimal_literal(t.lexeme()))
                else {
                    self.error_here("expected integer after 'to'");
                    return None;
                };
                let Ok(end) = end_token.lexeme().parse::<u64>() else {
                    self.error_at(
                        format!("field number '{}' is out of range", end_token.lexeme()),
                        &end_token,
                    );
                    return None;
                };
                buffer.push((start, start_position));
                let mut value = start;
                while value < end {
                    value += 1;
                    buffer.push((value, end_token.position()));
                }
            } else if token.kind() == TokenKind::Control
                && grammar::is_empty_statement(token.lexeme())
            {
                for (value, value_position) in buffer {
                    let child = self.tree.add_node(
                        NodeKind::IntegerLiteral,
                        value.to_string(),
                        value_position,
                    );
                    self.tree.add_child(node, child);
                }
                return Some(());
            } else {
                self.error_at(format!("invalid reserved range element '{token}'"), &token);
                return None;
            }
        }
    }

    // ========================================================================
    // Services
    // ========================================================================

    /// Parses `service Name { ... }` with options and rpc declarations.
    pub(super) fn parse_service(&mut self) -> Option<NodeId> {
        let keyword = self.dequeue()?;
        let position = keyword.position();
        let node = self
            .tree
            .add_node(NodeKind::Service, keyword.into_lexeme(), position);

        let Some(name) = self.parse_identifier() else {
            self.error_here("expected service name");
            return None;
        };
        self.tree.add_child(node, name);

        if !self.expect_control("{") {
            return None;
        }
        self.scoop_comment(node);
        self.dump_endline();

        loop {
            self.skip_end_lines();
            let Some(token) = self.peek().cloned() else {
                self.error("expected '}' to close the service body");
                break;
            };
            if token.is_control("}") {
                self.dequeue();
                self.scoop_comment(node);
                self.dump_endline();
                break;
            }

            let before = self.consumed();
            let lexeme = token.lexeme();
            if token.kind() == TokenKind::Control && grammar::is_empty_statement(lexeme) {
                self.dequeue();
            } else if token.is_comment() && grammar::is_inline_comment(lexeme) {
                if let Some(comment) = self.parse_inline_comment() {
                    self.tree.add_child(node, comment);
                }
            } else if token.is_comment() && grammar::is_multiline_comment_open(lexeme) {
                if let Some(comment) = self.parse_multiline_comment() {
                    self.tree.add_child(node, comment);
                }
            } else if token.is_id() && grammar::is_option(lexeme) {
                if let Some(option) = self.parse_option() {
                    self.tree.add_child(node, option);
                }
            } else if token.is_id() && grammar::is_rpc(lexeme) {
                self.parse_rpc(node);
            } else {
                self.error_at(format!("invalid statement in service body: '{token}'"), &token);
                self.burn_line();
            }
            self.ensure_progress(before, "service body");
        }
        Some(node)
    }

    /// Parses `rpc Name (in) returns (out) ;` or with an options body.
    ///
    /// Each rpc contributes its name, a `ServiceInputType`, and a
    /// `ServiceReturnType` (plus any body options) directly to the service
    /// node; a `stream` modifier becomes a `Streaming` child of the type it
    /// modifies.
    fn parse_rpc(&mut self, service: NodeId) -> Option<()> {
        self.dequeue(); // rpc

        let Some(name) = self.parse_identifier() else {
            self.error_here("expected rpc name");
            return None;
        };

        if !self.expect_control("(") {
            return None;
        }
        let input = self.parse_rpc_type(NodeKind::ServiceInputType)?;
        if !self.expect_control(")") {
            return None;
        }

        if self
            .dequeue_if(|t| t.is_id() && grammar::is_returns(t.lexeme()))
            .is_none()
        {
            self.error_here("expected 'returns' after the rpc input type");
            return None;
        }

        if !self.expect_control("(") {
            return None;
        }
        let output = self.parse_rpc_type(NodeKind::ServiceReturnType)?;
        if !self.expect_control(")") {
            return None;
        }

        self.tree.add_child(service, name);
        self.tree.add_child(service, input);
        self.tree.add_child(service, output);

        match self.dequeue() {
            Some(token)
                if token.kind() == TokenKind::Control
                    && grammar::is_empty_statement(token.lexeme()) =>
            {
                self.scoop_comment(service);
                self.dump_endline();
                Some(())
            }
            Some(token) if token.is_control("{") => {
                self.dump_endline();
                loop {
                    self.skip_end_lines();
                    let Some(token) = self.peek().cloned() else {
                        self.error("expected '}' to close the rpc body");
                        break;
                    };
                    if token.is_control("}") {
                        self.dequeue();
                        self.dump_endline();
                        break;
                    }

                    let before = self.consumed();
                    if token.kind() == TokenKind::Control
                        && grammar::is_empty_statement(token.lexeme())
                    {
                        self.dequeue();
                    } else if token.is_id() && grammar::is_option(token.lexeme()) {
                        if let Some(option) = self.parse_option() {
                            self.tree.add_child(service, option);
                        }
                    } else {
                        self.error_at(format!("invalid statement in rpc body: '{token}'"), &token);
                        self.burn_line();
                    }
                    self.ensure_progress(before, "rpc body");
                }
                Some(())
            }
            Some(token) => {
                self.error_at(
                    format!("expected ';' or '{{' after the rpc signature, found '{token}'"),
                    &token,
                );
                None
            }
            None => {
                self.error("expected ';' or '{' after the rpc signature");
                None
            }
        }
    }

    /// Parses `[stream] TypeName` inside rpc parentheses.
    fn parse_rpc_type(&mut self, kind: NodeKind) -> Option<NodeId> {
        let stream = self.dequeue_if(|t| t.is_id() && grammar::is_stream(t.lexeme()));

        let Some(type_token) =
            self.dequeue_if(|t| t.is_id() && grammar::is_full_identifier(t.lexeme()))
        else {
            self.error_here("expected rpc message type");
            return None;
        };

        let position = stream.as_ref().map_or(type_token.position(), Token::position);
        let node = self.tree.add_node(kind, type_token.into_lexeme(), position);
        if let Some(modifier) = stream {
            let modifier_position = modifier.position();
            let streaming = self.tree.add_node(
                NodeKind::Streaming,
                modifier.into_lexeme(),
                modifier_position,
            );
            self.tree.add_child(node, streaming);
        }
        Some(node)
    }

    // ========================================================================
    // Forward Progress
    // ========================================================================

    /// Returns how many tokens have been consumed so far.
    fn consumed(&self) -> usize {
        self.current
    }

    /// Force-discards one token when a body-loop iteration consumed
    /// nothing, so malformed input can never stall the parser.
    fn ensure_progress(&mut self, before: usize, context: &str) {
        if self.consumed() == before {
            if let Some(stuck) = self.dequeue() {
                trace!(context, "force-advancing past unconsumed token");
                self.error_at(format!("unexpected '{stuck}' in {context}"), &stuck);
            }
        }
    }
}
