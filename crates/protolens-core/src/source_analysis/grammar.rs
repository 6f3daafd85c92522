// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Grammar predicates: pure lexeme classifiers for the proto3 grammar.
//!
//! The lexer keeps token kinds coarse, so the parser asks these stateless
//! functions what a lexeme actually is — a keyword, a literal, a scalar type
//! name, and so on. Every predicate is case-sensitive; case-insensitive
//! comparison is an AST equality concern, not a grammar one.

/// The fifteen proto3 scalar type names.
const BASIC_TYPES: [&str; 15] = [
    "double", "float", "int32", "int64", "uint32", "uint64", "sint32", "sint64", "fixed32",
    "fixed64", "sfixed32", "sfixed64", "bool", "string", "bytes",
];

/// Scalar types that may not be used as a map key.
const NON_KEY_TYPES: [&str; 3] = ["double", "float", "bytes"];

/// Returns `true` for a plain identifier: a letter followed by letters,
/// digits, or underscores.
#[must_use]
pub fn is_identifier(lexeme: &str) -> bool {
    let mut chars = lexeme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns `true` for one or more identifiers joined by `.`: `foo`,
/// `foo.bar.Baz`.
#[must_use]
pub fn is_full_identifier(lexeme: &str) -> bool {
    !lexeme.is_empty() && lexeme.split('.').all(is_identifier)
}

/// Returns `true` if the lexeme begins and ends with a matching `"` or
/// `` ` `` quote.
#[must_use]
pub fn is_string_literal(lexeme: &str) -> bool {
    let mut chars = lexeme.chars();
    match (chars.next(), lexeme.chars().last()) {
        (Some(open), Some(close)) => {
            lexeme.chars().count() >= 2 && open == close && (open == '"' || open == '`')
        }
        _ => false,
    }
}

/// Returns `true` for a base-10 integer literal: `0` or a nonzero digit
/// followed by digits.
#[must_use]
pub fn is_decimal_literal(lexeme: &str) -> bool {
    let mut chars = lexeme.chars();
    match chars.next() {
        Some('0') => lexeme.len() == 1,
        Some('1'..='9') => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

fn is_octal_literal(lexeme: &str) -> bool {
    let mut chars = lexeme.chars();
    chars.next() == Some('0') && lexeme.len() > 1 && chars.all(|c| ('0'..='7').contains(&c))
}

fn is_hex_literal(lexeme: &str) -> bool {
    let digits = lexeme
        .strip_prefix("0x")
        .or_else(|| lexeme.strip_prefix("0X"));
    digits.is_some_and(|d| !d.is_empty() && d.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Returns `true` for a decimal, octal, or hexadecimal integer literal.
#[must_use]
pub fn is_integer_literal(lexeme: &str) -> bool {
    is_decimal_literal(lexeme) || is_octal_literal(lexeme) || is_hex_literal(lexeme)
}

/// Returns `true` for a floating-point literal: digits, a `.` with a
/// fraction, and an optional exponent (`1.5`, `2.5e10`, `0.25E-3`).
#[must_use]
pub fn is_float_literal(lexeme: &str) -> bool {
    let (mantissa, exponent) = match lexeme.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (lexeme, None),
    };
    let Some((int_part, frac_part)) = mantissa.split_once('.') else {
        return false;
    };
    if int_part.is_empty()
        || frac_part.is_empty()
        || !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return false;
    }
    match exponent {
        None => true,
        Some(e) => {
            let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        }
    }
}

/// Returns `true` for the boolean literals `true` and `false`.
#[must_use]
pub fn is_boolean_literal(lexeme: &str) -> bool {
    lexeme == "true" || lexeme == "false"
}

/// Returns `true` for one of the fifteen scalar proto3 type names.
#[must_use]
pub fn is_basic_type(lexeme: &str) -> bool {
    BASIC_TYPES.contains(&lexeme)
}

/// Returns `true` for a scalar type usable as a map key (any basic type
/// except `double`, `float`, and `bytes`).
#[must_use]
pub fn is_map_key_type(lexeme: &str) -> bool {
    is_basic_type(lexeme) && !NON_KEY_TYPES.contains(&lexeme)
}

/// Returns `true` if the lexeme can begin a message field: `repeated`, a
/// basic type, or a user type named by a full identifier.
#[must_use]
pub fn is_field_start(lexeme: &str) -> bool {
    is_repeated(lexeme) || is_basic_type(lexeme) || is_full_identifier(lexeme)
}

/// Returns `true` for the `repeated` field modifier.
#[must_use]
pub fn is_repeated(lexeme: &str) -> bool {
    lexeme == "repeated"
}

/// Returns `true` for the assignment operator `=`.
#[must_use]
pub fn is_assignment(lexeme: &str) -> bool {
    lexeme == "="
}

/// Returns `true` for the empty statement `;`.
#[must_use]
pub fn is_empty_statement(lexeme: &str) -> bool {
    lexeme == ";"
}

/// Returns `true` for the import modifiers `weak` and `public`.
#[must_use]
pub fn is_import_modifier(lexeme: &str) -> bool {
    lexeme == "weak" || lexeme == "public"
}

/// Returns `true` for the `syntax` keyword.
#[must_use]
pub fn is_syntax(lexeme: &str) -> bool {
    lexeme == "syntax"
}

/// Returns `true` for the `import` keyword.
#[must_use]
pub fn is_import(lexeme: &str) -> bool {
    lexeme == "import"
}

/// Returns `true` for the `package` keyword.
#[must_use]
pub fn is_package(lexeme: &str) -> bool {
    lexeme == "package"
}

/// Returns `true` for the `option` keyword.
#[must_use]
pub fn is_option(lexeme: &str) -> bool {
    lexeme == "option"
}

/// Returns `true` for the `enum` keyword.
#[must_use]
pub fn is_enum(lexeme: &str) -> bool {
    lexeme == "enum"
}

/// Returns `true` for the `service` keyword.
#[must_use]
pub fn is_service(lexeme: &str) -> bool {
    lexeme == "service"
}

/// Returns `true` for the `message` keyword.
#[must_use]
pub fn is_message(lexeme: &str) -> bool {
    lexeme == "message"
}

/// Returns `true` for the `map` keyword.
#[must_use]
pub fn is_map(lexeme: &str) -> bool {
    lexeme == "map"
}

/// Returns `true` for the `oneof` keyword.
#[must_use]
pub fn is_oneof(lexeme: &str) -> bool {
    lexeme == "oneof"
}

/// Returns `true` for the `reserved` keyword.
#[must_use]
pub fn is_reserved(lexeme: &str) -> bool {
    lexeme == "reserved"
}

/// Returns `true` for the `rpc` keyword.
#[must_use]
pub fn is_rpc(lexeme: &str) -> bool {
    lexeme == "rpc"
}

/// Returns `true` for the `stream` modifier.
#[must_use]
pub fn is_stream(lexeme: &str) -> bool {
    lexeme == "stream"
}

/// Returns `true` for the `returns` keyword.
#[must_use]
pub fn is_returns(lexeme: &str) -> bool {
    lexeme == "returns"
}

/// Returns `true` for the range keyword `to` in reservations.
#[must_use]
pub fn is_to(lexeme: &str) -> bool {
    lexeme == "to"
}

/// Returns `true` for the inline comment opener `//`.
#[must_use]
pub fn is_inline_comment(lexeme: &str) -> bool {
    lexeme == "//"
}

/// Returns `true` for the block comment opener `/*`.
#[must_use]
pub fn is_multiline_comment_open(lexeme: &str) -> bool {
    lexeme == "/*"
}

/// Returns `true` for the block comment closer `*/`.
#[must_use]
pub fn is_multiline_comment_close(lexeme: &str) -> bool {
    lexeme == "*/"
}
