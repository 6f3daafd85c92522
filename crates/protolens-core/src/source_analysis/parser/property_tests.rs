// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the parser.
//!
//! These tests use `proptest` to verify parser invariants over generated
//! inputs:
//!
//! 1. **Parser never panics** — arbitrary string input always returns a tree
//! 2. **Error spans within input** — all spans have `end <= input.len()`
//! 3. **Parent correctness** — every reachable non-root node is listed by
//!    its parent
//! 4. **Valid fragments parse clean** — the seed corpus produces no errors

use proptest::prelude::*;

use crate::ast::NodeKind;
use crate::ast_walker::walk_tree;
use crate::source_analysis::parse;

// ============================================================================
// Near-valid proto3 generators
// ============================================================================

/// Proto3 statement fragments for composing near-valid inputs.
const FRAGMENTS: &[&str] = &[
    "syntax = \"proto3\";",
    "package foo.bar;",
    "import \"other.proto\";",
    "import public \"shared.proto\";",
    "option java_package = \"com.example\";",
    "option cc_enable_arenas = true;",
    "enum Corpus {\n  UNIVERSAL = 0;\n  WEB = 1;\n}",
    "message Outer {\n  int64 ival = 1;\n}",
    "message M {\n  repeated string names = 4;\n  map<string, Project> projects = 3;\n}",
    "message M {\n  reserved 2, 15, 9 to 11;\n}",
    "message M {\n  oneof choice {\n    string name = 1;\n    int32 id = 2;\n  }\n}",
    "service Search {\n  rpc Lookup (Request) returns (stream Response);\n}",
    "// a comment line",
    "/* a block\ncomment */",
];

/// Generates a proto3 fragment from the seed corpus.
fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(FRAGMENTS).prop_map(std::string::ToString::to_string)
}

/// Generates a file of up to four fragments joined by newlines.
fn fragment_file() -> impl Strategy<Value = String> {
    prop::collection::vec(valid_fragment(), 1..4).prop_map(|fragments| fragments.join("\n"))
}

/// Generates a truncated fragment (cut at a random char boundary).
fn truncated_fragment() -> impl Strategy<Value = String> {
    valid_fragment().prop_flat_map(|s| {
        let len = s.len();
        (0..=len).prop_map(move |cut| {
            let mut safe_cut = cut;
            while !s.is_char_boundary(safe_cut) {
                safe_cut -= 1;
            }
            s[..safe_cut].to_string()
        })
    })
}

/// Generates a fragment with its punctuation scrambled.
fn scrambled_fragment() -> impl Strategy<Value = String> {
    valid_fragment().prop_map(|s| {
        s.chars()
            .map(|c| match c {
                ';' => ',',
                '{' => '<',
                '}' => '>',
                '=' => '.',
                other => other,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn parser_never_panics_on_arbitrary_input(input in ".*") {
        let _ = parse(&input);
    }

    #[test]
    fn parser_never_panics_on_proto_like_input(input in "[a-z0-9 page.;{}=<>\\[\\]\"/\n]*") {
        let _ = parse(&input);
    }

    #[test]
    fn valid_fragments_parse_without_errors(source in fragment_file()) {
        let tree = parse(&source);
        prop_assert!(
            !tree.has_errors(),
            "errors {:?} for source {source:?}",
            tree.errors()
        );
    }

    #[test]
    fn error_spans_stay_within_the_input(source in truncated_fragment()) {
        let tree = parse(&source);
        for error in tree.errors() {
            if let Some(span) = error.span {
                prop_assert!(span.end() as usize <= source.len());
            }
        }
    }

    #[test]
    fn scrambled_input_reports_errors_without_panicking(source in scrambled_fragment()) {
        let tree = parse(&source);
        for error in tree.errors() {
            if let Some(span) = error.span {
                prop_assert!(span.end() as usize <= source.len());
            }
        }
    }

    #[test]
    fn reachable_nodes_have_correct_parents(source in fragment_file()) {
        let tree = parse(&source);
        let mut ok = true;
        walk_tree(&tree, &mut |node| {
            match node.parent() {
                Some(parent) => {
                    if !parent.children().any(|c| c.id() == node.id()) {
                        ok = false;
                    }
                }
                None => {
                    if node.kind() != NodeKind::Root {
                        ok = false;
                    }
                }
            }
        });
        prop_assert!(ok, "broken parent link in tree for {source:?}");
    }
}
