// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for proto3 schemas.
//!
//! The AST is a uniform tree: every node is a [`NodeKind`] tag plus a
//! textual value and an ordered child list. Nodes live in an arena owned by
//! the [`SyntaxTree`]; a [`NodeId`] is a node's unique identity, and parent
//! links are indices rather than owning pointers, so the parent/child cycle
//! never owns itself. Dropping the tree reclaims every node and error in
//! one step.
//!
//! # Design Philosophy
//!
//! - **Error recovery first** - the parser always returns a tree; the
//!   accumulated [`ParseError`]s ride along on it
//! - **Uniform nodes** - one node type for every construct keeps walkers
//!   and equality trivial
//! - **Value equality is case-insensitive** - proto3 identifiers are ASCII,
//!   so comparison folds ASCII case and nothing else
//!
//! # Example
//!
//! ```
//! use protolens_core::ast::{NodeKind, SyntaxTree};
//! use protolens_core::source_analysis::Position;
//!
//! // Hand-build the tree for `syntax = "proto3";`
//! let mut tree = SyntaxTree::new();
//! let syntax = tree.add_node(NodeKind::Syntax, "syntax", Position::new(1, 1));
//! let value = tree.add_node(NodeKind::StringLiteral, "proto3", Position::new(1, 10));
//! tree.add_child(syntax, value);
//! tree.add_child(tree.root_id(), syntax);
//!
//! let root = tree.root();
//! assert_eq!(root.child_count(), 1);
//! assert_eq!(root.child(0).unwrap().kind(), NodeKind::Syntax);
//! ```

use std::fmt;

use ecow::EcoString;

use crate::source_analysis::{ParseError, Position};

/// The kind of an AST node.
///
/// This is a closed enumeration: the parser only ever produces these kinds.
/// A few kinds exist for grammar positions no current production emits
/// (`Assignment`, `EnumConstant`); they stay in the enumeration so node
/// consumers can match exhaustively today and pick them up when a
/// production starts emitting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The distinguished tree root. Never appears below the root.
    Root,
    /// A comment; its text lives in a `CommentText` child.
    Comment,
    /// The collected text of a comment.
    CommentText,
    /// A plain or dotted identifier.
    Identifier,
    /// Not currently produced by any parser production.
    Assignment,
    /// A string literal, quotes stripped.
    StringLiteral,
    /// An integer literal.
    IntegerLiteral,
    /// A floating-point literal (option constants).
    FloatLiteral,
    /// A boolean literal (option constants).
    BooleanLiteral,
    /// A `syntax = "proto3";` declaration.
    Syntax,
    /// A `package` declaration.
    Package,
    /// An `import` declaration.
    Import,
    /// The `weak` or `public` modifier on an import.
    ImportModifier,
    /// An `option` statement or a bracketed field option.
    Option,
    /// An `enum` definition.
    Enum,
    /// Not currently produced by any parser production.
    EnumConstant,
    /// A `message` definition.
    Message,
    /// A `oneof` group.
    OneOfField,
    /// A message field.
    Field,
    /// The wire number assigned to a field.
    FieldNumber,
    /// A scalar (built-in) field type.
    Type,
    /// A user-defined field type referenced by full identifier.
    UserType,
    /// The `repeated` modifier on a field.
    Repeated,
    /// A single `NAME = number;` entry in an enum body.
    EnumField,
    /// A `map<key, value>` field.
    Map,
    /// The key type of a map field.
    MapKey,
    /// The value type of a map field.
    MapValue,
    /// A `service` definition.
    Service,
    /// The `stream` modifier on an rpc type.
    Streaming,
    /// The output type of an rpc.
    ServiceReturnType,
    /// The input type of an rpc.
    ServiceInputType,
    /// A `reserved` statement.
    Reserved,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The unique identity of a node within its [`SyntaxTree`].
///
/// Ids are opaque arena indices. They are only meaningful against the tree
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena storage for one node.
#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    value: EcoString,
    position: Position,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An abstract syntax tree plus the parse errors discovered while building
/// it.
///
/// The tree owns every node; the root (kind [`NodeKind::Root`]) is created
/// on construction and is the only node without a parent. The error list is
/// in discovery order. A non-empty error list means the tree may be
/// partially populated and should not feed semantic analysis.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    errors: Vec<ParseError>,
}

impl SyntaxTree {
    /// Creates a tree holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Root,
                value: EcoString::new(),
                position: Position::default(),
                parent: None,
                children: Vec::new(),
            }],
            errors: Vec::new(),
        }
    }

    /// Returns the id of the root node.
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns a reference to the root node.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        self.node(NodeId::ROOT)
    }

    /// Allocates a detached node and returns its id.
    ///
    /// The node becomes part of the tree proper once attached with
    /// [`add_child`](Self::add_child). Nodes allocated by a production that
    /// later fails stay detached and unreachable; they are reclaimed with
    /// the tree.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        value: impl Into<EcoString>,
        position: Position,
    ) -> NodeId {
        debug_assert!(kind != NodeKind::Root, "only the tree constructs the root");
        #[expect(
            clippy::cast_possible_truncation,
            reason = "trees with over 4 billion nodes are not supported"
        )]
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            value: value.into(),
            position,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` to `parent`'s child list and sets its parent link.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.nodes[child.index()].parent.is_none(),
            "node attached twice"
        );
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Returns a reference to the given node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    /// Records the errors collected during parsing.
    pub fn attach_errors(&mut self, errors: Vec<ParseError>) {
        self.errors.extend(errors);
    }

    /// Returns the parse errors in discovery order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns `true` if parsing recorded at least one error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let data = self.data(id);
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        if data.value.is_empty() {
            writeln!(f, "{}", data.kind)?;
        } else {
            writeln!(f, "{} {:?}", data.kind, data.value.as_str())?;
        }
        for &child in &data.children {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SyntaxTree {
    /// Renders the reachable tree as an indented outline, one node per
    /// line. Intended for debugging and test failure output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, NodeId::ROOT, 0)
    }
}

/// A borrowed view of one node in a [`SyntaxTree`].
///
/// `NodeRef` implements the AST equality semantics: two non-root nodes are
/// equal iff their kinds match, their values match ASCII
/// case-insensitively, and their children are equal in order. Two roots
/// compare by children alone, and a root never equals a non-root. Nodes
/// from different trees may be compared.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Returns this node's id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns this node's kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    /// Returns this node's textual value. Possibly empty.
    #[must_use]
    pub fn value(&self) -> &'a str {
        &self.tree.data(self.id).value
    }

    /// Returns the source position of the token that produced this node.
    #[must_use]
    pub fn position(&self) -> Position {
        self.data().position
    }

    /// Returns this node's parent, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    /// Returns the number of children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    /// Returns the `index`th child, if present.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        self.data()
            .children
            .get(index)
            .map(|&id| self.tree.node(id))
    }

    /// Iterates over this node's children in order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + '_ {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.node(id))
    }

    /// Returns the first child of the given kind, if any.
    #[must_use]
    pub fn find_child(&self, kind: NodeKind) -> Option<NodeRef<'a>> {
        self.children().find(|c| c.kind() == kind)
    }

    fn data(&self) -> &'a NodeData {
        self.tree.data(self.id)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} ({} children)",
            self.kind(),
            self.value(),
            self.child_count()
        )
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.data(), other.data());
        match (a.kind, b.kind) {
            // Roots compare by children alone.
            (NodeKind::Root, NodeKind::Root) => {}
            (NodeKind::Root, _) | (_, NodeKind::Root) => return false,
            (ka, kb) => {
                if ka != kb || !a.value.eq_ignore_ascii_case(&b.value) {
                    return false;
                }
            }
        }
        a.children.len() == b.children.len()
            && self
                .children()
                .zip(other.children())
                .all(|(ca, cb)| ca == cb)
    }
}

impl Eq for NodeRef<'_> {}
