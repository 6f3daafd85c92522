// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared AST walker for node consumers.
//!
//! Provides the one traversal pattern every consumer of the tree needs: a
//! pre-order visit of each reachable node. Back-ends, validators, and tests
//! use this instead of hand-rolling the recursion; the uniform node shape
//! means a closure over [`NodeRef`] covers every kind.

use crate::ast::{NodeRef, SyntaxTree};

/// Walks every reachable node of the tree in pre-order, calling `f` on each
/// node including the root.
///
/// # Examples
///
/// ```
/// use protolens_core::ast::NodeKind;
/// use protolens_core::ast_walker::walk_tree;
/// use protolens_core::source_analysis::parse;
///
/// let tree = parse("message Outer {\n  int64 ival = 1;\n}\n");
/// let mut fields = 0;
/// walk_tree(&tree, &mut |node| {
///     if node.kind() == NodeKind::Field {
///         fields += 1;
///     }
/// });
/// assert_eq!(fields, 1);
/// ```
pub fn walk_tree<F>(tree: &SyntaxTree, f: &mut F)
where
    F: FnMut(NodeRef<'_>),
{
    walk_node(tree.root(), f);
}

/// Walks the subtree rooted at `node` in pre-order, calling `f` on `node`
/// before its descendants.
pub fn walk_node<F>(node: NodeRef<'_>, f: &mut F)
where
    F: FnMut(NodeRef<'_>),
{
    f(node);
    for child in node.children() {
        walk_node(child, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeKind, SyntaxTree};
    use crate::source_analysis::Position;

    fn sample_tree() -> SyntaxTree {
        let mut tree = SyntaxTree::new();
        let message = tree.add_node(NodeKind::Message, "message", Position::new(1, 1));
        let name = tree.add_node(NodeKind::Identifier, "Outer", Position::new(1, 9));
        let field = tree.add_node(NodeKind::Field, "int64", Position::new(2, 3));
        tree.add_child(message, name);
        tree.add_child(message, field);
        tree.add_child(tree.root_id(), message);
        tree
    }

    #[test]
    fn visits_every_node_preorder() {
        let tree = sample_tree();
        let mut kinds = Vec::new();
        walk_tree(&tree, &mut |node| kinds.push(node.kind()));
        assert_eq!(
            kinds,
            [
                NodeKind::Root,
                NodeKind::Message,
                NodeKind::Identifier,
                NodeKind::Field
            ]
        );
    }

    #[test]
    fn walk_node_starts_at_the_given_subtree() {
        let tree = sample_tree();
        let message = tree.root().child(0).unwrap();
        let mut count = 0;
        walk_node(message, &mut |_| count += 1);
        assert_eq!(count, 3);
    }
}
