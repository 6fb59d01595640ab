//! Merkle tree node type.
//!
//! Nodes live in an arena owned by [`crate::MerkleTree`]. Child links express ownership
//! top-down; the parent link is a non-owning back-reference that is only followed when
//! walking from a leaf to the root.

use std::fmt;

use zkdrop_core::base::FieldElement;

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the binary tree.
///
/// Either both children are present or neither is; a node is a leaf iff it has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TreeNode {
    value: FieldElement,
    children: Option<(NodeId, NodeId)>,
    parent: Option<NodeId>,
}

impl TreeNode {
    pub(crate) const fn leaf(value: FieldElement) -> Self {
        Self {
            value,
            children: None,
            parent: None,
        }
    }

    pub(crate) const fn with_children(value: FieldElement, left: NodeId, right: NodeId) -> Self {
        Self {
            value,
            children: Some((left, right)),
            parent: None,
        }
    }

    pub(crate) const fn set_parent(&mut self, parent: NodeId) {
        self.parent = Some(parent);
    }

    pub(crate) const fn set_children(&mut self, left: NodeId, right: NodeId) {
        self.children = Some((left, right));
    }

    /// The node's hash, or the raw leaf value for leaves.
    pub(crate) const fn value(&self) -> FieldElement {
        self.value
    }

    /// The `(left, right)` children, absent for leaves.
    pub(crate) const fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    /// The parent, absent for the root.
    pub(crate) const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}
