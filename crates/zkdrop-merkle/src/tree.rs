//! Arena-backed binary Merkle tree.

#![allow(
    clippy::indexing_slicing,
    reason = "NodeIds are only issued by the tree that owns the arena"
)]

use tracing::debug;
use zkdrop_core::base::FieldElement;

use crate::error::{MerkleTreeError, validate_leaf_count};
use crate::hash::NodeHasher;
use crate::node::{NodeId, TreeNode};
use crate::proof::MerkleProof;

/// A complete binary Merkle tree over a power-of-two number of leaves.
///
/// The tree owns every node in a single arena. It is immutable once built, so shared
/// references can be handed to any number of readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    nodes: Vec<TreeNode>,
    /// Node ids per level, root level first.
    levels: Vec<Vec<NodeId>>,
}

impl MerkleTree {
    /// Build a tree from its leaves, hashing every internal node with `hasher`.
    ///
    /// # Errors
    /// Returns [`MerkleTreeError::InvalidLeafCount`] if there are no leaves or their number is
    /// not a power of two. No hashing happens in that case.
    pub fn from_leaves<H: NodeHasher>(
        leaves: &[FieldElement],
        hasher: &H,
    ) -> Result<Self, MerkleTreeError> {
        validate_leaf_count(leaves.len())?;

        let mut nodes: Vec<TreeNode> = Vec::with_capacity(leaves.len().saturating_mul(2));
        let mut current: Vec<NodeId> = leaves
            .iter()
            .map(|leaf| {
                let id = NodeId(nodes.len());
                nodes.push(TreeNode::leaf(*leaf));
                id
            })
            .collect();
        let mut levels = vec![current.clone()];

        while current.len() > 1 {
            let mut next = Vec::with_capacity(current.len() / 2);
            for pair in current.chunks_exact(2) {
                let &[left, right] = pair else {
                    unreachable!("chunks_exact(2) yields pairs");
                };
                let value = hasher.compress(&nodes[left.0].value(), &nodes[right.0].value());
                let parent = NodeId(nodes.len());
                nodes.push(TreeNode::with_children(value, left, right));
                nodes[left.0].set_parent(parent);
                nodes[right.0].set_parent(parent);
                next.push(parent);
            }
            levels.push(next.clone());
            current = next;
        }
        levels.reverse();

        let tree = Self { nodes, levels };
        debug!(
            leaf_count = tree.leaf_count(),
            depth = tree.depth(),
            "Built Merkle tree from leaves"
        );
        Ok(tree)
    }

    /// Assemble a tree from an arena and its levels, root level first.
    ///
    /// Callers guarantee a non-empty first level holding exactly one node and fully linked
    /// parent and child references.
    pub(crate) const fn from_arena(nodes: Vec<TreeNode>, levels: Vec<Vec<NodeId>>) -> Self {
        Self { nodes, levels }
    }

    fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    fn root_id(&self) -> NodeId {
        self.levels[0][0]
    }

    /// The root value.
    #[must_use]
    pub fn root(&self) -> FieldElement {
        self.node(self.root_id()).value()
    }

    fn leaf_ids(&self) -> &[NodeId] {
        self.levels.last().map_or(&[], Vec::as_slice)
    }

    /// Leaf values in insertion order.
    pub fn leaves(&self) -> impl ExactSizeIterator<Item = FieldElement> + '_ {
        self.leaf_ids().iter().map(|id| self.node(*id).value())
    }

    /// Number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaf_ids().len()
    }

    /// Number of edges between the root and any leaf.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Node values per level, root level first.
    pub fn levels(&self) -> impl Iterator<Item = Vec<FieldElement>> + '_ {
        self.levels
            .iter()
            .map(|level| level.iter().map(|id| self.node(*id).value()).collect())
    }

    /// Whether any leaf carries `value`.
    #[must_use]
    pub fn leaf_exists(&self, value: &FieldElement) -> bool {
        self.find_leaf(value).is_some()
    }

    fn find_leaf(&self, value: &FieldElement) -> Option<NodeId> {
        self.leaf_ids()
            .iter()
            .copied()
            .find(|id| self.node(*id).value() == *value)
    }

    /// Derive the inclusion proof of the first leaf carrying `leaf`.
    ///
    /// # Errors
    /// Returns [`MerkleTreeError::LeafNotFound`] if no leaf carries `leaf`.
    ///
    /// # Panics
    /// Panics if the parent and child links of the tree disagree. Trees built by this crate
    /// never trigger this.
    pub fn merkle_proof(&self, leaf: &FieldElement) -> Result<MerkleProof, MerkleTreeError> {
        let start = self
            .find_leaf(leaf)
            .ok_or(MerkleTreeError::LeafNotFound(*leaf))?;

        let mut siblings = Vec::with_capacity(self.depth());
        let mut path_bits = Vec::with_capacity(self.depth());
        let mut current = start;

        while let Some(parent) = self.node(current).parent() {
            let Some((left, right)) = self.node(parent).children() else {
                panic!("Internal inconsistency: parent {parent} of node {current} has no children");
            };
            let (sibling, bit) = if left == current {
                (right, 0)
            } else if right == current {
                (left, 1)
            } else {
                panic!("Internal inconsistency: node {current} is not a child of its parent {parent}");
            };

            siblings.push(self.node(sibling).value());
            path_bits.push(bit);
            current = parent;
        }

        assert_eq!(
            current,
            self.root_id(),
            "Internal inconsistency: proof walk ended away from the root"
        );
        Ok(MerkleProof {
            siblings,
            path_bits,
        })
    }

    /// Recompute every internal node with `hasher` and compare it against the stored value.
    ///
    /// Trees loaded from storage are trusted as-is; this is the explicit opt-in check.
    ///
    /// # Errors
    /// Returns [`MerkleTreeError::HashMismatch`] for the first mismatching node, scanning
    /// from the level just above the leaves up to the root.
    pub fn verify_hashes<H: NodeHasher>(&self, hasher: &H) -> Result<(), MerkleTreeError> {
        for (level, ids) in self.levels.iter().enumerate().rev() {
            for (index, id) in ids.iter().enumerate() {
                let node = self.node(*id);
                let Some((left, right)) = node.children() else {
                    continue;
                };
                let expected = hasher.compress(&self.node(left).value(), &self.node(right).value());
                if expected != node.value() {
                    return Err(MerkleTreeError::HashMismatch { level, index });
                }
            }
        }
        Ok(())
    }
}
