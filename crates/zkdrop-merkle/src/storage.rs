//! Line-oriented text form of a [`MerkleTree`].
//!
//! ```text
//! <root>
//! <level 1 node 0>,<level 1 node 1>
//! ...
//! <leaf 0>,<leaf 1>,...
//! ```
//!
//! Every value is `0x`-prefixed lowercase hex, zero-padded to a minimum byte width. Lines are
//! joined by a single `\n` without a trailing newline. Loading trusts the stored hashes; use
//! [`MerkleTree::verify_hashes`] to check them.

#![allow(
    clippy::indexing_slicing,
    reason = "NodeIds are only issued while building the arena"
)]

use tracing::debug;
use zkdrop_core::base::{DEFAULT_HEX_WIDTH, FieldElement};

use crate::error::MerkleTreeError;
use crate::node::{NodeId, TreeNode};
use crate::tree::MerkleTree;

const LINE_SEPARATOR: char = '\n';
const VALUE_SEPARATOR: char = ',';

fn parse_line(line: &str, line_number: usize) -> Result<Vec<FieldElement>, MerkleTreeError> {
    line.split(VALUE_SEPARATOR)
        .map(|value| {
            value
                .parse::<FieldElement>()
                .map_err(|e| MerkleTreeError::MalformedSerialization {
                    line: line_number,
                    reason: e.to_string(),
                })
        })
        .collect()
}

impl MerkleTree {
    /// Load a tree from its storage string without re-hashing.
    ///
    /// Each line after the first must hold exactly two values per node of the previous line:
    /// the left then right child of each parent, in parent order.
    ///
    /// # Errors
    /// Returns [`MerkleTreeError::MalformedSerialization`] naming the first line that is empty,
    /// has the wrong element count, or holds a value that is not a field element.
    pub fn from_storage_string(text: &str) -> Result<Self, MerkleTreeError> {
        let mut lines = text
            .split(LINE_SEPARATOR)
            .enumerate()
            .map(|(index, line)| (index.saturating_add(1), line));

        let Some((_, root_line)) = lines.next() else {
            return Err(MerkleTreeError::MalformedSerialization {
                line: 1,
                reason: "missing root line".to_owned(),
            });
        };
        let root_values = parse_line(root_line, 1)?;
        let [root_value] = root_values.as_slice() else {
            return Err(MerkleTreeError::MalformedSerialization {
                line: 1,
                reason: format!("expected 1 root value, found {}", root_values.len()),
            });
        };

        let mut nodes = vec![TreeNode::leaf(*root_value)];
        let mut levels = vec![vec![NodeId(0)]];
        let mut current = vec![NodeId(0)];

        for (line_number, line) in lines {
            let values = parse_line(line, line_number)?;
            let expected = current.len().saturating_mul(2);
            if values.len() != expected {
                return Err(MerkleTreeError::MalformedSerialization {
                    line: line_number,
                    reason: format!("expected {expected} values, found {}", values.len()),
                });
            }

            let mut next = Vec::with_capacity(expected);
            for (parent, pair) in current.iter().zip(values.chunks_exact(2)) {
                let &[left_value, right_value] = pair else {
                    unreachable!("chunks_exact(2) yields pairs");
                };
                let left = NodeId(nodes.len());
                nodes.push(TreeNode::leaf(left_value));
                let right = NodeId(nodes.len());
                nodes.push(TreeNode::leaf(right_value));

                nodes[left.0].set_parent(*parent);
                nodes[right.0].set_parent(*parent);
                nodes[parent.0].set_children(left, right);
                next.extend([left, right]);
            }
            levels.push(next.clone());
            current = next;
        }

        let tree = Self::from_arena(nodes, levels);
        debug!(
            leaf_count = tree.leaf_count(),
            depth = tree.depth(),
            "Loaded Merkle tree from storage string"
        );
        Ok(tree)
    }

    /// Render the tree in storage form with the default 32-byte value width.
    #[must_use]
    pub fn storage_string(&self) -> String {
        self.storage_string_with_width(DEFAULT_HEX_WIDTH)
    }

    /// Render the tree in storage form, padding each value to at least `width` bytes.
    #[must_use]
    pub fn storage_string_with_width(&self, width: usize) -> String {
        self.levels()
            .map(|level| {
                level
                    .iter()
                    .map(|value| value.to_padded_hex(width))
                    .collect::<Vec<_>>()
                    .join(&VALUE_SEPARATOR.to_string())
            })
            .collect::<Vec<_>>()
            .join(&LINE_SEPARATOR.to_string())
    }
}
