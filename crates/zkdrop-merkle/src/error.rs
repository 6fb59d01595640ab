//! Errors surfaced by tree construction and proof derivation.

use thiserror::Error;
use zkdrop_core::base::FieldElement;

/// Errors that can occur when working with the Merkle tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleTreeError {
    /// A storage string line has the wrong element count or an unparseable value.
    #[error("Malformed tree serialization at line {line}: {reason}")]
    MalformedSerialization {
        /// 1-based line number of the offending line.
        line: usize,
        /// What is wrong with the line.
        reason: String,
    },

    /// No leaf carries the requested value.
    #[error("Leaf {0} not found in tree")]
    LeafNotFound(FieldElement),

    /// Leaf-list construction requires a non-zero power of two.
    #[error("Leaf count {0} is not a non-zero power of two")]
    InvalidLeafCount(usize),

    /// A stored internal node does not match the hash of its children.
    #[error("Stored hash mismatch at level {level}, index {index}")]
    HashMismatch {
        /// Level counted from the root (root is level 0).
        level: usize,
        /// Position of the node within its level.
        index: usize,
    },
}

/// Validate that a leaf count can form a complete binary tree.
///
/// # Errors
/// Returns an error if the count is zero or not a power of two.
pub const fn validate_leaf_count(leaf_count: usize) -> Result<(), MerkleTreeError> {
    if leaf_count.is_power_of_two() {
        Ok(())
    } else {
        Err(MerkleTreeError::InvalidLeafCount(leaf_count))
    }
}
