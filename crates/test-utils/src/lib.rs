//! Shared test utilities for the workspace.

use zkdrop_core::base::FieldElement;
use zkdrop_merkle::{MerkleTree, NodeHasher};

/// Helper macro to create a [`FieldElement`] from a small integer.
#[macro_export]
macro_rules! fe {
    ($v:expr) => {
        ::zkdrop_core::base::FieldElement::from(u64::from($v))
    };
}

/// Helper macro to create a vector of field elements from small integers.
#[macro_export]
macro_rules! fes {
    ($($v:expr),* $(,)?) => {
        vec![$( $crate::fe!($v) ),*]
    };
}

/// Stub node hasher computing `left + right` in the field.
///
/// Makes tree arithmetic checkable by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumHasher;

impl NodeHasher for SumHasher {
    #[allow(clippy::arithmetic_side_effects, reason = "Field addition wraps at the modulus")]
    fn compress(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        FieldElement::from_base(left.to_base() + right.to_base())
    }
}

/// Build a tree over small integer leaves with [`SumHasher`].
///
/// # Panics
/// Panics if the leaf count is not a non-zero power of two.
#[must_use]
#[allow(clippy::expect_used, reason = "Test helper")]
pub fn sum_tree(leaves: &[u64]) -> MerkleTree {
    let leaves: Vec<FieldElement> = leaves.iter().copied().map(FieldElement::from).collect();
    MerkleTree::from_leaves(&leaves, &SumHasher).expect("leaf count must be a power of two")
}
