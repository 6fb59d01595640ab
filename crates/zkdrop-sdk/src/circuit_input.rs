//! Assembly of the circuit input record for a claim.

use thiserror::Error;
use tracing::debug;
use zkdrop_core::base::FieldElement;
use zkdrop_core::schema::circuit_inputs::CircuitInputs;
use zkdrop_merkle::{Committer, MerkleTree, MerkleTreeError, Note, leaf_commitment, nullifier_hash};

/// Errors that can occur while assembling a claim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    /// The note's commitment could not be proven against the tree.
    #[error("Tree: {0}")]
    Tree(#[from] MerkleTreeError),
    /// The tree does not have the expected root.
    #[error("Tree root {actual} does not match the expected root {expected}")]
    RootMismatch {
        /// Root the claim is expected to be anchored to.
        expected: FieldElement,
        /// Root of the loaded tree.
        actual: FieldElement,
    },
}

/// Build the circuit input record proving that `note` is in `tree`, bound to `recipient`.
///
/// # Errors
/// Returns [`ClaimError::Tree`] wrapping [`MerkleTreeError::LeafNotFound`] if the note's
/// commitment is not a leaf of `tree`.
pub fn build_circuit_inputs<C: Committer>(
    tree: &MerkleTree,
    committer: &C,
    note: &Note,
    recipient: FieldElement,
) -> Result<CircuitInputs, ClaimError> {
    let commitment = leaf_commitment(committer, &note.nullifier, &note.secret);
    let proof = tree.merkle_proof(&commitment)?;
    let nullifier_hash = nullifier_hash(committer, &note.nullifier);

    debug!(
        %commitment,
        leaf_index = ?proof.leaf_index(),
        depth = proof.depth(),
        "Assembled circuit inputs"
    );

    Ok(CircuitInputs {
        root: tree.root(),
        nullifier_hash,
        nullifier: note.nullifier.to_field(),
        secret: note.secret.to_field(),
        path_indices: proof.path_bits,
        path_elements: proof.siblings,
        recipient,
    })
}

/// Check that `tree` is anchored at `expected`.
///
/// # Errors
/// Returns [`ClaimError::RootMismatch`] if the roots differ.
pub fn ensure_root(tree: &MerkleTree, expected: FieldElement) -> Result<(), ClaimError> {
    let actual = tree.root();
    if actual == expected {
        Ok(())
    } else {
        Err(ClaimError::RootMismatch { expected, actual })
    }
}
