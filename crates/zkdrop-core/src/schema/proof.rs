//! Output of the proof pipeline.

use serde::{Deserialize, Serialize};

use crate::base::FieldElement;

/// Proof call data together with the public values it was generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOutput {
    /// Tree root the proof is anchored to.
    pub root: FieldElement,
    /// Public nullifier hash.
    pub nullifier_hash: FieldElement,
    /// Recipient bound into the proof.
    pub recipient: FieldElement,
    /// Opaque proof call data for the on-chain verifier.
    pub call_data: String,
}
