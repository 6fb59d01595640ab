//! Note secrets file written by `note new`.

use serde::{Deserialize, Serialize};

use crate::base::{FieldElement, SecretValue};

/// A note's secret pair together with its public derivations.
///
/// The file holds spending material and must only be written with owner-only permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteFile {
    /// The note nullifier.
    pub nullifier: SecretValue,
    /// The note secret.
    pub secret: SecretValue,
    /// Leaf commitment inserted into the airdrop tree.
    pub commitment: FieldElement,
    /// Public nullifier hash revealed when claiming.
    pub nullifier_hash: FieldElement,
}
