//! Leaf commitments and nullifier hashes.
//!
//! Both are computed with the commitment hash over 31-byte little-endian encodings:
//! - `commitment = commit(LE31(nullifier) || LE31(secret))`
//! - `nullifier_hash = commit(LE31(nullifier))`

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize as _;
use zkdrop_core::base::{FieldElement, SECRET_VALUE_SIZE, SecretValue};

use crate::hash::{Committer, SinsemillaCommitter};

/// Compute the tree leaf for a `(nullifier, secret)` pair.
#[must_use]
pub fn leaf_commitment<C: Committer>(
    committer: &C,
    nullifier: &SecretValue,
    secret: &SecretValue,
) -> FieldElement {
    let mut preimage = [0_u8; SECRET_VALUE_SIZE * 2];
    let (head, tail) = preimage.split_at_mut(SECRET_VALUE_SIZE);
    head.copy_from_slice(nullifier.as_le_bytes());
    tail.copy_from_slice(secret.as_le_bytes());

    let commitment = committer.commit(&preimage);
    preimage.zeroize();
    commitment
}

/// Compute the public hash of a nullifier.
#[must_use]
pub fn nullifier_hash<C: Committer>(committer: &C, nullifier: &SecretValue) -> FieldElement {
    committer.commit(nullifier.as_le_bytes())
}

/// A claimable note: the secret pair behind one tree leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Revealed (hashed) when claiming to prevent double claims.
    pub nullifier: SecretValue,
    /// Never revealed.
    pub secret: SecretValue,
}

impl Note {
    /// Create a note from its parts.
    #[must_use]
    pub const fn new(nullifier: SecretValue, secret: SecretValue) -> Self {
        Self { nullifier, secret }
    }

    /// Draw a fresh random note.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self {
            nullifier: SecretValue::random(rng),
            secret: SecretValue::random(rng),
        }
    }

    /// The leaf commitment of this note.
    #[must_use]
    pub fn commitment(&self) -> FieldElement {
        leaf_commitment(&SinsemillaCommitter, &self.nullifier, &self.secret)
    }

    /// The public nullifier hash of this note.
    #[must_use]
    pub fn nullifier_hash(&self) -> FieldElement {
        nullifier_hash(&SinsemillaCommitter, &self.nullifier)
    }
}
