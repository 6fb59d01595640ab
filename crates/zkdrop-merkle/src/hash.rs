//! Hash primitives used by the tree and the commitment layer.
//!
//! Two distinct primitives exist and must not be interchanged:
//! - [`compress2to1`]: Poseidon sponge compression, used for every internal tree node,
//! - [`commit`]: Sinsemilla hash-to-point, used for leaf commitments and nullifier hashes.

use std::sync::LazyLock;

use ff::Field as _;
use group::Curve as _;
use halo2_gadgets::poseidon::primitives::{self as poseidon, ConstantLength, P128Pow5T3};
use halo2_gadgets::sinsemilla::primitives::HashDomain;
use pasta_curves::arithmetic::CurveAffine as _;
use pasta_curves::pallas;
use zkdrop_core::base::{FieldElement, bytes_to_bits_le};

/// Sinsemilla personalization for note commitments and nullifier hashes.
pub const COMMIT_PERSONALIZATION: &str = "zkdrop:commit";

/// The commitment hash domain.
///
/// Deriving the domain's initial point hashes to the curve, so it is done once per process.
static COMMIT_DOMAIN: LazyLock<HashDomain> =
    LazyLock::new(|| HashDomain::new(COMMIT_PERSONALIZATION));

/// Compression function for internal tree nodes.
pub trait NodeHasher {
    /// Hash a left and right child into their parent.
    fn compress(&self, left: &FieldElement, right: &FieldElement) -> FieldElement;
}

/// Commitment hash over byte strings.
pub trait Committer {
    /// Hash `bytes` into a single field element.
    fn commit(&self, bytes: &[u8]) -> FieldElement;
}

/// Poseidon (`P128Pow5T3`, width 3, rate 2) over two field elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseidonHasher;

impl NodeHasher for PoseidonHasher {
    fn compress(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        let digest = poseidon::Hash::<_, P128Pow5T3, ConstantLength<2>, 3, 2>::init()
            .hash([left.to_base(), right.to_base()]);
        FieldElement::from_base(digest)
    }
}

/// Sinsemilla hash-to-point, reduced to the affine x-coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinsemillaCommitter;

impl Committer for SinsemillaCommitter {
    fn commit(&self, bytes: &[u8]) -> FieldElement {
        let x = COMMIT_DOMAIN
            .hash_to_point(bytes_to_bits_le(bytes))
            .and_then(|point| point.to_affine().coordinates().map(|coords| *coords.x()));

        // The identity point has no affine coordinates. Reaching it requires a discrete-log
        // relation between generators, so it is mapped to zero like orchard's MerkleCRH.
        FieldElement::from_base(x.unwrap_or(pallas::Base::ZERO))
    }
}

/// Force the one-time initialisation of the hash primitives.
///
/// Repeated calls are no-ops.
pub fn init_hash_primitives() {
    LazyLock::force(&COMMIT_DOMAIN);
}

/// Two-to-one compression used for internal tree nodes.
#[must_use]
pub fn compress2to1(left: &FieldElement, right: &FieldElement) -> FieldElement {
    PoseidonHasher.compress(left, right)
}

/// Commitment hash used for leaf commitments and nullifier hashes.
#[must_use]
pub fn commit(bytes: &[u8]) -> FieldElement {
    SinsemillaCommitter.commit(bytes)
}

/// Field addition, for checking tree arithmetic by hand.
///
/// Unit tests cannot use `test_utils::SumHasher`: the dev-dependency links a second copy of
/// this crate, and that stub implements the second copy's [`NodeHasher`].
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SumHasher;

#[cfg(test)]
impl NodeHasher for SumHasher {
    #[allow(clippy::arithmetic_side_effects, reason = "Field addition wraps at the modulus")]
    fn compress(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        FieldElement::from_base(left.to_base() + right.to_base())
    }
}
