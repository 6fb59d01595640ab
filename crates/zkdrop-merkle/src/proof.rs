//! Merkle inclusion proofs.

use serde::{Deserialize, Serialize};
use zkdrop_core::base::FieldElement;

use crate::hash::NodeHasher;

/// Inclusion proof for a single leaf.
///
/// `siblings` and `path_bits` are ordered from the leaf level to the root level. A bit of
/// `0` means the proven node is the left child at that level, `1` that it is the right one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerkleProof {
    /// Sibling values, leaf level first.
    pub siblings: Vec<FieldElement>,
    /// Direction bits, leaf level first.
    pub path_bits: Vec<u8>,
}

impl MerkleProof {
    /// Number of levels covered by the proof.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Position of the proven leaf among the leaves.
    ///
    /// The bits are read as a binary number with the leaf-level bit as the least significant.
    /// Returns `None` if the index does not fit in `u64`.
    #[must_use]
    pub fn leaf_index(&self) -> Option<u64> {
        self.path_bits
            .iter()
            .enumerate()
            .try_fold(0_u64, |index, (level, bit)| {
                if *bit == 0 {
                    return Some(index);
                }
                let shift = u32::try_from(level).ok()?;
                index.checked_add(1_u64.checked_shl(shift)?)
            })
    }

    /// Replay the path from `leaf` and return the resulting root.
    pub fn compute_root<H: NodeHasher>(&self, leaf: &FieldElement, hasher: &H) -> FieldElement {
        self.siblings
            .iter()
            .zip(&self.path_bits)
            .fold(*leaf, |current, (sibling, bit)| {
                if *bit == 0 {
                    hasher.compress(&current, sibling)
                } else {
                    hasher.compress(sibling, &current)
                }
            })
    }

    /// Check that `leaf` is included under `root`.
    ///
    /// Proofs with mismatched lengths or a direction bit other than `0` or `1` never verify.
    pub fn verify<H: NodeHasher>(&self, leaf: &FieldElement, root: &FieldElement, hasher: &H) -> bool {
        self.siblings.len() == self.path_bits.len()
            && self.path_bits.iter().all(|bit| *bit <= 1)
            && self.compute_root(leaf, hasher) == *root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::SumHasher;

    fn proof(siblings: &[u64], path_bits: &[u8]) -> MerkleProof {
        MerkleProof {
            siblings: siblings.iter().copied().map(FieldElement::from).collect(),
            path_bits: path_bits.to_vec(),
        }
    }

    #[test]
    fn leaf_index_reads_bits_lsb_first() {
        assert_eq!(proof(&[4, 3], &[0, 1]).leaf_index(), Some(2));
        assert_eq!(proof(&[1, 2, 3], &[1, 1, 0]).leaf_index(), Some(3));
        assert_eq!(proof(&[], &[]).leaf_index(), Some(0));
    }

    #[test]
    fn compute_root_replays_directions() {
        let p = proof(&[4, 3], &[0, 1]);
        assert_eq!(
            p.compute_root(&FieldElement::from(3), &SumHasher),
            FieldElement::from(10)
        );
        assert!(p.verify(&FieldElement::from(3), &FieldElement::from(10), &SumHasher));
        assert!(!p.verify(&FieldElement::from(4), &FieldElement::from(10), &SumHasher));
    }

    #[test]
    fn mismatched_lengths_never_verify() {
        let p = proof(&[4, 3], &[0]);
        assert!(!p.verify(&FieldElement::from(3), &FieldElement::from(7), &SumHasher));
    }

    #[test]
    fn non_binary_direction_bits_never_verify() {
        let valid = proof(&[4, 3], &[0, 1]);
        let widened = proof(&[4, 3], &[0, 2]);
        assert!(valid.verify(&FieldElement::from(3), &FieldElement::from(10), &SumHasher));
        assert_eq!(
            widened.compute_root(&FieldElement::from(3), &SumHasher),
            FieldElement::from(10)
        );
        assert!(!widened.verify(&FieldElement::from(3), &FieldElement::from(10), &SumHasher));

        let decoded: MerkleProof =
            serde_json::from_str(r#"{"siblings":["0x04","0x03"],"pathBits":[0,2]}"#)
                .expect("deserialize proof");
        assert!(!decoded.verify(&FieldElement::from(3), &FieldElement::from(10), &SumHasher));
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_value(proof(&[1], &[1])).expect("serialize proof");
        assert!(json.get("pathBits").is_some());
        assert!(json.get("siblings").is_some());
    }
}
