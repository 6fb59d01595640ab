//! The circuit input record.
//!
//! Field names and field order are a wire contract with the withdrawal circuit's witness
//! calculator: serde serializes fields in declaration order, so this struct must not be
//! reordered.

use serde::{Deserialize, Serialize};

use crate::base::FieldElement;

/// Inputs for one airdrop withdrawal proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitInputs {
    /// Root of the commitment tree.
    pub root: FieldElement,
    /// Public hash of the note nullifier.
    pub nullifier_hash: FieldElement,
    /// The note nullifier (private).
    pub nullifier: FieldElement,
    /// The note secret (private).
    pub secret: FieldElement,
    /// Direction bits from leaf to root; `1` means the path node is a right child.
    pub path_indices: Vec<u8>,
    /// Sibling values from leaf to root.
    pub path_elements: Vec<FieldElement>,
    /// Recipient bound into the proof.
    pub recipient: FieldElement,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing, reason = "Tests")]

    use super::*;

    #[test]
    fn serializes_fields_in_contract_order() {
        let inputs = CircuitInputs {
            root: FieldElement::from(1),
            nullifier_hash: FieldElement::from(2),
            nullifier: FieldElement::from(3),
            secret: FieldElement::from(4),
            path_indices: vec![0, 1],
            path_elements: vec![FieldElement::from(5), FieldElement::from(6)],
            recipient: FieldElement::from(7),
        };

        let json = serde_json::to_string(&inputs).expect("serialize circuit inputs");
        let keys = [
            "\"root\"",
            "\"nullifierHash\"",
            "\"nullifier\"",
            "\"secret\"",
            "\"pathIndices\"",
            "\"pathElements\"",
            "\"recipient\"",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|key| json.find(key).expect("key present"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(json.contains("\"pathIndices\":[0,1]"));

        let decoded: CircuitInputs = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, inputs);
    }
}
