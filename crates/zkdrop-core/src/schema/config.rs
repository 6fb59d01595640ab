use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::base::FieldElement;

/// Public description of a built airdrop commitment tree.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct AirdropConfiguration {
    /// Root of the commitment tree.
    #[schemars(with = "String")]
    pub merkle_root: FieldElement,
    /// Number of leaves (a power of two).
    pub leaf_count: u64,
    /// Number of levels above the leaves.
    pub depth: u32,
}
