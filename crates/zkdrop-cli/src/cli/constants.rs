//! Shared constants for CLI.

// -------------------------
// Environment variables
// -------------------------

// Common
pub const ZKDROP_CONFIG_FILE: &str = "ZKDROP_CONFIG_FILE";
pub const ZKDROP_TREE_FILE: &str = "ZKDROP_TREE_FILE";
pub const ZKDROP_NOTE_FILE: &str = "ZKDROP_NOTE_FILE";

// Note
pub const ZKDROP_NOTE_OUT: &str = "ZKDROP_NOTE_OUT";
pub const ZKDROP_NOTE_OVERWRITE: &str = "ZKDROP_NOTE_OVERWRITE";

// Tree
pub const ZKDROP_LEAVES_FILE: &str = "ZKDROP_LEAVES_FILE";
pub const ZKDROP_TREE_OUT: &str = "ZKDROP_TREE_OUT";
pub const ZKDROP_CONFIG_OUT: &str = "ZKDROP_CONFIG_OUT";
pub const ZKDROP_PROOF_OUT: &str = "ZKDROP_PROOF_OUT";

// Claim
pub const ZKDROP_RECIPIENT: &str = "ZKDROP_RECIPIENT";
pub const ZKDROP_INPUTS_OUT: &str = "ZKDROP_INPUTS_OUT";
pub const ZKDROP_INPUTS_IN: &str = "ZKDROP_INPUTS_IN";
pub const ZKDROP_CIRCUIT_WASM: &str = "ZKDROP_CIRCUIT_WASM";
pub const ZKDROP_PROVING_KEY: &str = "ZKDROP_PROVING_KEY";
pub const ZKDROP_SNARKJS: &str = "ZKDROP_SNARKJS";
pub const ZKDROP_CALL_DATA_OUT: &str = "ZKDROP_CALL_DATA_OUT";
pub const ZKDROP_MAX_RETRIES: &str = "ZKDROP_MAX_RETRIES";
pub const ZKDROP_RETRY_DELAY_MS: &str = "ZKDROP_RETRY_DELAY_MS";

// -------------------------
// Default values
// -------------------------

// File paths
pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_TREE_FILE: &str = "tree.txt";
pub const DEFAULT_LEAVES_FILE: &str = "leaves.txt";
pub const DEFAULT_NOTE_FILE: &str = "note.json";
pub const DEFAULT_INPUTS_FILE: &str = "claim-inputs.json";
pub const DEFAULT_CIRCUIT_WASM: &str = "withdraw.wasm";
pub const DEFAULT_PROVING_KEY: &str = "withdraw.zkey";
pub const DEFAULT_CALL_DATA_FILE: &str = "claim-proof.json";

// Prover
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;
