//! Serialized schema/data contracts.

/// Circuit input record consumed by the external witness calculator.
pub mod circuit_inputs;
/// Airdrop configuration schema types.
pub mod config;
/// Locally stored note secrets.
pub mod note;
/// Proof pipeline output.
pub mod proof;
