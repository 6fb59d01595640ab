//! Zkdrop SDK: claim assembly, the proof pipeline adapter and the CLI workflows.

/// Circuit input assembly for claims.
pub mod circuit_input;
/// Application command implementations.
pub mod commands;
/// CLI-independent configuration types.
pub mod common;
/// Adapter to the external witness and proving toolchain.
pub mod pipeline;
