//! Application command implementations.
//!
//! This module contains the core logic for each CLI subcommand.

mod claim;
mod files;
mod note;
mod sensitive_output;
mod tree;

pub use claim::{claim_prepare, claim_prove};
pub use note::note_new;
pub use tree::{tree_build, tree_proof, tree_verify};

/// Generates and prints the JSON schema for the `AirdropConfiguration` struct.
///
/// # Errors
/// Returns an error if serialization to JSON fails.
#[allow(clippy::print_stdout, reason = "Prints schema to stdout")]
pub fn airdrop_configuration_schema() -> eyre::Result<()> {
    let schema = schemars::schema_for!(zkdrop_core::schema::config::AirdropConfiguration);
    let schema_str = serde_json::to_string_pretty(&schema)?;
    println!("{schema_str}");
    Ok(())
}
