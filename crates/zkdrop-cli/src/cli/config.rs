//! Config subcommands.

/// Config command group.
#[derive(Debug, clap::Subcommand)]
pub enum ConfigCommands {
    /// Print the JSON schema of the airdrop configuration.
    Schema,
}
