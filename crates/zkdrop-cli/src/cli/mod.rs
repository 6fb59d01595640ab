//! Command-line interface for the `zkdrop` CLI application.

mod claim;
mod config;
pub mod constants;
mod note;
mod tree;

use clap::Parser;
use eyre::{Result, eyre};
use zkdrop_core::base::FieldElement;

pub use self::claim::ClaimCommands;
pub use self::config::ConfigCommands;
pub use self::note::NoteCommands;
pub use self::tree::TreeCommands;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "zkdrop")]
#[command(about = "Private airdrop commitment tree tools")]
pub struct Cli {
    /// CLI top-level command group.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Note generation.
    Note {
        /// Note subcommands.
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Commitment tree utilities (organizer focused).
    Tree {
        /// Tree subcommands.
        #[command(subcommand)]
        command: TreeCommands,
    },
    /// Claim pipeline commands.
    Claim {
        /// Claim subcommands.
        #[command(subcommand)]
        command: ClaimCommands,
    },
    /// Airdrop configuration utilities.
    Config {
        /// Config subcommands.
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Parse a field element given as `0x` hex (such as an address) or as a decimal integer.
pub fn parse_field_element(s: &str) -> Result<FieldElement> {
    s.parse::<FieldElement>()
        .map_err(|e| eyre!("Invalid field element {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[test]
    fn field_element_parse() {
        assert_eq!(
            parse_field_element("0x00000000219ab540356cbb839cbe05303d7705fa")
                .expect("address should parse"),
            "0x219ab540356cbb839cbe05303d7705fa"
                .parse()
                .expect("same value")
        );
        assert_eq!(
            parse_field_element("42").expect("decimal should parse"),
            FieldElement::from(42)
        );
        assert!(parse_field_element("0xnope").is_err());
    }

    #[test]
    fn parse_claim_prepare_requires_recipient() {
        let cli = Cli::try_parse_from(["zkdrop", "claim", "prepare"]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from(["zkdrop", "claim", "prepare", "--recipient", "0x01"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn parse_tree_proof_requires_leaf() {
        assert!(Cli::try_parse_from(["zkdrop", "tree", "proof"]).is_err());
        assert!(Cli::try_parse_from(["zkdrop", "tree", "proof", "--leaf", "7"]).is_ok());
    }
}
