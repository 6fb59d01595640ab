//! Tree subcommands.

use std::path::PathBuf;

use zkdrop_core::base::FieldElement;

use super::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_LEAVES_FILE, DEFAULT_TREE_FILE, ZKDROP_CONFIG_FILE,
    ZKDROP_CONFIG_OUT, ZKDROP_LEAVES_FILE, ZKDROP_PROOF_OUT, ZKDROP_TREE_FILE, ZKDROP_TREE_OUT,
};
use super::parse_field_element;

/// Arguments for `tree build`.
#[derive(Debug, clap::Args)]
pub struct TreeBuildArgs {
    /// Leaves file: one commitment per line, blank lines ignored.
    #[arg(long, env = ZKDROP_LEAVES_FILE, default_value = DEFAULT_LEAVES_FILE)]
    pub leaves: PathBuf,
    /// Tree storage output file.
    #[arg(long, env = ZKDROP_TREE_OUT, default_value = DEFAULT_TREE_FILE)]
    pub tree_out: PathBuf,
    /// Configuration output file.
    #[arg(long, env = ZKDROP_CONFIG_OUT, default_value = DEFAULT_CONFIG_FILE)]
    pub config_out: PathBuf,
}

/// Arguments for `tree verify`.
#[derive(Debug, clap::Args)]
pub struct TreeVerifyArgs {
    /// Tree storage file.
    #[arg(long, env = ZKDROP_TREE_FILE, default_value = DEFAULT_TREE_FILE)]
    pub tree: PathBuf,
    /// Airdrop configuration to check the tree against.
    #[arg(long, env = ZKDROP_CONFIG_FILE)]
    pub config: Option<PathBuf>,
}

/// Arguments for `tree proof`.
#[derive(Debug, clap::Args)]
pub struct TreeProofArgs {
    /// Tree storage file.
    #[arg(long, env = ZKDROP_TREE_FILE, default_value = DEFAULT_TREE_FILE)]
    pub tree: PathBuf,
    /// Leaf value to prove.
    #[arg(long, value_parser = parse_field_element)]
    pub leaf: FieldElement,
    /// Output file for the proof. Printed to stdout when omitted.
    #[arg(long, env = ZKDROP_PROOF_OUT)]
    pub out: Option<PathBuf>,
}

/// Tree command group.
#[derive(Debug, clap::Subcommand)]
pub enum TreeCommands {
    /// Build the commitment tree and its configuration from a leaves file.
    Build {
        #[command(flatten)]
        args: TreeBuildArgs,
    },
    /// Recompute the stored hashes of a tree file.
    Verify {
        #[command(flatten)]
        args: TreeVerifyArgs,
    },
    /// Print the inclusion proof of a leaf.
    Proof {
        #[command(flatten)]
        args: TreeProofArgs,
    },
}
