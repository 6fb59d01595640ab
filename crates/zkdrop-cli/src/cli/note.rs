//! Note subcommands.

use std::path::PathBuf;

use super::constants::{DEFAULT_NOTE_FILE, ZKDROP_NOTE_OUT, ZKDROP_NOTE_OVERWRITE};

/// Note command group.
#[derive(Debug, clap::Subcommand)]
pub enum NoteCommands {
    /// Generate a random note and print its commitment.
    New {
        /// Output file for the note secrets.
        #[arg(long, env = ZKDROP_NOTE_OUT, default_value = DEFAULT_NOTE_FILE)]
        out: PathBuf,
        /// Replace an existing note file.
        #[arg(long, env = ZKDROP_NOTE_OVERWRITE, default_value_t = false)]
        overwrite: bool,
    },
}
