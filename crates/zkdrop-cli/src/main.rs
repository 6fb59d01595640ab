//! zkdrop CLI Application

mod cli;

use clap::Parser as _;
use cli::{ClaimCommands, Cli, Commands, ConfigCommands, NoteCommands, TreeCommands};
use zkdrop_sdk::common::ProverConfig;

fn init_tracing() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;

    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let res = match cli.command {
        Commands::Note { command } => match command {
            NoteCommands::New { out, overwrite } => {
                zkdrop_sdk::commands::note_new(out, overwrite).await
            }
        },
        Commands::Tree { command } => match command {
            TreeCommands::Build { args } => {
                zkdrop_sdk::commands::tree_build(args.leaves, args.tree_out, args.config_out)
                    .await
            }
            TreeCommands::Verify { args } => {
                zkdrop_sdk::commands::tree_verify(args.tree, args.config).await
            }
            TreeCommands::Proof { args } => {
                zkdrop_sdk::commands::tree_proof(args.tree, args.leaf, args.out).await
            }
        },
        Commands::Claim { command } => match command {
            ClaimCommands::Prepare { args } => {
                zkdrop_sdk::commands::claim_prepare(
                    args.note,
                    args.tree,
                    args.recipient,
                    args.config,
                    args.inputs_out,
                )
                .await
            }
            ClaimCommands::Prove { args } => {
                let prover = ProverConfig::from(&args);
                zkdrop_sdk::commands::claim_prove(args.inputs, prover, args.out).await
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Schema => zkdrop_sdk::commands::airdrop_configuration_schema(),
        },
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
