//! diskrelay - OAuth-backed web gateway for Yandex Disk public shares.
//!
//! Main entry point for the diskrelay CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use diskrelay_server::{AppState, Server};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// diskrelay - browse and download Yandex Disk public shares through OAuth
#[derive(Parser)]
#[command(name = "diskrelay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server
    Serve(ServeArgs),
}

/// Arguments for the serve command.
///
/// CLI arguments override config file values.
#[derive(Args, Debug)]
struct ServeArgs {
    /// Path to the config file
    #[arg(long, env = "DISKRELAY_CONFIG", default_value = "diskrelay.toml")]
    config: PathBuf,

    /// Address to bind to (overrides config)
    #[arg(short, long)]
    bind: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry point
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve(args) => serve(args).await,
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug,hyper=info"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

async fn serve(args: ServeArgs) -> Result<()> {
    let mut config = diskrelay_config::load_config(&args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    info!(bind = %config.server.bind, "configuration loaded");

    let state = AppState::new(config)?;
    Server::new(state).run().await?;
    Ok(())
}
