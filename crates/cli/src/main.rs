//! Sephyx CLI - one-time setup tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the remote product store with the initial catalog
//! sephyx-cli seed --store-url https://store.sephyx.io/api
//! ```
//!
//! # Commands
//!
//! - `seed` - Bulk-insert the fixed product catalog into the remote store

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use url::Url;

mod commands;

#[derive(Parser)]
#[command(name = "sephyx-cli")]
#[command(author, version, about = "Sephyx setup tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the remote product store with the initial catalog
    Seed {
        /// Base URL of the remote product store API
        #[arg(long, env = "SEPHYX_STORE_URL")]
        store_url: Url,
    },
}

#[tokio::main]
async fn main() {
    // Pick up SEPHYX_* variables from a local .env, then init tracing
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { store_url } => commands::seed::catalog(store_url).await?,
    }
    Ok(())
}
