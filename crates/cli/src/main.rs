//! Asha CLI — the main entry point.
//!
//! Commands:
//! - `serve`  — Start the WebSocket gateway
//! - `ingest` — Load knowledge documents into the store
//! - `doctor` — Diagnose configuration and collaborator health

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "asha",
    about = "Asha — multilingual campus assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: asha.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the WebSocket gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Chunk, embed, and store a knowledge file or directory
    Ingest {
        /// A text/markdown file, or a directory of them
        path: PathBuf,
    },

    /// Diagnose configuration and collaborator health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config_path = cli
        .config
        .unwrap_or_else(asha_config::AppConfig::default_path);

    match cli.command {
        Commands::Serve { port } => commands::serve::run(&config_path, port).await?,
        Commands::Ingest { path } => commands::ingest::run(&config_path, &path).await?,
        Commands::Doctor => commands::doctor::run(&config_path).await?,
    }

    Ok(())
}
