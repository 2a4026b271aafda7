//! Caja CLI
//!
//! Command-line entry point for the caja point-of-sale server.
//!
//! # Commands
//!
//! - `serve` - Run the HTTP API server
//! - `version` - Show version information

use caja_server::{ApiServer, ServerConfig};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Caja point-of-sale server tools.
#[derive(Parser)]
#[command(name = "caja")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,

        /// Maximum number of records accepted in one sync batch
        #[arg(long, default_value = "500")]
        max_sync_batch: usize,

        /// Default page size for sale listings
        #[arg(long, default_value = "50")]
        page_size: u32,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve {
            bind,
            max_sync_batch,
            page_size,
        } => {
            let config = ServerConfig::new(bind)
                .with_max_sync_batch(max_sync_batch)
                .with_default_page_size(page_size);
            tracing::info!(%bind, "starting caja server");
            ApiServer::new(config).run().await?;
        }
        Commands::Version => {
            println!("Caja CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Caja Core v{}", caja_core::VERSION);
        }
    }

    Ok(())
}
