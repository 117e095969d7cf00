//! catalog - product catalog service
//!
//! Entry point for the catalog binary:
//! - `serve`: run the HTTP API and front-end bundle against Postgres

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "catalog",
    author,
    version,
    about = "Product catalog service - CRUD API over Postgres plus the web front-end"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;
    match dotenv {
        Some(path) => tracing::info!("Loaded configuration from {}", path.display()),
        None => tracing::debug!("No .env file found, using environment only"),
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
    }

    Ok(())
}
