//! HTTP server command for the product catalog

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use catalog_server::db::{create_pool_with_options, ensure_schema, DEFAULT_MAX_CONNECTIONS};
use catalog_server::http::{run_server, ServerConfig};
use catalog_server::ProductRepo;

use crate::config::resolve_database_url;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CATALOG_BIND", default_value = "0.0.0.0:5678")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (falls back to APP_DB_* variables)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Built front-end bundle (index.html + static/)
    #[arg(long, env = "CATALOG_DIST_DIR", default_value = "client/dist")]
    pub dist_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Create the products table if it does not exist
    #[arg(long)]
    pub init_schema: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url)?;

    tracing::info!("Starting catalog server on {}", args.bind);

    // Create database pool
    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    if args.init_schema {
        ensure_schema(&pool)
            .await
            .context("Failed to create products table")?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.timeout),
        dist_dir: args.dist_dir,
    };

    // Run server (blocks until shutdown)
    run_server(Arc::new(ProductRepo::new(pool)), config)
        .await
        .context("Server error")?;

    Ok(())
}
