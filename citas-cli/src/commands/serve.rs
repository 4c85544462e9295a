//! HTTP server command for the appointments API

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use citas_server::db::pool::{DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS};
use citas_server::http::{run_server, ServerConfig};
use citas_server::Database;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CITAS_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Database URL (SQLite; the file is created if missing)
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!(database = %args.database_url, "Opening database");

    let db = Database::connect(&args.database_url, args.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", args.database_url))?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(db, config).await.context("Server error")?;

    Ok(())
}
