//! Standalone API server binary
//!
//! ## Usage
//!
//! ```bash
//! # Defaults: mongodb://localhost:27017, database mon_go, port 8080
//! cargo run -p api
//!
//! # Override through flags or environment
//! MONGO_URI=mongodb://db:27017 cargo run -p api -- --port 9000
//! ```
//!
//! ## Environment Variables
//!
//! - `MONGO_URI`, `MONGO_DB`, `SERVER_PORT`: store location and listen port
//! - `CONNECT_TIMEOUT_SECS`, `REQUEST_TIMEOUT_SECS`: timeouts in seconds
//! - `API_CONFIG`: explicit path to a TOML config file
//! - `RUST_LOG`, `LOG_DESTINATION`, `LOG_DIR`, `LOG_FILE_PREFIX`: logging

use anyhow::Result;
use api::{ApiServiceRunner, ConfigOverrides, FileConfig, ServiceConfig};
use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[clap(name = "api-server")]
#[clap(about = "HTTP service for items and object-member links")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Path to a TOML config file (default: search ./configs, ../configs, ../../configs)
    #[clap(long, env = "API_CONFIG")]
    config: Option<PathBuf>,

    /// MongoDB connection URI
    #[clap(long, env = "MONGO_URI")]
    mongo_uri: Option<String>,

    /// MongoDB database name
    #[clap(long, env = "MONGO_DB")]
    mongo_db: Option<String>,

    /// HTTP listen port
    #[clap(long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Bound on connecting to MongoDB at startup, in seconds
    #[clap(long, env = "CONNECT_TIMEOUT_SECS")]
    connect_timeout_secs: Option<u64>,

    /// Per-request timeout, in seconds
    #[clap(long, env = "REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenv().ok();

    let args = Args::parse();

    monitoring::init_logging()?;
    info!("Starting API server v{}", env!("CARGO_PKG_VERSION"));

    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::discover()?.0,
    };

    let overrides = ConfigOverrides {
        mongo_uri: args.mongo_uri,
        mongo_db: args.mongo_db,
        server_port: args.port,
        connect_timeout_secs: args.connect_timeout_secs,
        request_timeout_secs: args.request_timeout_secs,
    };
    let config = ServiceConfig::resolve(file_config, overrides)?;

    info!("Database: {}", config.mongo_db);
    info!("Listen address: {}", config.listen_addr);

    let runner = ApiServiceRunner::new(config).await;
    runner.run().await?;

    info!("API server stopped");
    Ok(())
}
