//! CityPop Server Binary
//!
//! Loads the data file and starts the HTTP server.

use std::sync::Arc;

use citypop::http::Server;
use citypop::{Config, Engine};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// CityPop Server
#[derive(Parser, Debug)]
#[command(name = "citypop-server")]
#[command(about = "HTTP lookup/update service for city populations")]
#[command(version)]
struct Args {
    /// Backing data file (city,state,population per line)
    #[arg(short, long, default_value = "data/city_populations.csv")]
    data_file: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:5555")]
    listen: String,

    /// Maximum request body size in bytes
    #[arg(short, long, default_value = "1024")]
    max_body_bytes: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,citypop=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("CityPop Server v{}", citypop::VERSION);
    tracing::info!("Data file: {}", args.data_file);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .data_file(&args.data_file)
        .listen_addr(&args.listen)
        .max_body_bytes(args.max_body_bytes)
        .build();

    // No service without a loaded index
    let engine = match Engine::open(config.clone()) {
        Ok(e) => Arc::new(e),
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Engine initialized with {} records", engine.len());

    let server = Server::new(config, engine);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
