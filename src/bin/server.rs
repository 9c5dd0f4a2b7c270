//! varstore Server Binary
//!
//! Starts the TCP server for varstore.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use varstore::network::Server;
use varstore::{Config, Engine};

/// varstore Server
#[derive(Parser, Debug)]
#[command(name = "varstore-server")]
#[command(about = "Transactional variable store with undo/redo")]
#[command(version)]
struct Args {
    /// Data directory for the durable journal (omit for memory-only)
    #[arg(short, long)]
    data_dir: Option<String>,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:4117")]
    listen: String,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "1024")]
    max_connections: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,varstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("varstore server v{}", varstore::VERSION);
    match &args.data_dir {
        Some(dir) => tracing::info!("data directory: {}", dir),
        None => tracing::info!("running memory-only (no journal)"),
    }
    tracing::info!("listen address: {}", args.listen);

    // Build config from args
    let mut builder = Config::builder()
        .listen_addr(&args.listen)
        .max_connections(args.max_connections);
    if let Some(dir) = &args.data_dir {
        builder = builder.data_dir(dir);
    }
    let config = builder.build();

    // Open engine
    let engine = match Engine::open(config.clone()) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            tracing::error!("failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("engine initialized");

    // Start server
    let mut server = Server::new(config, engine);
    if let Err(e) = server.run() {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("server stopped");
}
