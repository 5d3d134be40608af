//! PCBook Server Binary
//!
//! Starts the TCP server for the laptop catalog.

use std::sync::Arc;

use clap::Parser;
use pcbook::network::Server;
use pcbook::{Config, InMemoryLaptopStore, LaptopService};
use tracing_subscriber::{fmt, EnvFilter};

/// PCBook Server
#[derive(Parser, Debug)]
#[command(name = "pcbook-server")]
#[command(about = "In-memory laptop catalog server")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:6565")]
    listen: String,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "1024")]
    max_connections: usize,

    /// Idle read timeout in seconds (0 disables)
    #[arg(long, default_value = "30")]
    read_timeout_secs: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pcbook=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("PCBook Server v{}", pcbook::VERSION);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .listen_addr(&args.listen)
        .max_connections(args.max_connections)
        .read_timeout_ms(args.read_timeout_secs * 1000)
        .build();

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        std::process::exit(2);
    }

    let store = Arc::new(InMemoryLaptopStore::new());
    let service = Arc::new(LaptopService::with_config(store, &config));

    // Start server
    let mut server = Server::new(config, service);
    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
