//! F1 API proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                    F1 PROXY                      │
//!                    │                                                  │
//!   Client Request   │  ┌─────────┐    ┌──────────┐    ┌────────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│ routing  │───▶│   proxy    │  │
//!                    │  │ server  │    │  table   │    │  dispatch  │  │
//!                    │  └─────────┘    └──────────┘    └─────┬──────┘  │
//!                    │                                       │         │
//!   Client Response  │  ┌──────────┐                  ┌─────▼──────┐  │
//!   ◀────────────────┼──│ response │◀─────────────────│  upstream  │◀─┼──── Upstream
//!                    │  │ envelope │                  │   client   │  │     API
//!                    │  └──────────┘                  └────────────┘  │
//!                    │                                                  │
//!                    │  config · lifecycle · observability · resilience │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use f1_proxy::config::load_config;
use f1_proxy::http::HttpServer;
use f1_proxy::lifecycle::{signals, Shutdown};
use f1_proxy::observability::{logging, metrics};

#[derive(Debug, Parser)]
#[command(name = "f1-proxy", version, about = "Pass-through proxy for the F1 data API")]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    drop(dotenvy::dotenv());
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    logging::init(&config.observability);

    tracing::info!("f1-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Routes are compiled before anything is bound.
    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
