//! HTTP Echo Service
//!
//! A diagnostic endpoint built with Tokio and Axum: every GET or POST to
//! `/` is answered with a JSON reflection of the request (headers, query
//! arguments, form fields, JSON body, authenticated user).
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────┐
//!                       │               ECHO SERVICE                │
//!                       │                                           │
//!     Client Request    │  ┌─────────┐    ┌─────────┐    ┌───────┐ │
//!     ──────────────────┼─▶│  http   │───▶│ request │───▶│ echo  │ │
//!                       │  │ server  │    │   id    │    │handler│ │
//!                       │  └─────────┘    └─────────┘    └───┬───┘ │
//!     Client Response   │                                    │     │
//!     ◀─────────────────┼────────────────────────────────────┘     │
//!                       │                                           │
//!                       │  ┌────────────────────────────────────┐  │
//!                       │  │        Cross-Cutting Concerns       │  │
//!                       │  │  ┌────────┐ ┌─────────┐ ┌────────┐ │  │
//!                       │  │  │ config │ │observa- │ │lifecycle│ │  │
//!                       │  │  │        │ │ bility  │ │         │ │  │
//!                       │  │  └────────┘ └─────────┘ └────────┘ │  │
//!                       │  └────────────────────────────────────┘  │
//!                       └──────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use http_echo::config::loader::load_config;
use http_echo::config::EchoConfig;
use http_echo::http::HttpServer;
use http_echo::lifecycle::{signals, Shutdown};
use http_echo::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "http-echo")]
#[command(about = "HTTP request echo service for debugging clients and proxies", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured listener port
    #[arg(short, long)]
    port: Option<u16>,

    /// Development mode: verbose diagnostics, pretty log output
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EchoConfig::default(),
    };
    if let Some(port) = cli.port {
        let mut addr: SocketAddr = config.listener.bind_address.parse()?;
        addr.set_port(port);
        config.listener.bind_address = addr.to_string();
    }
    if cli.debug {
        config.observability.debug = true;
    }

    logging::init_logging(&config.observability);

    tracing::info!("http-echo v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.limits.max_body_bytes,
        request_timeout_secs = config.timeouts.request_secs,
        debug = config.observability.debug,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
