//! Captions API relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌────────────────────────────────────────────┐
//!                       │                 RELAY                      │
//!   POST /twin/list     │  ┌─────────┐   ┌─────────┐   ┌───────────┐ │   POST {base}/twin/list
//!  ─────────────────────┼─▶│  http   │──▶│ routing │──▶│ upstream  │─┼──────────────────────────▶
//!                       │  │ server  │   │  table  │   │ forwarder │ │   x-api-key: <secret>
//!                       │  └─────────┘   └─────────┘   └─────┬─────┘ │
//!   status/headers/body │  ┌──────────────────┐              │       │
//!  ◀────────────────────┼──│ response filter  │◀─────────────┘       │◀─────────────────────────
//!                       │  └──────────────────┘                      │
//!                       │   config · observability · lifecycle       │
//!                       └────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use captions_relay::config::{load_config, load_env_file, LogFormat, Overrides};
use captions_relay::lifecycle::signals::install_signal_handler;
use captions_relay::observability::init_logging;
use captions_relay::routing::ROUTES;
use captions_relay::HttpServer;

/// Relay that forwards JSON POSTs to the Captions API with an injected API key.
#[derive(Debug, Parser)]
#[command(name = "captions-relay", version, about, long_about = None)]
struct Args {
    /// Optional TOML config file.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on [default: 0.0.0.0:5000].
    #[arg(long, env = "RELAY_BIND")]
    bind: Option<String>,

    /// Upstream API root [default: https://api.captions.ai/api].
    #[arg(long, env = "CAPTIONS_BASE_URL")]
    upstream_base_url: Option<String>,

    /// Credential sent as `x-api-key`.
    #[arg(long, env = "CAPTIONS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Log output format.
    #[arg(long, env = "RELAY_LOG_FORMAT", value_enum)]
    log_format: Option<LogFormat>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            bind_address: self.bind.clone(),
            base_url: self.upstream_base_url.clone(),
            api_key: self.api_key.clone(),
            log_format: self.log_format,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Must run before parsing so `env =` fallbacks see .env values.
    let env_file = load_env_file(None)?;

    let args = Args::parse();
    let config = load_config(args.config.as_deref(), args.overrides())?;

    init_logging(&config.observability)?;

    tracing::info!("captions-relay v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &env_file {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.normalized_base_url(),
        timeout_secs = ?config.upstream.timeout_secs,
        routes = ROUTES.len(),
        "Configuration loaded"
    );

    if config.upstream.api_key.is_empty() {
        tracing::warn!("CAPTIONS_API_KEY is not set; upstream will likely reject requests");
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = install_signal_handler();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.signalled()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
