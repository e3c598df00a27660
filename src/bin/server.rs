//! MySQL API Server Binary
//!
//! ## Usage
//!
//! ```bash
//! # Start with config.toml / environment settings
//! cargo run --bin mysql-api-server
//!
//! # Override the bind address
//! cargo run --bin mysql-api-server -- --host 0.0.0.0 --port 9000
//! ```
//!
//! Connection settings come from `MYSQL_HOST`, `MYSQL_USER`,
//! `MYSQL_ROOT_PASSWORD`; the API key from `API_KEY`.

use std::env;
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use clap::Parser;
use mysql_api::config::LoggingConfig;
use mysql_api::protocol::rest;
use mysql_api::protocol::Handler;
use mysql_api::Config;

static TRACE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

#[derive(Debug, Parser)]
#[command(name = "mysql-api-server", version, about = "HTTP API for MySQL administration")]
struct Args {
    /// Configuration file (default: config.toml + config.local.toml)
    #[arg(long)]
    config: Option<String>,

    /// Bind address, overrides [http].host
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides [http].port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }

    init_tracing(&config.logging);
    tracing::info!(
        db_host = %config.database.host,
        db_port = config.database.port,
        db_user = %config.database.user,
        "configuration_loaded"
    );

    let handler = Arc::new(Handler::from_config(&config));

    rest::start_http_server(handler, &config)
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("http server failed")?;

    Ok(())
}

/// Append-only file log; `RUST_LOG` overrides the configured level.
fn init_tracing(logging_config: &LoggingConfig) {
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logging_config.file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("ERROR: Unable to open log file '{}': {e}", logging_config.file);
            return;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let _ = TRACE_GUARD.set(guard);

    let level = env::var("RUST_LOG").unwrap_or_else(|_| logging_config.level.clone());
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if logging_config.format == "json"
    {
        Box::new(builder.json().finish())
    } else {
        Box::new(builder.compact().finish())
    };

    let _ = tracing::subscriber::set_global_default(subscriber);
}
