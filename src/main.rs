//! Backend: a demo JSON service.
//!
//! This is the application entry point. It parses the command line, loads
//! configuration, initializes tracing, builds the Axum router, and starts the
//! HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backend::config::{AppConfig, LogFormat, DEBUG_LOG_FILTER, DEFAULT_LOG_FILTER};
use backend::http::start_server;
use backend::{create_router, AppState};

/// Backend: reports health and host identity as JSON
#[derive(Parser, Debug)]
#[command(name = "backend", version, about)]
struct Args {
    /// Path to a TOML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Bind host as an IP literal, overrides http.host
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides http.port
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level filter (e.g., "backend=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Verbose logging when no explicit filter is given
    #[arg(short, long)]
    debug: bool,
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(host) = &args.host {
        config.http.host = host.clone();
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
}

/// Pick the log filter with priority: CLI > env > --debug > default.
fn resolve_log_filter(cli: Option<String>, env: Option<String>, debug: bool) -> String {
    cli.or(env).unwrap_or_else(|| {
        if debug {
            DEBUG_LOG_FILTER.to_string()
        } else {
            DEFAULT_LOG_FILTER.to_string()
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration before tracing so the log format can be honoured
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    apply_overrides(&mut config, &args);
    config.validate()?;

    let log_filter = resolve_log_filter(
        args.log_level.clone(),
        std::env::var("RUST_LOG").ok(),
        args.debug,
    );

    let (text_layer, json_layer) = match config.logging.log_format() {
        LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(text_layer)
        .with(json_layer)
        .init();

    tracing::info!(
        config = args.config.as_deref().unwrap_or("<defaults>"),
        host = %config.http.host,
        port = config.http.port,
        strict_identity = config.identity.strict,
        "Loaded configuration"
    );

    let state = AppState::new(config.clone());
    let app = create_router(state);

    start_server(app, &config).await?;

    Ok(())
}
