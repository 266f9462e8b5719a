//! mnu-web - Mkhonto National Union website service
//!
//! Serves the landing page, accepts membership applications and contact
//! messages, and forwards each one to the union mailbox.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mnu_common::config::{EmailConfig, TomlConfig};
use mnu_web::notify::notifier_from_config;
use mnu_web::storage::MemStorage;
use mnu_web::{bind, build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for mnu-web
#[derive(Parser, Debug)]
#[command(name = "mnu-web")]
#[command(about = "Mkhonto National Union website and membership service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "MNU_PORT")]
    port: Option<u16>,

    /// Host address to bind (overrides the config file)
    #[arg(long, env = "MNU_HOST")]
    host: Option<String>,

    /// Path to the TOML config file
    #[arg(short, long, env = "MNU_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts; the log level lives in it
    let (config, config_source) = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration file")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", config.logging.level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting MNU website (mnu-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    config_source.report();

    let email = EmailConfig::resolve(&config.email);
    let notifier = notifier_from_config(&email).context("Failed to initialize email delivery")?;
    info!("Notification strategy: {}", notifier.name());

    let state = AppState::new(Arc::new(MemStorage::new()), notifier);
    let app = build_router(state);

    let server = config.server.with_overrides(args.host, args.port);
    let address = server.address();

    let (listener, bound) = bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("mnu-web listening on http://{}", bound);
    info!("Health check: http://{}/health", bound);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
