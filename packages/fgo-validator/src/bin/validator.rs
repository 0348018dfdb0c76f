//! FGO Validator binary.

use std::sync::Arc;

use fgo_validator::{create_router, AppState, Config};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "validator";
const ENV_PREFIX: &str = "FGO_VALIDATOR";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::load(CONFIG_FILE, ENV_PREFIX)?;
    info!(
        rpc = %config.rpc_url,
        fallback = %config.fallback_rpc_url,
        subgraph = %config.subgraph_url,
        timeout_ms = config.request_timeout_ms,
        "FGO Validator configured"
    );

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!(address = %listener.local_addr()?, "Listening");

    let app = create_router(Arc::new(AppState::new(config)?));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("FGO Validator stopped");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("Interrupted, shutting down"),
        _ = terminate => info!("Terminated, shutting down"),
    }
}
