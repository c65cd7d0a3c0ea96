//! Serve command - runs the HTTP API server

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router_with_state;
use crate::config::AppConfig;
use crate::infrastructure::classifier::BreedClassifier;
use crate::infrastructure::logging;

pub async fn run() -> anyhow::Result<()> {
    let config = super::load_config();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state_with_config(&config)?;
    spawn_warm_up(Arc::clone(&state.classifier));

    let app = create_router_with_state(state, config.upload.max_bytes);

    let addr = build_socket_addr(&config)?;
    info!("Starting API server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server shutdown complete");

    Ok(())
}

/// Load the model in the background so the first upload does not pay for it
fn spawn_warm_up(classifier: Arc<BreedClassifier>) {
    tokio::spawn(async move {
        match classifier.warm_up().await {
            Ok(()) => info!(status = ?classifier.status(), "Breed classifier ready"),
            Err(e) => warn!(error = %e, "Breed classifier unavailable; analyses will fail"),
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
