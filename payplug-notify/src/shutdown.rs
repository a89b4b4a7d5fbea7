//! Signal handling for graceful shutdown.

use tokio::signal::unix::{SignalKind, signal};

/// Creates a future that completes when a shutdown signal is received.
///
/// Listens for SIGTERM and SIGINT (Ctrl+C). A signal whose handler cannot be
/// installed is logged and never fires.
pub async fn shutdown_signal() {
    tokio::select! {
        _ = wait_for(SignalKind::terminate()) => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
        _ = wait_for(SignalKind::interrupt()) => {
            tracing::info!("Received SIGINT, initiating graceful shutdown");
        }
    }
}

async fn wait_for(kind: SignalKind) {
    match signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::warn!(error = %e, signal = ?kind, "failed to install signal handler");
            std::future::pending::<()>().await;
        }
    }
}
