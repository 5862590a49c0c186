//! Graceful shutdown trigger

use std::future::Future;

/// Resolve once `signal` fires.
///
/// A listener that fails to install is logged and never resolves, so the
/// server keeps running instead of shutting down on the spot.
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
