//! CardLedger - greeting card recipient ledger
//!
//! Main entry point for the HTTP server.

use anyhow::Context;
use cardledger_api::utils::logging::init_tracing;
use cardledger_api::utils::shutdown::wait_for_shutdown;
use cardledger_api::{router, AppState};
use cardledger_domain::Config;
use cardledger_infra::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so RUST_LOG and CARDLEDGER_* are visible to everything below
    let dotenv = dotenvy::dotenv();
    init_tracing();

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded .env"),
        Err(e) => tracing::debug!(error = %e, "No .env file loaded"),
    }

    let config = config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "No usable configuration found, using defaults");
        Config::default()
    });

    let state = AppState::open(&config.database).context("failed to open card database")?;

    let bind_addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("Server listening on {bind_addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await
        .context("http server stopped unexpectedly")?;

    Ok(())
}
