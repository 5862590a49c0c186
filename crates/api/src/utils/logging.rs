use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use cardledger_domain::CardLedgerError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,cardledger=debug";

/// Stable error label attached to failed responses for the request log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorLabel(pub &'static str);

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter; `CARDLEDGER_LOG_FORMAT=json`
/// switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var("CARDLEDGER_LOG_FORMAT")
        .is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = if json { builder.json().try_init() } else { builder.try_init() };

    if let Err(e) = result {
        warn!(error = %e, "tracing subscriber already installed");
    }
}

/// Convert a `CardLedgerError` into a stable label suitable for logging.
#[inline]
pub const fn error_label(error: &CardLedgerError) -> &'static str {
    match error {
        CardLedgerError::Validation(_) => "validation",
        CardLedgerError::NotFound(_) => "not_found",
        CardLedgerError::Database(_) => "database",
        CardLedgerError::Config(_) => "config",
        CardLedgerError::Internal(_) => "internal",
    }
}

/// Middleware logging one structured line per request.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let status = response.status().as_u16();

    match response.extensions().get::<ErrorLabel>() {
        Some(ErrorLabel(error)) if response.status().is_server_error() => {
            warn!(%method, path = %path, status, duration_ms, error, "request_failed");
        }
        Some(ErrorLabel(error)) => {
            info!(%method, path = %path, status, duration_ms, error, "request_rejected");
        }
        None => info!(%method, path = %path, status, duration_ms, "request_completed"),
    }

    response
}
