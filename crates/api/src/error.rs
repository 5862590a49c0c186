//! HTTP mapping of domain errors

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cardledger_domain::constants::FIELD_PAYLOAD;
use cardledger_domain::{CardLedgerError, ValidationFailure};
use serde_json::json;

use crate::utils::logging::{error_label, ErrorLabel};

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError(pub CardLedgerError);

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match &self.0 {
            CardLedgerError::Validation(_) => StatusCode::BAD_REQUEST,
            CardLedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            CardLedgerError::Database(_)
            | CardLedgerError::Config(_)
            | CardLedgerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CardLedgerError> for ApiError {
    fn from(err: CardLedgerError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CardLedgerError::Validation(ValidationFailure::single(
            FIELD_PAYLOAD,
            rejection.body_text(),
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self.0 {
            CardLedgerError::Validation(failure) => json!({
                "error": "Validation failed",
                "fields": failure.violations,
            }),
            CardLedgerError::NotFound(_) => json!({ "error": "Card not found" }),
            other => json!({ "error": other.to_string() }),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorLabel(error_label(&self.0)));
        response
    }
}

#[cfg(test)]
mod tests {
    use cardledger_domain::FieldViolation;

    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (CardLedgerError::Validation(ValidationFailure::default()), StatusCode::BAD_REQUEST),
            (CardLedgerError::card_not_found("x"), StatusCode::NOT_FOUND),
            (CardLedgerError::Database("disk I/O".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (CardLedgerError::Config("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (CardLedgerError::Internal("join".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[test]
    fn response_carries_error_label() {
        let failure = ValidationFailure {
            violations: vec![FieldViolation::new("address", "is required")],
        };
        let response = ApiError(CardLedgerError::Validation(failure)).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.extensions().get::<ErrorLabel>(), Some(&ErrorLabel("validation")));
    }
}
