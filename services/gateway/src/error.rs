use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use market_data::AdapterError;
use serde_json::json;
use thiserror::Error;
use types::errors::RangeError;

/// Generic message for any upstream failure; details stay in the logs.
pub const UNAVAILABLE: &str = "Donnees indisponibles";

/// Central error type for the Gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn unavailable() -> Self {
        AppError::ServiceUnavailable(UNAVAILABLE.to_string())
    }

    pub fn history_not_found(ticker: &str) -> Self {
        AppError::NotFound(format!(
            "Historique introuvable pour '{}'",
            ticker.to_uppercase()
        ))
    }

    /// Map a failed history lookup.
    ///
    /// Without a resolved instrument or a first page there is no history to
    /// serve, so every upstream failure is a 404 on this route.
    pub fn from_history(ticker: &str, err: AdapterError) -> Self {
        match err {
            AdapterError::Config(_) => err.into(),
            other => {
                tracing::warn!(ticker, error = %other, "History lookup failed");
                AppError::history_not_found(ticker)
            }
        }
    }
}

impl From<AdapterError> for AppError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::InstrumentNotFound(ticker) => AppError::history_not_found(&ticker),
            AdapterError::Config(reason) => {
                tracing::error!(%reason, "Adapter misconfigured");
                AppError::InternalError(anyhow::anyhow!(reason))
            }
            other => {
                tracing::error!(error = %other, "Upstream failure");
                AppError::unavailable()
            }
        }
    }
}

impl From<RangeError> for AppError {
    fn from(err: RangeError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg, "VALIDATION_ERROR")
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                msg,
                "SERVICE_UNAVAILABLE",
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                "INTERNAL_ERROR",
            ),
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}
