use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sharenet_core::error::CoreError;
use sharenet_pipeline::{BookingError, IngestionError};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`], sqlx errors and the pipeline errors. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `sharenet_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Workshop ingestion failed.
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    /// A booking was rejected or could not be stored.
    #[error(transparent)]
    Booking(#[from] BookingError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Pipeline errors ---
            AppError::Ingestion(err) => {
                tracing::error!(error = %err, "Workshop ingestion failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INGESTION_FAILED",
                    "Failed to create workshops from spots".to_string(),
                )
            }
            AppError::Booking(err) => match err {
                BookingError::NotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Workshop with id {id} not found"),
                ),
                BookingError::NoSeats(_) => (
                    StatusCode::BAD_REQUEST,
                    "NO_SEATS",
                    "No available seats".to_string(),
                ),
                BookingError::Storage(db_err) => {
                    tracing::error!(error = %db_err, "Booking storage error");
                    internal()
                }
            },
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// Check constraint violations (constraint name starting with `ck_`) map to
/// 400. Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::Database(db_err) = err {
        // PostgreSQL check constraint violation: error code 23514
        if db_err.code().as_deref() == Some("23514") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("ck_") {
                return (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value violates check constraint: {constraint}"),
                );
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    internal()
}
