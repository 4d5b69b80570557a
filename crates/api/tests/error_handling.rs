//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests do NOT need an HTTP server -- they call `IntoResponse`
//! directly on `AppError` values.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use sharenet_api::error::AppError;
use sharenet_core::error::CoreError;
use sharenet_pipeline::{BookingError, IngestionError};
use sharenet_spots::SpotsError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn core_not_found_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Workshop",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Workshop with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("seats must not be negative".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "seats must not be negative");
}

#[tokio::test]
async fn booking_not_found_returns_404() {
    let (status, json) = error_to_response(BookingError::NotFound(7).into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Workshop with id 7 not found");
}

#[tokio::test]
async fn booking_no_seats_returns_400() {
    let (status, json) = error_to_response(BookingError::NoSeats(7).into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "NO_SEATS");
    assert_eq!(json["error"], "No available seats");
}

#[tokio::test]
async fn booking_storage_failure_returns_500() {
    let err: AppError = BookingError::Storage(sqlx::Error::PoolTimedOut).into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn ingestion_failure_returns_500_without_details() {
    let err: AppError =
        IngestionError::Upstream(SpotsError::Timeout(Duration::from_secs(10))).into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INGESTION_FAILED");
    assert_eq!(json["error"], "Failed to create workshops from spots");
}

#[tokio::test]
async fn database_error_returns_500_without_details() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
