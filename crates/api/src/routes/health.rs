//! Liveness probe used by the hosting platform.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    database: &'static str,
}

/// GET /health
///
/// `200 {"status":"ok"}` while the database answers, `503` otherwise so the
/// platform stops routing to an instance that cannot serve workshops.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match sharenet_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(Health {
                status: "ok",
                database: "up",
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Health {
                    status: "unavailable",
                    database: "down",
                }),
            )
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
