#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sharenet_core::spot::Spot;
use sharenet_pipeline::{IngestOptions, WorkshopIngestor};
use sharenet_spots::{SpotSource, SpotsError};
use sqlx::PgPool;
use tower::ServiceExt;

use sharenet_api::config::ServerConfig;
use sharenet_api::router::build_app_router;
use sharenet_api::state::AppState;

/// Serves a fixed list of spots, or fails like an unreachable upstream.
pub struct FakeSpots(pub Option<Vec<Spot>>);

#[async_trait]
impl SpotSource for FakeSpots {
    async fn fetch_spots(&self) -> Result<Vec<Spot>, SpotsError> {
        self.0
            .clone()
            .ok_or(SpotsError::Timeout(Duration::from_secs(10)))
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|key| match key {
        "HOST" => Some("127.0.0.1".to_string()),
        "PORT" => Some("0".to_string()),
        "CORS_ORIGINS" => Some("http://localhost:5173".to_string()),
        _ => None,
    })
}

/// Build the full application router with all middleware layers, using the
/// given database pool and an upstream that has no spots.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_spots(pool, Some(Vec::new()))
}

/// Build the application router with a fake spot source.
///
/// `None` makes every fetch fail.
pub fn build_test_app_with_spots(pool: PgPool, spots: Option<Vec<Spot>>) -> Router {
    let config = test_config();
    let ingestor = WorkshopIngestor::new(Arc::new(FakeSpots(spots)), IngestOptions::default());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ingestor: Arc::new(ingestor),
    };

    build_app_router(state, &config)
}

pub fn spot(code: &str, full_name: &str, datetime: &str) -> Spot {
    Spot {
        code: code.to_string(),
        full_name: full_name.to_string(),
        category_name: "Futures".to_string(),
        price: Some(1.0),
        move_: Some(0.0),
        pmove: Some(0.0),
        datetime: datetime.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
