use std::sync::Arc;

use sharenet_pipeline::WorkshopIngestor;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sharenet_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Spot-to-workshop ingestion, wired to the upstream spot source.
    pub ingestor: Arc<WorkshopIngestor>,
}
