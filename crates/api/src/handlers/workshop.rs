//! Handlers for the `/workshops` resource.
//!
//! Bodies are bare JSON (no envelope) because the booking front-end reads
//! workshop objects and arrays directly.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use sharenet_core::error::CoreError;
use sharenet_core::types::DbId;
use sharenet_db::models::workshop::{CreateWorkshop, UpdateWorkshop};
use sharenet_db::repositories::WorkshopRepo;

use crate::error::{AppError, AppResult};
use crate::extract::WorkshopId;
use crate::state::AppState;

/// Body returned after a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Workshop",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/workshops
///
/// List all workshops, soonest first.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workshops = WorkshopRepo::list(&state.pool).await?;
    Ok(Json(workshops))
}

/// GET /api/workshops/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    WorkshopId(id): WorkshopId,
) -> AppResult<impl IntoResponse> {
    let workshop = WorkshopRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(workshop))
}

/// POST /api/workshops
///
/// Create a workshop from an explicit body.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkshop>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let workshop = WorkshopRepo::create(&state.pool, &input).await?;
    tracing::info!(workshop_id = workshop.id, "Workshop created");
    Ok((StatusCode::CREATED, Json(workshop)))
}

/// PUT /api/workshops/{id}
///
/// Partial update; only the supplied fields change.
pub async fn update(
    State(state): State<AppState>,
    WorkshopId(id): WorkshopId,
    Json(input): Json<UpdateWorkshop>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let workshop = WorkshopRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(workshop))
}

/// DELETE /api/workshops/{id}
pub async fn delete(
    State(state): State<AppState>,
    WorkshopId(id): WorkshopId,
) -> AppResult<impl IntoResponse> {
    WorkshopRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(workshop_id = id, "Workshop deleted");
    Ok(Json(DeleteResponse {
        message: "Workshop deleted successfully",
    }))
}

/// POST /api/workshops/create-from-spots
///
/// Pull the current spot listing and create one workshop per spot.
pub async fn create_from_spots(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workshops = state.ingestor.ingest(&state.pool).await?;
    Ok(Json(workshops))
}

/// POST /api/workshops/{id}/book
///
/// Take one seat on the workshop.
pub async fn book(
    State(state): State<AppState>,
    WorkshopId(id): WorkshopId,
) -> AppResult<impl IntoResponse> {
    let workshop = sharenet_pipeline::book(&state.pool, id).await?;
    Ok(Json(workshop))
}
