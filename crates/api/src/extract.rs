//! Request extractors.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use sharenet_core::error::CoreError;
use sharenet_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Workshop id taken from the `{id}` path segment.
///
/// A non-numeric segment is rejected with the usual JSON error body
/// (`400 VALIDATION_ERROR`, "Invalid ID format") instead of axum's
/// plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct WorkshopId(pub DbId);

impl FromRequestParts<AppState> for WorkshopId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "Rejected workshop id");
                AppError::Core(CoreError::Validation("Invalid ID format".into()))
            })?;
        Ok(Self(id))
    }
}
