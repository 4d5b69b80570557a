//! Route definitions for the `/workshops` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::workshop;
use crate::state::AppState;

/// Routes mounted at `/workshops`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// POST   /create-from-spots     -> create_from_spots
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// POST   /{id}/book             -> book
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workshop::list).post(workshop::create))
        .route("/create-from-spots", post(workshop::create_from_spots))
        .route(
            "/{id}",
            get(workshop::get_by_id)
                .put(workshop::update)
                .delete(workshop::delete),
        )
        .route("/{id}/book", post(workshop::book))
}
