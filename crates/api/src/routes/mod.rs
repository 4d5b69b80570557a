pub mod health;
pub mod workshop;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workshops                                       list, create
/// /workshops/create-from-spots                     ingest from upstream spots (POST)
/// /workshops/{id}                                  get, update, delete
/// /workshops/{id}/book                             take one seat (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/workshops", workshop::router())
}
