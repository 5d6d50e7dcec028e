//! Route definitions for the `/offices` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::office;
use crate::state::AppState;

/// Routes mounted at `/offices`.
///
/// `/suggestions` is registered before `/{id}` so it is not swallowed
/// by the ID matcher.
///
/// ```text
/// GET /               -> list
/// GET /suggestions    -> suggestions (top-rated)
/// GET /{id}           -> get_by_id
/// GET /{id}/projects  -> list_projects
/// GET /{id}/reviews   -> list_reviews
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(office::list))
        .route("/suggestions", get(office::suggestions))
        .route("/{id}", get(office::get_by_id))
        .route("/{id}/projects", get(office::list_projects))
        .route("/{id}/reviews", get(office::list_reviews))
}
