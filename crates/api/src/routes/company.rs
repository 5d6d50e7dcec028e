//! Route definitions for the `/companies` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::company;
use crate::state::AppState;

/// Routes mounted at `/companies`.
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
        .route("/", get(company::list))
        .route("/suggestions", get(company::suggestions))
        .route("/{id}", get(company::get_by_id))
        .route("/{id}/projects", get(company::list_projects))
        .route("/{id}/reviews", get(company::list_reviews))
}
