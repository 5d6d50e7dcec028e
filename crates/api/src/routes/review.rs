//! Route definitions for the `/reviews` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// `/mine` is registered before `/{id}` so it is not swallowed by the
/// ID matcher.
///
/// ```text
/// POST   /       -> create
/// GET    /mine   -> mine (authored by caller)
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (author only)
/// DELETE /{id}   -> delete (author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(review::create))
        .route("/mine", get(review::mine))
        .route(
            "/{id}",
            get(review::get_by_id)
                .put(review::update)
                .delete(review::delete),
        )
}
