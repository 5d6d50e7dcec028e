//! Route definitions for the `/search` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Routes mounted at `/search`.
///
/// ```text
/// GET /{type}?q=  -> search (users | offices | companies | projects)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{type}", get(search::search))
}
