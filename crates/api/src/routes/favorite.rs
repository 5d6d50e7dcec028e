//! Route definitions for the `/favorites` resource.
//!
//! Individual accounts only; removal is addressed by query parameters
//! since the (item, kind) pair is the natural key.

use axum::routing::get;
use axum::Router;

use crate::handlers::favorite;
use crate::state::AppState;

/// Routes mounted at `/favorites`.
///
/// ```text
/// GET    /                         -> list
/// POST   /                         -> add
/// DELETE /?item_id=&item_type=     -> remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(favorite::list)
            .post(favorite::add)
            .delete(favorite::remove),
    )
}
