//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication and are scoped to the
//! authenticated recipient.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /               -> list (?limit, offset)
/// POST   /               -> create
/// GET    /unread-count   -> unread_count
/// PUT    /read-all       -> mark_all_read
/// PUT    /{id}/read      -> mark_read
/// DELETE /{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list).post(notification::create))
        .route("/unread-count", get(notification::unread_count))
        .route("/read-all", put(notification::mark_all_read))
        .route("/{id}/read", put(notification::mark_read))
        .route("/{id}", delete(notification::delete))
}
