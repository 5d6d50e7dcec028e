//! Route definitions for the `/payments` resource.
//!
//! Both endpoints expect a signed-in caller.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// GET  /client-token  -> client_token
/// POST /checkout      -> checkout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/client-token", get(payment::client_token))
        .route("/checkout", post(payment::checkout))
}
