//! Liveness endpoint, mounted at the server root.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
///
/// Answers 200 as long as the process is up; `database` reports whether
/// a round trip to Postgres currently succeeds.
async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = meemar_db::health_check(&state.pool).await.is_ok();
    Json(json!({
        "status": if database { "ok" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}

/// Health routes, merged at the root rather than under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
