//! Route definitions for the `/projects` resource.
//!
//! Projects carry the whole workflow surface: CRUD, the transition
//! endpoints, document slots, the design specification and the
//! supervision sub-flow.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{document, project, project_design, supervision};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                            -> list (role-scoped)
/// POST   /                            -> create
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update (descriptive fields)
/// DELETE /{id}                        -> delete
///
/// PUT    /{id}/respond                -> respond (approve/reject)
/// PUT    /{id}/submit-final-details   -> submit_final_details
/// PUT    /{id}/propose-payment        -> propose_payment
/// PUT    /{id}/progress               -> update_progress
///
/// POST   /{id}/request-supervision    -> request_supervision
/// PUT    /{id}/respond-supervision    -> respond_supervision
/// PUT    /{id}/supervision-report     -> submit_report (multipart)
///
/// GET    /{id}/documents              -> documents list
/// POST   /{id}/documents/{slot}       -> document upload (multipart)
///
/// GET    /{id}/design                 -> design get
/// PUT    /{id}/design                 -> design upsert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // CRUD
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        // Design-side workflow
        .route("/{id}/respond", put(project::respond))
        .route(
            "/{id}/submit-final-details",
            put(project::submit_final_details),
        )
        .route("/{id}/propose-payment", put(project::propose_payment))
        .route("/{id}/progress", put(project::update_progress))
        // Supervision sub-flow
        .route(
            "/{id}/request-supervision",
            post(supervision::request_supervision),
        )
        .route(
            "/{id}/respond-supervision",
            put(supervision::respond_supervision),
        )
        .route("/{id}/supervision-report", put(supervision::submit_report))
        // Document slots
        .route("/{id}/documents", get(document::list))
        .route("/{id}/documents/{slot}", post(document::upload))
        // Design specification
        .route(
            "/{id}/design",
            get(project_design::get).put(project_design::upsert),
        )
}
