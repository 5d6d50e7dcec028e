//! Handlers for the per-project design specification.
//!
//! One design row per project, written wholesale through an upsert.
//! Only the owner may write, and only while the project sits in the
//! detail-submission status; reads are open to every party that can
//! see the project.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use meemar_core::error::CoreError;
use meemar_core::types::DbId;
use meemar_core::workflow::ProjectStatus;
use meemar_db::models::project_design::{ProjectDesign, UpsertProjectDesign};
use meemar_db::repositories::ProjectDesignRepo;

use super::project::{current_status, ensure_project_visible, fetch_project};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthParty;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/design
///
/// `null` body when no design has been submitted yet.
pub async fn get(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Option<ProjectDesign>>> {
    let project = fetch_project(&state, id).await?;
    ensure_project_visible(&auth, &project)?;

    let design = ProjectDesignRepo::find_by_project(&state.pool, id).await?;
    Ok(Json(design))
}

/// PUT /api/v1/projects/{id}/design
///
/// Owner-only insert-or-replace. Responds 201 when the design is
/// created, 200 when an existing one is replaced. Ownership failures
/// are reported as 404 so outsiders cannot probe project IDs.
pub async fn upsert(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpsertProjectDesign>,
) -> AppResult<(StatusCode, Json<ProjectDesign>)> {
    let user_id = auth.require_individual()?;
    let project = fetch_project(&state, id).await?;
    if project.user_id != user_id {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    let status = current_status(&project)?;
    if status != ProjectStatus::DetailsSubmitted {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Design details can only be edited while the project is in status '{}' (currently '{status}')",
            ProjectStatus::DetailsSubmitted
        ))));
    }

    let existed = ProjectDesignRepo::find_by_project(&state.pool, id)
        .await?
        .is_some();
    let design = ProjectDesignRepo::upsert(&state.pool, id, &input).await?;

    let code = if existed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((code, Json(design)))
}
