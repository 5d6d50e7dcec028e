//! Handlers for the `/offices` resource.
//!
//! Offices are browsed publicly (listing, suggestions, profile, their
//! projects and reviews); mutation happens through `/profile` and the
//! project workflow.

use axum::extract::{Path, State};
use axum::Json;
use meemar_core::error::CoreError;
use meemar_core::types::DbId;
use meemar_db::models::office::OfficeResponse;
use meemar_db::models::project::Project;
use meemar_db::models::review::Review;
use meemar_db::repositories::{OfficeRepo, ProjectRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// How many offices the suggestions endpoint returns.
const SUGGESTION_LIMIT: i64 = 10;

/// GET /api/v1/offices
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<OfficeResponse>>> {
    let offices = OfficeRepo::list(&state.pool).await?;
    Ok(Json(offices.into_iter().map(OfficeResponse::from).collect()))
}

/// GET /api/v1/offices/suggestions
///
/// Top offices by rating, best first. Unrated offices sort last.
pub async fn suggestions(State(state): State<AppState>) -> AppResult<Json<Vec<OfficeResponse>>> {
    let offices = OfficeRepo::suggestions(&state.pool, SUGGESTION_LIMIT).await?;
    Ok(Json(offices.into_iter().map(OfficeResponse::from).collect()))
}

/// GET /api/v1/offices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OfficeResponse>> {
    let office = OfficeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Office",
            id,
        }))?;
    Ok(Json(OfficeResponse::from(office)))
}

/// GET /api/v1/offices/{id}/projects
///
/// Projects the office is engaged on, as design office or supervisor.
pub async fn list_projects(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Project>>> {
    ensure_office_exists(&state, id).await?;
    let projects = ProjectRepo::list_for_office(&state.pool, id).await?;
    Ok(Json(projects))
}

/// GET /api/v1/offices/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Review>>> {
    ensure_office_exists(&state, id).await?;
    let reviews = ReviewRepo::list_for_office(&state.pool, id).await?;
    Ok(Json(reviews))
}

async fn ensure_office_exists(state: &AppState, id: DbId) -> AppResult<()> {
    OfficeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Office",
            id,
        }))?;
    Ok(())
}
