//! Handlers for the `/companies` resource.
//!
//! Same public browsing surface as offices: listing, suggestions, profile,
//! assigned projects, and reviews.

use axum::extract::{Path, State};
use axum::Json;
use meemar_core::error::CoreError;
use meemar_core::types::DbId;
use meemar_db::models::company::CompanyResponse;
use meemar_db::models::project::Project;
use meemar_db::models::review::Review;
use meemar_db::repositories::{CompanyRepo, ProjectRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// How many companies the suggestions endpoint returns.
const SUGGESTION_LIMIT: i64 = 10;

/// GET /api/v1/companies
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CompanyResponse>>> {
    let companies = CompanyRepo::list(&state.pool).await?;
    Ok(Json(
        companies.into_iter().map(CompanyResponse::from).collect(),
    ))
}

/// GET /api/v1/companies/suggestions
///
/// Top companies by rating, best first. Unrated companies sort last.
pub async fn suggestions(State(state): State<AppState>) -> AppResult<Json<Vec<CompanyResponse>>> {
    let companies = CompanyRepo::suggestions(&state.pool, SUGGESTION_LIMIT).await?;
    Ok(Json(
        companies.into_iter().map(CompanyResponse::from).collect(),
    ))
}

/// GET /api/v1/companies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CompanyResponse>> {
    let company = CompanyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }))?;
    Ok(Json(CompanyResponse::from(company)))
}

/// GET /api/v1/companies/{id}/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Project>>> {
    ensure_company_exists(&state, id).await?;
    let projects = ProjectRepo::list_for_company(&state.pool, id).await?;
    Ok(Json(projects))
}

/// GET /api/v1/companies/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Review>>> {
    ensure_company_exists(&state, id).await?;
    let reviews = ReviewRepo::list_for_company(&state.pool, id).await?;
    Ok(Json(reviews))
}

async fn ensure_company_exists(state: &AppState, id: DbId) -> AppResult<()> {
    CompanyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }))?;
    Ok(())
}
