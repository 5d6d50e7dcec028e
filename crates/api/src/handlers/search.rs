//! Handler for the `/search` resource.
//!
//! Case-insensitive substring search over one entity type per request.
//! Account results use the public projections, so credential and
//! banking fields never leave the server.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use meemar_core::error::CoreError;
use meemar_db::models::company::CompanyResponse;
use meemar_db::models::office::OfficeResponse;
use meemar_db::models::user::PublicUser;
use meemar_db::repositories::{CompanyRepo, OfficeRepo, ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Searchable entity types.
const SEARCH_TYPES: &[&str] = &["users", "offices", "companies", "projects"];

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/v1/search/{type}?q=
pub async fn search(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Value>> {
    let q = match query.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Search query 'q' is required".to_string(),
            )))
        }
    };

    let results = match entity.as_str() {
        "users" => {
            let users = UserRepo::search(&state.pool, q).await?;
            json!(users.into_iter().map(PublicUser::from).collect::<Vec<_>>())
        }
        "offices" => {
            let offices = OfficeRepo::search(&state.pool, q).await?;
            json!(offices
                .into_iter()
                .map(OfficeResponse::from)
                .collect::<Vec<_>>())
        }
        "companies" => {
            let companies = CompanyRepo::search(&state.pool, q).await?;
            json!(companies
                .into_iter()
                .map(CompanyResponse::from)
                .collect::<Vec<_>>())
        }
        "projects" => {
            let projects = ProjectRepo::search(&state.pool, q).await?;
            json!(projects)
        }
        other => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown search type '{other}'. Must be one of: {}",
                SEARCH_TYPES.join(", ")
            ))))
        }
    };
    Ok(Json(results))
}
