//! Handlers for the `/favorites` resource.
//!
//! Individual accounts bookmark offices, companies and projects. The
//! pair (item, kind) is unique per user; re-adding an existing
//! favorite is reported as a conflict by the unique constraint.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use meemar_core::error::CoreError;
use meemar_core::party::{validate_favorite_kind, FavoriteKind};
use meemar_core::types::DbId;
use meemar_db::models::favorite::UserFavorite;
use meemar_db::repositories::{CompanyRepo, FavoriteRepo, OfficeRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthParty;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub item_id: Option<DbId>,
    pub item_type: Option<String>,
}

/// GET /api/v1/favorites
pub async fn list(
    auth: AuthParty,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserFavorite>>> {
    let user_id = auth.require_individual()?;
    let favorites = FavoriteRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(favorites))
}

/// POST /api/v1/favorites
pub async fn add(
    auth: AuthParty,
    State(state): State<AppState>,
    Json(input): Json<FavoriteRequest>,
) -> AppResult<(StatusCode, Json<UserFavorite>)> {
    let user_id = auth.require_individual()?;
    let (item_id, kind) = parse_item(&input)?;
    ensure_item_exists(&state, item_id, kind).await?;

    let favorite = FavoriteRepo::add(&state.pool, user_id, item_id, kind.as_str()).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// DELETE /api/v1/favorites?item_id=..&item_type=..
pub async fn remove(
    auth: AuthParty,
    State(state): State<AppState>,
    Query(input): Query<FavoriteRequest>,
) -> AppResult<StatusCode> {
    let user_id = auth.require_individual()?;
    let (item_id, kind) = parse_item(&input)?;

    if !FavoriteRepo::remove(&state.pool, user_id, item_id, kind.as_str()).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Favorite",
            id: item_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn parse_item(input: &FavoriteRequest) -> Result<(DbId, FavoriteKind), AppError> {
    let item_id = input.item_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "item_id and item_type are required".to_string(),
        ))
    })?;
    let kind = validate_favorite_kind(input.item_type.as_deref().unwrap_or(""))?;
    Ok((item_id, kind))
}

async fn ensure_item_exists(state: &AppState, id: DbId, kind: FavoriteKind) -> AppResult<()> {
    let found = match kind {
        FavoriteKind::Office => OfficeRepo::find_by_id(&state.pool, id).await?.is_some(),
        FavoriteKind::Company => CompanyRepo::find_by_id(&state.pool, id).await?.is_some(),
        FavoriteKind::Project => ProjectRepo::find_by_id(&state.pool, id).await?.is_some(),
    };
    if !found {
        let entity = match kind {
            FavoriteKind::Office => "Office",
            FavoriteKind::Company => "Company",
            FavoriteKind::Project => "Project",
        };
        return Err(AppError::Core(CoreError::NotFound { entity, id }));
    }
    Ok(())
}
