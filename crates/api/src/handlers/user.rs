//! Handlers for the `/users` resource (public profiles).

use axum::extract::{Path, State};
use axum::Json;
use meemar_core::error::CoreError;
use meemar_core::types::DbId;
use meemar_db::models::user::PublicUser;
use meemar_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/users/{id}
///
/// Public profile. Sensitive fields (password hash, bank account, national
/// id) are excluded.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PublicUser>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        }))?;
    Ok(Json(PublicUser::from(user)))
}
