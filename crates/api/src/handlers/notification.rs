//! Handlers for the `/notifications` resource.
//!
//! Every endpoint is scoped to the authenticated recipient: a party
//! can only ever list, read or delete its own notifications. Workflow
//! handlers deliver through the background [`Notifier`]; the POST
//! endpoint exists for administrative and system messages.
//!
//! [`Notifier`]: crate::notifier::Notifier

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use meemar_core::error::CoreError;
use meemar_core::types::DbId;
use meemar_db::models::notification::{NewNotification, Notification};
use meemar_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthParty;
use crate::state::AppState;

/// Page size applied when the query does not set one.
const DEFAULT_LIMIT: i64 = 50;
/// Hard page-size ceiling.
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/notifications
///
/// Newest first, paginated.
pub async fn list(
    auth: AuthParty,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Value>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let items = NotificationRepo::list_for_recipient(
        &state.pool,
        auth.id,
        auth.role.as_str(),
        limit,
        offset,
    )
    .await?;
    let total = NotificationRepo::count_for_recipient(&state.pool, auth.id, auth.role.as_str())
        .await?;

    Ok(Json(json!({
        "total": total,
        "items": items,
        "limit": limit,
        "offset": offset,
    })))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthParty,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let count =
        NotificationRepo::unread_count(&state.pool, auth.id, auth.role.as_str()).await?;
    Ok(Json(json!({ "unread_count": count })))
}

/// POST /api/v1/notifications
///
/// Direct insertion, for system messages outside the workflow.
pub async fn create(
    _auth: AuthParty,
    State(state): State<AppState>,
    Json(input): Json<NewNotification>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    if input.notification_type.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "notification_type is required".to_string(),
        )));
    }
    if input.message.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "message is required".to_string(),
        )));
    }
    let created = NotificationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/v1/notifications/{id}/read
pub async fn mark_read(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Notification>> {
    let notification =
        NotificationRepo::mark_read(&state.pool, id, auth.id, auth.role.as_str())
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Notification",
                id,
            }))?;
    Ok(Json(notification))
}

/// PUT /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthParty,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let updated =
        NotificationRepo::mark_all_read(&state.pool, auth.id, auth.role.as_str()).await?;
    Ok(Json(json!({ "updated": updated })))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NotificationRepo::delete(&state.pool, id, auth.id, auth.role.as_str()).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
