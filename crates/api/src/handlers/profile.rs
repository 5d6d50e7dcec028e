//! Handlers for the `/profile` resource (own account).
//!
//! The authenticated account's kind decides which table is read and which
//! update payload applies. Ratings, points, and password hashes are never
//! settable through this surface.

use axum::extract::State;
use axum::Json;
use meemar_core::error::CoreError;
use meemar_core::party::PartyKind;
use meemar_db::models::company::{CompanyResponse, UpdateCompany};
use meemar_db::models::office::{OfficeResponse, UpdateOffice};
use meemar_db::models::user::{UpdateUser, UserResponse};
use meemar_db::repositories::{CompanyRepo, OfficeRepo, ProjectRepo, UserRepo};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthParty;
use crate::state::AppState;

/// GET /api/v1/profile
///
/// The caller's own record plus its projects: owned projects for
/// individuals, assigned (design or supervision) for offices, execution
/// assignments for companies.
pub async fn get_profile(
    auth: AuthParty,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    match auth.role {
        PartyKind::Individual => {
            let user = UserRepo::find_by_id(&state.pool, auth.id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "User",
                    id: auth.id,
                }))?;
            let projects = ProjectRepo::list_for_user(&state.pool, auth.id).await?;
            Ok(Json(json!({
                "account_type": auth.role.as_str(),
                "account": UserResponse::from(user),
                "projects": projects,
            })))
        }
        PartyKind::Office => {
            let office = OfficeRepo::find_by_id(&state.pool, auth.id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Office",
                    id: auth.id,
                }))?;
            let projects = ProjectRepo::list_for_office(&state.pool, auth.id).await?;
            Ok(Json(json!({
                "account_type": auth.role.as_str(),
                "account": OfficeResponse::from(office),
                "projects": projects,
            })))
        }
        PartyKind::Company => {
            let company = CompanyRepo::find_by_id(&state.pool, auth.id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Company",
                    id: auth.id,
                }))?;
            let projects = ProjectRepo::list_for_company(&state.pool, auth.id).await?;
            Ok(Json(json!({
                "account_type": auth.role.as_str(),
                "account": CompanyResponse::from(company),
                "projects": projects,
            })))
        }
    }
}

/// PUT /api/v1/profile
///
/// Update the caller's own mutable fields. The payload is decoded against
/// the update shape of the caller's account kind; unknown fields are
/// ignored. A changed email still has to be unique (409 otherwise).
pub async fn update_profile(
    auth: AuthParty,
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<serde_json::Value>> {
    match auth.role {
        PartyKind::Individual => {
            let update: UpdateUser = decode_payload(body)?;
            let user = UserRepo::update(&state.pool, auth.id, &update)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "User",
                    id: auth.id,
                }))?;
            Ok(Json(json!({
                "account_type": auth.role.as_str(),
                "account": UserResponse::from(user),
            })))
        }
        PartyKind::Office => {
            let update: UpdateOffice = decode_payload(body)?;
            let office = OfficeRepo::update(&state.pool, auth.id, &update)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Office",
                    id: auth.id,
                }))?;
            Ok(Json(json!({
                "account_type": auth.role.as_str(),
                "account": OfficeResponse::from(office),
            })))
        }
        PartyKind::Company => {
            let update: UpdateCompany = decode_payload(body)?;
            let company = CompanyRepo::update(&state.pool, auth.id, &update)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Company",
                    id: auth.id,
                }))?;
            Ok(Json(json!({
                "account_type": auth.role.as_str(),
                "account": CompanyResponse::from(company),
            })))
        }
    }
}

fn decode_payload<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid profile payload: {e}")))
}
