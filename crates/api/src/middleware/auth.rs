//! Bearer-token extraction for handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use meemar_core::error::CoreError;
use meemar_core::party::{PartyKind, PartyRef};
use meemar_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated account extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthParty) -> AppResult<Json<()>> {
///     tracing::info!(account_id = auth.id, role = %auth.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthParty {
    /// The account's internal database id (from `claims.sub`).
    pub id: DbId,
    /// The account kind (from `claims.role`).
    pub role: PartyKind,
    /// Display name (from `claims.name`), used in notification messages.
    pub name: String,
}

impl AuthParty {
    /// Tagged reference for notification recipient/actor columns.
    pub fn as_party_ref(&self) -> PartyRef {
        PartyRef {
            kind: self.role,
            id: self.id,
        }
    }

    /// Reject with 403 unless the caller is an individual account.
    pub fn require_individual(&self) -> Result<DbId, AppError> {
        if self.role == PartyKind::Individual {
            Ok(self.id)
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "Only individual accounts may do this".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthParty {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Authorization header must be of the form 'Bearer <token>'".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthParty {
            id: claims.sub,
            role: claims.role,
            name: claims.name,
        })
    }
}
