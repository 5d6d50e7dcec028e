//! Handlers for the `/auth` resource (signup, login).
//!
//! One email namespace per account table: individuals, offices, and
//! companies register separately, and login resolves the email across all
//! three tables in that order.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use meemar_core::error::CoreError;
use meemar_core::party::{validate_party_kind, PartyKind};
use meemar_db::models::company::{CompanyResponse, CreateCompany};
use meemar_db::models::office::{CreateOffice, OfficeResponse};
use meemar_db::models::user::{CreateUser, UserResponse};
use meemar_db::repositories::{CompanyRepo, OfficeRepo, UserRepo};
use serde::Deserialize;
use serde_json::json;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
///
/// `account_type` picks the table; the optional fields beyond `phone` only
/// apply to the matching account kind and are ignored otherwise.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub account_type: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    /// Required for offices, optional for individuals and companies.
    pub location: Option<String>,
    // Individual extras.
    pub id_number: Option<String>,
    pub bank_account: Option<String>,
    // Office extras.
    pub capacity: Option<i32>,
    pub staff_count: Option<i32>,
    pub branches: Option<String>,
    // Company extras.
    pub description: Option<String>,
    pub company_type: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register a new account and return it together with a fresh token.
/// Duplicate emails surface as 409 via the unique constraint.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let kind = validate_party_kind(&input.account_type).map_err(AppError::Core)?;

    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name is required".into(),
        )));
    }
    if input.email.trim().is_empty() || !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        )));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let (account_id, account_name, account) = match kind {
        PartyKind::Individual => {
            let create = CreateUser {
                name: input.name,
                email: input.email,
                password_hash,
                phone: input.phone,
                id_number: input.id_number,
                bank_account: input.bank_account,
                location: input.location,
            };
            let user = UserRepo::create(&state.pool, &create).await?;
            (user.id, user.name.clone(), json!(UserResponse::from(user)))
        }
        PartyKind::Office => {
            let location = input
                .location
                .filter(|l| !l.trim().is_empty())
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(
                        "Office accounts require a location".into(),
                    ))
                })?;
            let create = CreateOffice {
                name: input.name,
                email: input.email,
                password_hash,
                phone: input.phone,
                location,
                capacity: input.capacity,
                bank_account: input.bank_account,
                staff_count: input.staff_count,
                branches: input.branches,
            };
            let office = OfficeRepo::create(&state.pool, &create).await?;
            (
                office.id,
                office.name.clone(),
                json!(OfficeResponse::from(office)),
            )
        }
        PartyKind::Company => {
            let create = CreateCompany {
                name: input.name,
                email: input.email,
                password_hash,
                phone: input.phone,
                description: input.description,
                company_type: input.company_type,
                location: input.location,
                bank_account: input.bank_account,
                staff_count: input.staff_count,
            };
            let company = CompanyRepo::create(&state.pool, &create).await?;
            (
                company.id,
                company.name.clone(),
                json!(CompanyResponse::from(company)),
            )
        }
    };

    let token = issue_token(&state, account_id, kind, &account_name)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Account created successfully",
            "token": token,
            "account_type": kind.as_str(),
            "account": account,
        })),
    ))
}

/// POST /api/v1/auth/login
///
/// Resolve the email across users, then offices, then companies. Both an
/// unknown email and a wrong password answer 401 with the same message.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Email and password are required".into(),
        )));
    }

    if let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        check_password(&input.password, &user.password_hash)?;
        let token = issue_token(&state, user.id, PartyKind::Individual, &user.name)?;
        return Ok(Json(login_response(
            token,
            PartyKind::Individual,
            json!(UserResponse::from(user)),
        )));
    }

    if let Some(office) = OfficeRepo::find_by_email(&state.pool, &input.email).await? {
        check_password(&input.password, &office.password_hash)?;
        let token = issue_token(&state, office.id, PartyKind::Office, &office.name)?;
        return Ok(Json(login_response(
            token,
            PartyKind::Office,
            json!(OfficeResponse::from(office)),
        )));
    }

    if let Some(company) = CompanyRepo::find_by_email(&state.pool, &input.email).await? {
        check_password(&input.password, &company.password_hash)?;
        let token = issue_token(&state, company.id, PartyKind::Company, &company.name)?;
        return Ok(Json(login_response(
            token,
            PartyKind::Company,
            json!(CompanyResponse::from(company)),
        )));
    }

    Err(invalid_credentials())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// Verify a password, collapsing a mismatch into the same 401 as an
/// unknown email so login does not leak which emails exist.
fn check_password(password: &str, hash: &str) -> AppResult<()> {
    let valid = verify_password(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if valid {
        Ok(())
    } else {
        Err(invalid_credentials())
    }
}

fn issue_token(
    state: &AppState,
    account_id: meemar_core::types::DbId,
    kind: PartyKind,
    name: &str,
) -> AppResult<String> {
    generate_token(account_id, kind, name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}

fn login_response(token: String, kind: PartyKind, account: serde_json::Value) -> serde_json::Value {
    json!({
        "message": "Login successful",
        "token": token,
        "account_type": kind.as_str(),
        "account": account,
    })
}
