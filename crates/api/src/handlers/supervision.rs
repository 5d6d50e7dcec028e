//! Handlers for the supervision side of the project workflow.
//!
//! Any project that is not already supervised or finished can be put
//! under the supervision of an office, independent of how far the
//! design side has come. The supervising office approves or rejects
//! the engagement and then files weekly reports until the target week
//! count is reached.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use meemar_core::document::{
    validate_upload_constraints, REPORT_ALLOWED_EXTENSIONS, REPORT_MAX_SIZE_BYTES,
};
use meemar_core::error::CoreError;
use meemar_core::notification as events;
use meemar_core::party::PartyRef;
use meemar_core::types::DbId;
use meemar_core::workflow::{
    check_source, next_status, required_actor, validate_week_number, WorkflowAction,
};
use meemar_db::models::notification::NewNotification;
use meemar_db::repositories::{CompanyRepo, OfficeRepo, ProjectRepo};

use super::project::{current_status, ensure_project_actor, fetch_project, lost_update};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthParty;
use crate::state::AppState;
use crate::storage;

/// Fallback reason recorded when an office rejects without giving one.
const DEFAULT_REJECTION_REASON: &str = "Supervision request was rejected by the office.";

#[derive(Debug, Deserialize)]
pub struct RequestSupervisionRequest {
    pub supervising_office_id: Option<DbId>,
    pub assigned_company_id: Option<DbId>,
    pub supervision_weeks_target: Option<i32>,
}

/// POST /api/v1/projects/{id}/request-supervision
///
/// The owner asks an office to supervise the project, optionally
/// binding an executing company and a weekly report target. A request
/// rejected by one office can be re-sent to another.
pub async fn request_supervision(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RequestSupervisionRequest>,
) -> AppResult<Json<Value>> {
    let action = WorkflowAction::RequestSupervision;
    let project = fetch_project(&state, id).await?;
    ensure_project_actor(&auth, &project, required_actor(action))?;

    let current = current_status(&project)?;
    check_source(action, current)?;

    let office_id = input.supervising_office_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Supervising office ID is required".to_string(),
        ))
    })?;
    OfficeRepo::find_by_id(&state.pool, office_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Office",
            id: office_id,
        }))?;
    if let Some(company_id) = input.assigned_company_id {
        CompanyRepo::find_by_id(&state.pool, company_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Company",
                id: company_id,
            }))?;
    }
    if let Some(weeks) = input.supervision_weeks_target {
        if weeks < 1 {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Supervision weeks target must be at least 1 (got {weeks})"
            ))));
        }
    }

    let next = next_status(action, current);
    let updated = ProjectRepo::request_supervision(
        &state.pool,
        id,
        current.as_str(),
        next.as_str(),
        office_id,
        input.assigned_company_id,
        input.supervision_weeks_target,
    )
    .await?
    .ok_or_else(lost_update)?;

    state.notifier.enqueue(NewNotification::project_event(
        PartyRef::office(office_id),
        auth.as_party_ref(),
        events::NEW_SUPERVISION_REQUEST,
        format!(
            "User '{}' requests your supervision for project: '{}'.",
            auth.name, updated.name
        ),
        updated.id,
    ));

    Ok(Json(json!({
        "message": "Supervision request sent successfully.",
        "project": updated,
    })))
}

#[derive(Debug, Deserialize)]
pub struct RespondSupervisionRequest {
    pub action: Option<String>,
    pub rejection_reason: Option<String>,
}

/// PUT /api/v1/projects/{id}/respond-supervision
///
/// The designated supervising office accepts or declines. Rejection
/// detaches the office and the bound company so the owner can try
/// elsewhere; a reason is always recorded.
pub async fn respond_supervision(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RespondSupervisionRequest>,
) -> AppResult<Json<Value>> {
    let action = match input.action.as_deref() {
        Some("approve") => WorkflowAction::ApproveSupervision,
        Some("reject") => WorkflowAction::RejectSupervision,
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Invalid action. Must be \"approve\" or \"reject\".".to_string(),
            )))
        }
    };

    let project = fetch_project(&state, id).await?;
    ensure_project_actor(&auth, &project, required_actor(action))?;

    let current = current_status(&project)?;
    check_source(action, current)?;
    let next = next_status(action, current);

    let (updated, message, notification) = match action {
        WorkflowAction::ApproveSupervision => {
            let updated =
                ProjectRepo::approve_supervision(&state.pool, id, current.as_str(), next.as_str())
                    .await?
                    .ok_or_else(lost_update)?;
            let notification = NewNotification::project_event(
                PartyRef::individual(updated.user_id),
                auth.as_party_ref(),
                events::SUPERVISION_REQUEST_APPROVED,
                format!(
                    "Office '{}' has APPROVED your request for supervision on project: '{}'.",
                    auth.name, updated.name
                ),
                updated.id,
            );
            (updated, "Supervision request approved successfully.", notification)
        }
        _ => {
            let given_reason = input
                .rejection_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty());
            let reason = given_reason.unwrap_or(DEFAULT_REJECTION_REASON);
            let updated = ProjectRepo::reject_supervision(
                &state.pool,
                id,
                current.as_str(),
                next.as_str(),
                reason,
            )
            .await?
            .ok_or_else(lost_update)?;

            let mut text = format!(
                "Office '{}' has REJECTED your request for supervision on project: '{}'.",
                auth.name, updated.name
            );
            if let Some(reason) = given_reason {
                text.push_str(&format!(" Reason: {reason}"));
            }
            let notification = NewNotification::project_event(
                PartyRef::individual(updated.user_id),
                auth.as_party_ref(),
                events::SUPERVISION_REQUEST_REJECTED,
                text,
                updated.id,
            );
            (updated, "Supervision request rejected successfully.", notification)
        }
    };
    state.notifier.enqueue(notification);

    Ok(Json(json!({ "message": message, "project": updated })))
}

/// PUT /api/v1/projects/{id}/supervision-report
///
/// Multipart upload of a weekly supervision report. Fields:
///
/// - `file` (required): the report document
/// - `week_number` (required): which week the report covers
///
/// The week must stay within the project's supervision target. Each
/// upload replaces the stored report file and sets the completed-week
/// counter to the submitted week; the status stays under supervision.
pub async fn submit_report(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let action = WorkflowAction::SubmitSupervisionReport;
    let project = fetch_project(&state, id).await?;
    ensure_project_actor(&auth, &project, required_actor(action))?;

    let current = current_status(&project)?;
    check_source(action, current)?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut week_number: Option<i32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart data: {e}")))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let filename = field.file_name().unwrap_or("report.bin").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {e}")))?;
                file = Some((filename, bytes.to_vec()));
            }
            "week_number" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read field: {e}")))?;
                week_number = Some(text.trim().parse().map_err(|_| {
                    AppError::Core(CoreError::Validation(format!(
                        "week_number must be an integer (got '{text}')"
                    )))
                })?);
            }
            _ => {} // ignore unknown fields
        }
    }

    let (filename, data) = file.ok_or_else(|| {
        AppError::BadRequest("Missing required 'file' field".to_string())
    })?;
    let week = week_number.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "week_number is required".to_string(),
        ))
    })?;

    validate_week_number(week, project.supervision_weeks_target)?;
    validate_upload_constraints(
        &filename,
        data.len(),
        REPORT_ALLOWED_EXTENSIONS,
        REPORT_MAX_SIZE_BYTES,
    )?;

    let file_path =
        storage::store_document(&state.config.upload_dir, id, "report", &filename, &data).await?;

    let updated = ProjectRepo::submit_supervision_report(
        &state.pool,
        id,
        current.as_str(),
        &file_path,
        week,
    )
    .await?
    .ok_or_else(lost_update)?;

    state.notifier.enqueue(NewNotification::project_event(
        PartyRef::individual(updated.user_id),
        auth.as_party_ref(),
        events::SUPERVISION_REPORT_SUBMITTED,
        format!(
            "Office '{}' has submitted the supervision report for week {week} of project: '{}'.",
            auth.name, updated.name
        ),
        updated.id,
    ));

    Ok(Json(json!({
        "message": "Supervision report submitted successfully.",
        "file_path": file_path,
        "project": updated,
    })))
}
