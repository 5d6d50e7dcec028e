//! Handlers for the `/projects` resource.
//!
//! Covers the request lifecycle from submission through design to
//! completion. Every status-changing handler runs the same guard
//! sequence: fetch (404), actor check (403), source-status check via
//! the workflow table (409), payload validation (400), then a
//! conditional write keyed on the status that was read. A conditional
//! write that matches zero rows means another request moved the project
//! first and is reported as a conflict, never as a lost update.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use meemar_core::error::CoreError;
use meemar_core::notification as events;
use meemar_core::party::{PartyKind, PartyRef};
use meemar_core::payment::{validate_amount, PAYMENT_STATUS_PENDING_USER_ACTION};
use meemar_core::types::DbId;
use meemar_core::workflow::{
    check_source, next_status, required_actor, validate_progress_stage, ProjectStatus,
    RequiredActor, WorkflowAction, COMPLETING_PROGRESS_STAGE,
};
use meemar_db::models::notification::NewNotification;
use meemar_db::models::project::{CreateProject, Project, UpdateProject};
use meemar_db::repositories::{OfficeRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthParty;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared guards
// ---------------------------------------------------------------------------

/// Load a project or fail with 404.
pub(crate) async fn fetch_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Parse the stored status column. The column is only ever written with
/// canonical values, so failure here is a broken row, not a bad request.
pub(crate) fn current_status(project: &Project) -> AppResult<ProjectStatus> {
    ProjectStatus::from_str(&project.status).ok_or_else(|| {
        AppError::InternalError(format!(
            "Project {} has unrecognized status '{}'",
            project.id, project.status
        ))
    })
}

/// Check the authenticated party against the project column the actor
/// kind is bound to.
pub(crate) fn ensure_project_actor(
    auth: &AuthParty,
    project: &Project,
    actor: RequiredActor,
) -> Result<(), AppError> {
    let allowed = match actor {
        RequiredActor::Owner => {
            auth.role == PartyKind::Individual && project.user_id == auth.id
        }
        RequiredActor::DesignOffice => {
            auth.role == PartyKind::Office && project.office_id == Some(auth.id)
        }
        RequiredActor::SupervisingOffice => {
            auth.role == PartyKind::Office && project.supervising_office_id == Some(auth.id)
        }
    };
    if allowed {
        return Ok(());
    }
    let message = match actor {
        RequiredActor::Owner => "You are not the owner of this project",
        RequiredActor::DesignOffice => "You are not the office assigned to this project",
        RequiredActor::SupervisingOffice => "You are not the supervising office for this project",
    };
    Err(AppError::Core(CoreError::Forbidden(message.to_string())))
}

/// Check read access: the owner and every assigned party can see a
/// project, nobody else.
pub(crate) fn ensure_project_visible(auth: &AuthParty, project: &Project) -> Result<(), AppError> {
    let visible = match auth.role {
        PartyKind::Individual => project.user_id == auth.id,
        PartyKind::Office => {
            project.office_id == Some(auth.id) || project.supervising_office_id == Some(auth.id)
        }
        PartyKind::Company => project.assigned_company_id == Some(auth.id),
    };
    if visible {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".to_string(),
        )))
    }
}

/// The conditional write matched zero rows: another request changed the
/// status between our read and our write.
pub(crate) fn lost_update() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Project status changed while the request was being processed, please retry".to_string(),
    ))
}

/// Adjust an office's active project counter, logging instead of
/// failing: the transition has already committed at this point.
pub(crate) async fn adjust_office_workload(state: &AppState, office_id: DbId, delta: i32) {
    if let Err(e) = OfficeRepo::adjust_active_projects(&state.pool, office_id, delta).await {
        tracing::warn!(
            error = %e,
            office_id,
            delta,
            "Failed to adjust office active project count"
        );
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
///
/// Projects scoped to the caller: owned projects for individuals,
/// design/supervision engagements for offices, assignments for
/// companies.
pub async fn list(auth: AuthParty, State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = match auth.role {
        PartyKind::Individual => ProjectRepo::list_for_user(&state.pool, auth.id).await?,
        PartyKind::Office => ProjectRepo::list_for_office(&state.pool, auth.id).await?,
        PartyKind::Company => ProjectRepo::list_for_company(&state.pool, auth.id).await?,
    };
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
///
/// Visible to the owner and every assigned party.
pub async fn get_by_id(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = fetch_project(&state, id).await?;
    ensure_project_visible(&auth, &project)?;
    Ok(Json(project))
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub office_id: Option<DbId>,
    pub project_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// POST /api/v1/projects
///
/// Submit a new project request to a design office. The project starts
/// in the initial workflow status and the office is notified.
pub async fn create(
    auth: AuthParty,
    State(state): State<AppState>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let user_id = auth.require_individual()?;

    let office_id = input.office_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Office ID and project type are required".to_string(),
        ))
    })?;
    let project_type = match input.project_type.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Office ID and project type are required".to_string(),
            )))
        }
    };

    OfficeRepo::find_by_id(&state.pool, office_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Office",
            id: office_id,
        }))?;

    // A request without a name is labeled by its type.
    let name = match input.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => project_type.clone(),
    };

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            name,
            description: input.description,
            project_type,
            user_id,
            office_id,
        },
    )
    .await?;

    state.notifier.enqueue(NewNotification::project_event(
        PartyRef::office(office_id),
        auth.as_party_ref(),
        events::NEW_PROJECT_REQUEST,
        format!(
            "User '{}' submitted a new project request: '{}'.",
            auth.name, project.name
        ),
        project.id,
    ));

    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/v1/projects/{id}
///
/// Owner edit of descriptive fields, only while the office is waiting
/// for details. Workflow columns are not reachable from here.
pub async fn update(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(fields): Json<UpdateProject>,
) -> AppResult<Json<Value>> {
    let project = fetch_project(&state, id).await?;
    ensure_project_actor(&auth, &project, RequiredActor::Owner)?;

    let status = current_status(&project)?;
    if status != ProjectStatus::OfficeApproved {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Project details cannot be updated in the current project status: '{status}'"
        ))));
    }
    if !has_update_fields(&fields) {
        return Err(AppError::Core(CoreError::Validation(
            "No updatable fields provided".to_string(),
        )));
    }

    let updated = ProjectRepo::update_descriptive(&state.pool, id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    Ok(Json(json!({
        "message": "Project updated successfully.",
        "project": updated,
    })))
}

fn has_update_fields(u: &UpdateProject) -> bool {
    u.name.is_some()
        || u.description.is_some()
        || u.budget.is_some()
        || u.location.is_some()
        || u.land_area.is_some()
        || u.plot_number.is_some()
        || u.basin_number.is_some()
        || u.land_location.is_some()
        || u.planner5d_url.is_some()
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = fetch_project(&state, id).await?;
    ensure_project_actor(&auth, &project, RequiredActor::Owner)?;

    if !ProjectRepo::delete(&state.pool, id, auth.id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Workflow transitions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub action: Option<String>,
    pub rejection_reason: Option<String>,
}

/// PUT /api/v1/projects/{id}/respond
///
/// The assigned office approves or rejects a pending request. Approval
/// also bumps the office's active project counter.
pub async fn respond(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RespondRequest>,
) -> AppResult<Json<Value>> {
    let action = match input.action.as_deref() {
        Some("approve") => WorkflowAction::ApproveRequest,
        Some("reject") => WorkflowAction::RejectRequest,
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

    let rejection_reason = match action {
        WorkflowAction::RejectRequest => input.rejection_reason.as_deref(),
        _ => None,
    };

    let updated = ProjectRepo::respond(
        &state.pool,
        id,
        current.as_str(),
        next.as_str(),
        rejection_reason,
    )
    .await?
    .ok_or_else(lost_update)?;

    let (message, notification) = match action {
        WorkflowAction::ApproveRequest => {
            adjust_office_workload(&state, auth.id, 1).await;
            (
                "Project request approved successfully.",
                NewNotification::project_event(
                    PartyRef::individual(updated.user_id),
                    auth.as_party_ref(),
                    events::PROJECT_APPROVED_BY_OFFICE,
                    format!(
                        "Office '{}' has approved your project request for '{}'. \
                         You can now complete the project details.",
                        auth.name, updated.name
                    ),
                    updated.id,
                ),
            )
        }
        _ => {
            let mut text = format!(
                "Office '{}' has rejected your project request for '{}'.",
                auth.name, updated.name
            );
            if let Some(reason) = rejection_reason {
                text.push_str(&format!(" Reason: {reason}"));
            }
            (
                "Project request rejected successfully.",
                NewNotification::project_event(
                    PartyRef::individual(updated.user_id),
                    auth.as_party_ref(),
                    events::PROJECT_REJECTED_BY_OFFICE,
                    text,
                    updated.id,
                ),
            )
        }
    };
    state.notifier.enqueue(notification);

    Ok(Json(json!({ "message": message, "project": updated })))
}

#[derive(Debug, Deserialize)]
pub struct SubmitDetailsRequest {
    #[serde(flatten)]
    pub fields: UpdateProject,
    pub supervision_weeks_target: Option<i32>,
}

/// PUT /api/v1/projects/{id}/submit-final-details
///
/// The owner completes the project details after office approval. The
/// signed agreement must already be on file; submission stamps the
/// start date and hands the project back to the office for review.
pub async fn submit_final_details(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitDetailsRequest>,
) -> AppResult<Json<Value>> {
    let action = WorkflowAction::SubmitFinalDetails;
    let project = fetch_project(&state, id).await?;
    ensure_project_actor(&auth, &project, required_actor(action))?;

    let current = current_status(&project)?;
    check_source(action, current)?;

    if project.agreement_file.as_deref().map_or(true, str::is_empty) {
        return Err(AppError::Core(CoreError::Validation(
            "Agreement file has not been uploaded for this project yet.".to_string(),
        )));
    }
    if let Some(weeks) = input.supervision_weeks_target {
        if weeks < 1 {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Supervision weeks target must be at least 1 (got {weeks})"
            ))));
        }
    }

    let next = next_status(action, current);
    let updated = ProjectRepo::submit_details(
        &state.pool,
        id,
        current.as_str(),
        next.as_str(),
        &input.fields,
        input.supervision_weeks_target,
    )
    .await?
    .ok_or_else(lost_update)?;

    if let Some(office_id) = updated.office_id {
        state.notifier.enqueue(NewNotification::project_event(
            PartyRef::office(office_id),
            auth.as_party_ref(),
            events::USER_SUBMITTED_PROJECT_DETAILS,
            format!(
                "User '{}' has submitted the full details for project: '{}'. \
                 Please review and propose payment.",
                auth.name, updated.name
            ),
            updated.id,
        ));
    }

    Ok(Json(json!({
        "message": "Project details submitted successfully. Awaiting office review.",
        "project": updated,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ProposePaymentRequest {
    pub payment_amount: Option<f64>,
    pub payment_notes: Option<String>,
}

/// PUT /api/v1/projects/{id}/propose-payment
///
/// The office quotes a price. Repeatable until the user pays; each
/// proposal overwrites the previous amount and notes.
pub async fn propose_payment(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ProposePaymentRequest>,
) -> AppResult<Json<Value>> {
    let action = WorkflowAction::ProposePayment;
    let project = fetch_project(&state, id).await?;
    ensure_project_actor(&auth, &project, required_actor(action))?;

    let current = current_status(&project)?;
    check_source(action, current)?;

    let amount = input.payment_amount.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "A valid positive payment_amount is required".to_string(),
        ))
    })?;
    validate_amount(amount)?;

    let next = next_status(action, current);
    let updated = ProjectRepo::propose_payment(
        &state.pool,
        id,
        current.as_str(),
        next.as_str(),
        amount,
        input.payment_notes.as_deref(),
        PAYMENT_STATUS_PENDING_USER_ACTION,
    )
    .await?
    .ok_or_else(lost_update)?;

    let mut text = format!(
        "Office '{}' has sent a payment proposal of {amount:.2} JOD for your project: '{}'.",
        auth.name, updated.name
    );
    if let Some(notes) = input.payment_notes.as_deref().filter(|n| !n.is_empty()) {
        text.push_str(&format!(" Notes: {notes}"));
    }
    state.notifier.enqueue(NewNotification::project_event(
        PartyRef::individual(updated.user_id),
        auth.as_party_ref(),
        events::OFFICE_PROPOSED_PAYMENT,
        text,
        updated.id,
    ));

    Ok(Json(json!({
        "message": "Payment proposal submitted successfully. User has been notified.",
        "project": updated,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub stage: Option<i32>,
}

/// PUT /api/v1/projects/{id}/progress
///
/// The office moves an in-progress project through its stages. The
/// final stage completes the project and releases office capacity.
pub async fn update_progress(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ProgressRequest>,
) -> AppResult<Json<Value>> {
    let action = WorkflowAction::AdvanceProgress;
    let project = fetch_project(&state, id).await?;
    ensure_project_actor(&auth, &project, required_actor(action))?;

    let current = current_status(&project)?;
    check_source(action, current)?;

    let stage = input.stage.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "A progress stage is required".to_string(),
        ))
    })?;
    validate_progress_stage(stage)?;

    let completed =
        (stage == COMPLETING_PROGRESS_STAGE).then(|| ProjectStatus::Completed.as_str());
    let updated = ProjectRepo::set_progress(&state.pool, id, current.as_str(), stage, completed)
        .await?
        .ok_or_else(lost_update)?;

    if completed.is_some() {
        adjust_office_workload(&state, auth.id, -1).await;
    }

    state.notifier.enqueue(NewNotification::project_event(
        PartyRef::individual(updated.user_id),
        auth.as_party_ref(),
        events::PROJECT_PROGRESS_UPDATED,
        format!(
            "Office '{}' has updated the progress for your project '{}' to stage {stage}.",
            auth.name, updated.name
        ),
        updated.id,
    ));

    Ok(Json(json!({
        "message": "Project progress updated successfully.",
        "project": updated,
    })))
}
