//! Handlers for the `/payments` resource.
//!
//! Checkout charges the proposed amount through the configured payment
//! gateway and, only after the charge succeeds, records the payment on
//! the project with a conditional status write. A gateway decline
//! surfaces as a dependency failure and leaves the project untouched.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use meemar_core::error::CoreError;
use meemar_core::notification as events;
use meemar_core::party::PartyRef;
use meemar_core::payment::PAYMENT_STATUS_PAID;
use meemar_core::types::DbId;
use meemar_core::workflow::{check_source, next_status, required_actor, WorkflowAction};
use meemar_db::models::notification::NewNotification;
use meemar_db::repositories::ProjectRepo;

use super::project::{current_status, ensure_project_actor, fetch_project, lost_update};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthParty;
use crate::state::AppState;

/// GET /api/v1/payments/client-token
///
/// Token the frontend payment widget initializes with.
pub async fn client_token(
    _auth: AuthParty,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let token = state.gateway.client_token().await?;
    Ok(Json(json!({ "client_token": token })))
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub project_id: Option<DbId>,
    pub amount: Option<f64>,
    pub payment_method_token: Option<String>,
}

/// POST /api/v1/payments/checkout
///
/// The owner pays the proposed amount for a project. The submitted
/// amount must match the proposal exactly; the charge runs first and
/// the project is only moved to `In Progress` once it succeeds.
pub async fn checkout(
    auth: AuthParty,
    State(state): State<AppState>,
    Json(input): Json<CheckoutRequest>,
) -> AppResult<Json<Value>> {
    let (project_id, amount, method_token) =
        match (input.project_id, input.amount, input.payment_method_token) {
            (Some(p), Some(a), Some(t)) if !t.is_empty() => (p, a, t),
            _ => {
                return Err(AppError::Core(CoreError::Validation(
                    "Missing payment method token, amount, or project ID".to_string(),
                )))
            }
        };

    let action = WorkflowAction::SubmitPayment;
    let project = fetch_project(&state, project_id).await?;
    ensure_project_actor(&auth, &project, required_actor(action))?;

    let current = current_status(&project)?;
    check_source(action, current)?;

    let proposed = project.proposed_payment_amount.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "No payment amount has been proposed for this project".to_string(),
        ))
    })?;
    if amount != proposed {
        return Err(AppError::Core(CoreError::Validation(
            "Payment amount does not match the proposed amount.".to_string(),
        )));
    }

    let receipt = state.gateway.charge(&method_token, amount).await?;

    let next = next_status(action, current);
    let updated = ProjectRepo::record_payment(
        &state.pool,
        project_id,
        current.as_str(),
        next.as_str(),
        PAYMENT_STATUS_PAID,
    )
    .await?
    .ok_or_else(|| {
        // The charge went through but the project moved concurrently.
        // Surface the conflict; the receipt is logged for reconciliation.
        tracing::warn!(
            project_id,
            transaction_id = %receipt.transaction_id,
            "Charge succeeded but the project status changed before the payment was recorded"
        );
        lost_update()
    })?;

    if let Some(office_id) = updated.office_id {
        state.notifier.enqueue(NewNotification::project_event(
            PartyRef::office(office_id),
            auth.as_party_ref(),
            events::PAYMENT_RECEIVED,
            format!(
                "User '{}' has paid {amount:.2} JOD for project: '{}'.",
                auth.name, updated.name
            ),
            updated.id,
        ));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Payment successful!",
        "transaction_id": receipt.transaction_id,
        "project": updated,
    })))
}
