//! Handlers for project document slots.
//!
//! Each slot is a named upload target backed by one column on the
//! project row. The owner uploads the signed agreement and the land
//! license; the design office uploads the drawing sets. Uploading into
//! the final 2D slot is itself a workflow transition: it delivers the
//! design and completes the project.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde_json::{json, Map, Value};

use meemar_core::document::{validate_slot, validate_upload, DocumentSlot};
use meemar_core::error::CoreError;
use meemar_core::notification as events;
use meemar_core::party::PartyRef;
use meemar_core::types::DbId;
use meemar_core::workflow::{check_source, next_status, WorkflowAction};
use meemar_db::models::notification::NewNotification;
use meemar_db::models::project::Project;
use meemar_db::repositories::ProjectRepo;

use super::project::{
    adjust_office_workload, current_status, ensure_project_actor, ensure_project_visible,
    fetch_project, lost_update,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthParty;
use crate::state::AppState;
use crate::storage;

/// GET /api/v1/projects/{id}/documents
///
/// Map of every slot to its stored path (or null), plus the latest
/// supervision report.
pub async fn list(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let project = fetch_project(&state, id).await?;
    ensure_project_visible(&auth, &project)?;

    let mut documents = Map::new();
    for name in DocumentSlot::ALL {
        if let Some(slot) = DocumentSlot::from_str(name) {
            documents.insert((*name).to_string(), json!(slot_value(&project, slot)));
        }
    }
    documents.insert(
        "report".to_string(),
        json!(project.supervision_report_file),
    );
    Ok(Json(Value::Object(documents)))
}

/// POST /api/v1/projects/{id}/documents/{slot}
///
/// Multipart upload into a document slot. The `file` field is
/// required; the slot decides who may upload and which extensions and
/// sizes are accepted.
pub async fn upload(
    auth: AuthParty,
    State(state): State<AppState>,
    Path((id, slot_name)): Path<(DbId, String)>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let slot = validate_slot(&slot_name)?;
    let project = fetch_project(&state, id).await?;
    ensure_project_actor(&auth, &project, slot.required_actor())?;

    // For the delivering slot the status gate runs before the upload is
    // read, so an out-of-order request fails without touching disk.
    let current = current_status(&project)?;
    if slot == DocumentSlot::FinalTwoD {
        check_source(WorkflowAction::UploadFinalDeliverable, current)?;
    }

    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart data: {e}")))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {e}")))?;
                file = Some((filename, bytes.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }
    let (filename, data) = file.ok_or_else(|| {
        AppError::BadRequest("Missing required 'file' field".to_string())
    })?;

    validate_upload(slot, &filename, data.len())?;

    let file_path =
        storage::store_document(&state.config.upload_dir, id, slot.as_str(), &filename, &data)
            .await?;

    let updated = if slot == DocumentSlot::FinalTwoD {
        let next = next_status(WorkflowAction::UploadFinalDeliverable, current);
        let updated = ProjectRepo::complete_with_deliverable(
            &state.pool,
            id,
            current.as_str(),
            next.as_str(),
            &file_path,
        )
        .await?
        .ok_or_else(lost_update)?;

        adjust_office_workload(&state, auth.id, -1).await;
        state.notifier.enqueue(NewNotification::project_event(
            PartyRef::individual(updated.user_id),
            auth.as_party_ref(),
            events::OFFICE_UPLOADED_FINAL_2D,
            format!(
                "Office '{}' has uploaded the final 2D drawings for project '{}'.",
                auth.name, updated.name
            ),
            updated.id,
        ));
        updated
    } else {
        ProjectRepo::attach_document(&state.pool, id, slot.column(), &file_path)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            }))?
    };

    Ok(Json(json!({
        "message": format!("{} uploaded successfully.", slot_label(slot)),
        "file_path": file_path,
        "project": updated,
    })))
}

/// Stored path for a slot on a loaded project row.
fn slot_value(project: &Project, slot: DocumentSlot) -> Option<&str> {
    let field = match slot {
        DocumentSlot::Agreement => &project.agreement_file,
        DocumentSlot::License => &project.license_file,
        DocumentSlot::FinalTwoD => &project.document_2d,
        DocumentSlot::ThreeD => &project.document_3d,
        DocumentSlot::Architectural => &project.architectural_file,
        DocumentSlot::Structural => &project.structural_file,
        DocumentSlot::Electrical => &project.electrical_file,
        DocumentSlot::Mechanical => &project.mechanical_file,
    };
    field.as_deref()
}

/// Display name used in upload confirmation messages.
fn slot_label(slot: DocumentSlot) -> &'static str {
    match slot {
        DocumentSlot::Agreement => "Agreement file",
        DocumentSlot::License => "License file",
        DocumentSlot::FinalTwoD => "Final 2D document",
        DocumentSlot::ThreeD => "3D document",
        DocumentSlot::Architectural => "Architectural document",
        DocumentSlot::Structural => "Structural document",
        DocumentSlot::Electrical => "Electrical document",
        DocumentSlot::Mechanical => "Mechanical document",
    }
}
