//! Notification entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meemar_core::party::{PartyKind, PartyRef, TargetKind};
use meemar_core::types::{DbId, Timestamp};

/// Stored notification row. The `*_type` columns hold the canonical
/// lowercase kind tags.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub recipient_id: DbId,
    pub recipient_type: String,
    pub actor_id: Option<DbId>,
    pub actor_type: Option<String>,
    pub notification_type: String,
    pub message: String,
    pub target_entity_id: Option<DbId>,
    pub target_entity_type: Option<String>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A notification to be delivered. Used both as the request body of the
/// manual create endpoint and as the message type fed to the background
/// delivery worker, so the kind tags are typed and validated by serde.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNotification {
    pub recipient_id: DbId,
    pub recipient_type: PartyKind,
    pub actor_id: Option<DbId>,
    pub actor_type: Option<PartyKind>,
    pub notification_type: String,
    pub message: String,
    pub target_entity_id: Option<DbId>,
    pub target_entity_type: Option<TargetKind>,
}

impl NewNotification {
    /// Notification about a project event, addressed to one party.
    /// Every workflow transition emits exactly one of these.
    pub fn project_event(
        recipient: PartyRef,
        actor: PartyRef,
        notification_type: &str,
        message: String,
        project_id: DbId,
    ) -> Self {
        Self {
            recipient_id: recipient.id,
            recipient_type: recipient.kind,
            actor_id: Some(actor.id),
            actor_type: Some(actor.kind),
            notification_type: notification_type.to_string(),
            message,
            target_entity_id: Some(project_id),
            target_entity_type: Some(TargetKind::Project),
        }
    }
}
