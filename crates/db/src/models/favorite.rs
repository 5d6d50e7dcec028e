//! User favorite (bookmark) model.

use serde::Serialize;
use sqlx::FromRow;

use meemar_core::types::{DbId, Timestamp};

/// A bookmark owned by a user. `item_type` holds one of the canonical
/// favorite kind tags (office, company, project).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserFavorite {
    pub id: DbId,
    pub user_id: DbId,
    pub item_id: DbId,
    pub item_type: String,
    pub created_at: Timestamp,
}
