//! Review entity model and DTOs.
//!
//! Each review targets exactly one of company/project/office; the
//! single-target rule is enforced both here (create validation in the
//! handler) and by a table check constraint.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meemar_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub company_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub office_id: Option<DbId>,
    pub rating: i32,
    pub comment: Option<String>,
    pub reviewed_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a review. Exactly one of the three target ids must
/// be present.
#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub rating: i32,
    pub comment: Option<String>,
    pub company_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub office_id: Option<DbId>,
}

impl CreateReview {
    /// Number of target ids set. Valid input has exactly one.
    pub fn target_count(&self) -> usize {
        [
            self.company_id.is_some(),
            self.project_id.is_some(),
            self.office_id.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// DTO for updating an existing review. The target cannot be moved.
#[derive(Debug, Deserialize)]
pub struct UpdateReview {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}
