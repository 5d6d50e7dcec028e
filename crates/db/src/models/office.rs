//! Design/supervision office entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meemar_core::types::{DbId, Timestamp};

/// Full office row from the `offices` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`OfficeResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct Office {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub location: String,
    pub capacity: Option<i32>,
    pub rating: Option<f64>,
    pub is_available: bool,
    pub points: i32,
    pub bank_account: Option<String>,
    pub staff_count: Option<i32>,
    pub active_projects_count: i32,
    pub branches: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
}

/// External-facing office representation (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct OfficeResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: String,
    pub capacity: Option<i32>,
    pub rating: Option<f64>,
    pub is_available: bool,
    pub points: i32,
    pub staff_count: Option<i32>,
    pub active_projects_count: i32,
    pub branches: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
}

impl From<Office> for OfficeResponse {
    fn from(o: Office) -> Self {
        Self {
            id: o.id,
            name: o.name,
            email: o.email,
            phone: o.phone,
            location: o.location,
            capacity: o.capacity,
            rating: o.rating,
            is_available: o.is_available,
            points: o.points,
            staff_count: o.staff_count,
            active_projects_count: o.active_projects_count,
            branches: o.branches,
            profile_image: o.profile_image,
            created_at: o.created_at,
        }
    }
}

/// DTO for registering a new office. `password_hash` is already hashed.
#[derive(Debug, Deserialize)]
pub struct CreateOffice {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub location: String,
    pub capacity: Option<i32>,
    pub bank_account: Option<String>,
    pub staff_count: Option<i32>,
    pub branches: Option<String>,
}

/// DTO for updating an office profile. All fields are optional.
///
/// `rating`, `points` and `active_projects_count` are deliberately
/// absent: those are maintained by the system, not the profile owner.
#[derive(Debug, Deserialize)]
pub struct UpdateOffice {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub is_available: Option<bool>,
    pub bank_account: Option<String>,
    pub staff_count: Option<i32>,
    pub branches: Option<String>,
    pub profile_image: Option<String>,
}
