//! Construction company entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meemar_core::types::{DbId, Timestamp};

/// Full company row from the `companies` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`CompanyResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct Company {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub company_type: Option<String>,
    pub location: Option<String>,
    pub rating: Option<f64>,
    pub bank_account: Option<String>,
    pub staff_count: Option<i32>,
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
}

/// External-facing company representation (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct CompanyResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub company_type: Option<String>,
    pub location: Option<String>,
    pub rating: Option<f64>,
    pub staff_count: Option<i32>,
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
}

impl From<Company> for CompanyResponse {
    fn from(c: Company) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            description: c.description,
            company_type: c.company_type,
            location: c.location,
            rating: c.rating,
            staff_count: c.staff_count,
            profile_image: c.profile_image,
            created_at: c.created_at,
        }
    }
}

/// DTO for registering a new company. `password_hash` is already hashed.
#[derive(Debug, Deserialize)]
pub struct CreateCompany {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub company_type: Option<String>,
    pub location: Option<String>,
    pub bank_account: Option<String>,
    pub staff_count: Option<i32>,
}

/// DTO for updating a company profile. All fields are optional.
/// `rating` is maintained by the review system and cannot be set here.
#[derive(Debug, Deserialize)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub company_type: Option<String>,
    pub location: Option<String>,
    pub bank_account: Option<String>,
    pub staff_count: Option<i32>,
    pub profile_image: Option<String>,
}
