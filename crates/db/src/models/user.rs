//! Individual user entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meemar_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] (own profile) or [`PublicUser`]
/// (other people's profiles) for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub id_number: Option<String>,
    pub bank_account: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
}

/// Own-profile representation (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub id_number: Option<String>,
    pub bank_account: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            id_number: u.id_number,
            bank_account: u.bank_account,
            location: u.location,
            profile_image: u.profile_image,
            created_at: u.created_at,
        }
    }
}

/// Public profile: additionally hides bank account and national id.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            location: u.location,
            profile_image: u.profile_image,
            created_at: u.created_at,
        }
    }
}

/// DTO for creating a new user. `password_hash` is already hashed.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub id_number: Option<String>,
    pub bank_account: Option<String>,
    pub location: Option<String>,
}

/// DTO for updating a user profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub id_number: Option<String>,
    pub bank_account: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
}
