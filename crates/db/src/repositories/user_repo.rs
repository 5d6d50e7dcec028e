//! Repository for the `users` table.

use sqlx::PgPool;

use meemar_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, name, email, password_hash, phone, id_number, \
                       bank_account, location, profile_image, created_at";

/// Provides CRUD operations for individual user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, phone, id_number, bank_account, location)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .bind(&input.id_number)
            .bind(&input.bank_account)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive substring search over name, email and location.
    pub async fn search(pool: &PgPool, q: &str) -> Result<Vec<User>, sqlx::Error> {
        let pattern = super::ilike_pattern(q);
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE name ILIKE $1 OR email ILIKE $1 OR location ILIKE $1 \
             ORDER BY name"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&pattern)
            .fetch_all(pool)
            .await
    }

    /// Update a user profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                id_number = COALESCE($5, id_number),
                bank_account = COALESCE($6, bank_account),
                location = COALESCE($7, location),
                profile_image = COALESCE($8, profile_image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.id_number)
            .bind(&input.bank_account)
            .bind(&input.location)
            .bind(&input.profile_image)
            .fetch_optional(pool)
            .await
    }
}
