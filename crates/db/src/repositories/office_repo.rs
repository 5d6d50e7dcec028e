//! Repository for the `offices` table.

use sqlx::PgPool;

use meemar_core::types::DbId;

use crate::models::office::{CreateOffice, Office, UpdateOffice};

/// Column list for `offices` queries.
const COLUMNS: &str = "id, name, email, password_hash, phone, location, capacity, \
                       rating, is_available, points, bank_account, staff_count, \
                       active_projects_count, branches, profile_image, created_at";

/// Provides CRUD operations for design/supervision offices.
pub struct OfficeRepo;

impl OfficeRepo {
    /// Insert a new office, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOffice) -> Result<Office, sqlx::Error> {
        let query = format!(
            "INSERT INTO offices \
                 (name, email, password_hash, phone, location, capacity, \
                  bank_account, staff_count, branches)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Office>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .bind(&input.location)
            .bind(input.capacity)
            .bind(&input.bank_account)
            .bind(input.staff_count)
            .bind(&input.branches)
            .fetch_one(pool)
            .await
    }

    /// Find an office by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Office>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offices WHERE id = $1");
        sqlx::query_as::<_, Office>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an office by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Office>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offices WHERE email = $1");
        sqlx::query_as::<_, Office>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all offices ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Office>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offices ORDER BY created_at DESC");
        sqlx::query_as::<_, Office>(&query).fetch_all(pool).await
    }

    /// Top-rated offices for the discovery carousel. Unrated offices sort
    /// last.
    pub async fn suggestions(pool: &PgPool, limit: i64) -> Result<Vec<Office>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM offices \
             ORDER BY rating DESC NULLS LAST, created_at DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, Office>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over name, email and location.
    pub async fn search(pool: &PgPool, q: &str) -> Result<Vec<Office>, sqlx::Error> {
        let pattern = super::ilike_pattern(q);
        let query = format!(
            "SELECT {COLUMNS} FROM offices \
             WHERE name ILIKE $1 OR email ILIKE $1 OR location ILIKE $1 \
             ORDER BY name"
        );
        sqlx::query_as::<_, Office>(&query)
            .bind(&pattern)
            .fetch_all(pool)
            .await
    }

    /// Update an office profile. Only non-`None` fields in `input` are
    /// applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOffice,
    ) -> Result<Option<Office>, sqlx::Error> {
        let query = format!(
            "UPDATE offices SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                location = COALESCE($5, location),
                capacity = COALESCE($6, capacity),
                is_available = COALESCE($7, is_available),
                bank_account = COALESCE($8, bank_account),
                staff_count = COALESCE($9, staff_count),
                branches = COALESCE($10, branches),
                profile_image = COALESCE($11, profile_image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Office>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.location)
            .bind(input.capacity)
            .bind(input.is_available)
            .bind(&input.bank_account)
            .bind(input.staff_count)
            .bind(&input.branches)
            .bind(&input.profile_image)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the derived rating. `None` clears it (no reviews left).
    pub async fn set_rating(
        pool: &PgPool,
        id: DbId,
        rating: Option<f64>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE offices SET rating = $2 WHERE id = $1")
            .bind(id)
            .bind(rating)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Adjust the active project counter, clamping at zero.
    pub async fn adjust_active_projects(
        pool: &PgPool,
        id: DbId,
        delta: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE offices \
             SET active_projects_count = GREATEST(active_projects_count + $2, 0) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(delta)
        .execute(pool)
        .await?;
        Ok(())
    }
}
