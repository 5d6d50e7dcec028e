//! Repository for the `companies` table.

use sqlx::PgPool;

use meemar_core::types::DbId;

use crate::models::company::{Company, CreateCompany, UpdateCompany};

/// Column list for `companies` queries.
const COLUMNS: &str = "id, name, email, password_hash, phone, description, \
                       company_type, location, rating, bank_account, staff_count, \
                       profile_image, created_at";

/// Provides CRUD operations for construction companies.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Insert a new company, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCompany) -> Result<Company, sqlx::Error> {
        let query = format!(
            "INSERT INTO companies \
                 (name, email, password_hash, phone, description, company_type, \
                  location, bank_account, staff_count)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .bind(&input.description)
            .bind(&input.company_type)
            .bind(&input.location)
            .bind(&input.bank_account)
            .bind(input.staff_count)
            .fetch_one(pool)
            .await
    }

    /// Find a company by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a company by email (case-sensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE email = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all companies ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies ORDER BY created_at DESC");
        sqlx::query_as::<_, Company>(&query).fetch_all(pool).await
    }

    /// Top-rated companies for the discovery carousel. Unrated companies
    /// sort last.
    pub async fn suggestions(pool: &PgPool, limit: i64) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM companies \
             ORDER BY rating DESC NULLS LAST, created_at DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over name, email and location.
    pub async fn search(pool: &PgPool, q: &str) -> Result<Vec<Company>, sqlx::Error> {
        let pattern = super::ilike_pattern(q);
        let query = format!(
            "SELECT {COLUMNS} FROM companies \
             WHERE name ILIKE $1 OR email ILIKE $1 OR location ILIKE $1 \
             ORDER BY name"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(&pattern)
            .fetch_all(pool)
            .await
    }

    /// Update a company profile. Only non-`None` fields in `input` are
    /// applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCompany,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                description = COALESCE($5, description),
                company_type = COALESCE($6, company_type),
                location = COALESCE($7, location),
                bank_account = COALESCE($8, bank_account),
                staff_count = COALESCE($9, staff_count),
                profile_image = COALESCE($10, profile_image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.description)
            .bind(&input.company_type)
            .bind(&input.location)
            .bind(&input.bank_account)
            .bind(input.staff_count)
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
        sqlx::query("UPDATE companies SET rating = $2 WHERE id = $1")
            .bind(id)
            .bind(rating)
            .execute(pool)
            .await?;
        Ok(())
    }
}
