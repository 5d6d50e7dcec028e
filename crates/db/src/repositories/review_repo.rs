//! Repository for the `reviews` table.

use sqlx::PgPool;

use meemar_core::types::DbId;

use crate::models::review::{CreateReview, Review, UpdateReview};

/// Columns selected by review queries.
const COLUMNS: &str =
    "id, user_id, company_id, project_id, office_id, rating, comment, reviewed_at, created_at";

/// Provides CRUD operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (user_id, company_id, project_id, office_id, rating, comment)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .bind(input.company_id)
            .bind(input.project_id)
            .bind(input.office_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Find a review by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reviews written by a user, newest first.
    pub async fn list_for_author(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM reviews WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List reviews targeting an office, newest first.
    pub async fn list_for_office(
        pool: &PgPool,
        office_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM reviews WHERE office_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Review>(&query)
            .bind(office_id)
            .fetch_all(pool)
            .await
    }

    /// List reviews targeting a company, newest first.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE company_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// List reviews targeting a project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a review's rating and/or comment. Only non-`None` fields
    /// are applied; the target cannot be moved.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                rating = COALESCE($2, rating),
                comment = COALESCE($3, comment)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_optional(pool)
            .await
    }

    /// Delete a review by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All rating values currently targeting an office. Input to the
    /// derived-rating recompute.
    pub async fn office_ratings(pool: &PgPool, office_id: DbId) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT rating FROM reviews WHERE office_id = $1")
            .bind(office_id)
            .fetch_all(pool)
            .await
    }

    /// All rating values currently targeting a company.
    pub async fn company_ratings(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT rating FROM reviews WHERE company_id = $1")
            .bind(company_id)
            .fetch_all(pool)
            .await
    }
}
