//! Repository for the `user_favorites` table.
//!
//! Adding the same item twice violates `uq_user_favorites_item`; the
//! unique-violation error is left to the API layer to classify as a
//! conflict.

use sqlx::PgPool;

use meemar_core::types::DbId;

use crate::models::favorite::UserFavorite;

/// Column list for `user_favorites` queries.
const COLUMNS: &str = "id, user_id, item_id, item_type, created_at";

/// Provides bookmark operations for individual users.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert a favorite, returning the created row.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        item_id: DbId,
        item_type: &str,
    ) -> Result<UserFavorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_favorites (user_id, item_id, item_type)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserFavorite>(&query)
            .bind(user_id)
            .bind(item_id)
            .bind(item_type)
            .fetch_one(pool)
            .await
    }

    /// Remove a favorite. Returns `true` if a row was deleted.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        item_id: DbId,
        item_type: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_favorites \
             WHERE user_id = $1 AND item_id = $2 AND item_type = $3",
        )
        .bind(user_id)
        .bind(item_id)
        .bind(item_type)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a user's favorites, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserFavorite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_favorites \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, UserFavorite>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
