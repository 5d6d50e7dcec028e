//! Repository for the `notifications` table.
//!
//! Recipients are (id, kind) pairs, so every query carries both columns.

use sqlx::PgPool;

use meemar_core::types::DbId;

use crate::models::notification::{NewNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, recipient_id, recipient_type, actor_id, actor_type, \
                       notification_type, message, target_entity_id, target_entity_type, \
                       is_read, read_at, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification, returning the stored row.
    pub async fn create(pool: &PgPool, input: &NewNotification) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications \
                 (recipient_id, recipient_type, actor_id, actor_type, \
                  notification_type, message, target_entity_id, target_entity_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.recipient_id)
            .bind(input.recipient_type.as_str())
            .bind(input.actor_id)
            .bind(input.actor_type.map(|k| k.as_str()))
            .bind(&input.notification_type)
            .bind(&input.message)
            .bind(input.target_entity_id)
            .bind(input.target_entity_type.map(|k| k.as_str()))
            .fetch_one(pool)
            .await
    }

    /// List a recipient's notifications, newest first.
    pub async fn list_for_recipient(
        pool: &PgPool,
        recipient_id: DbId,
        recipient_type: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE recipient_id = $1 AND recipient_type = $2 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(recipient_id)
            .bind(recipient_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of notifications for a recipient.
    pub async fn count_for_recipient(
        pool: &PgPool,
        recipient_id: DbId,
        recipient_type: &str,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient_id = $1 AND recipient_type = $2",
        )
        .bind(recipient_id)
        .bind(recipient_type)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Number of unread notifications for a recipient.
    pub async fn unread_count(
        pool: &PgPool,
        recipient_id: DbId,
        recipient_type: &str,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient_id = $1 AND recipient_type = $2 AND is_read = false",
        )
        .bind(recipient_id)
        .bind(recipient_type)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Mark a single notification as read. Re-marking an already-read
    /// notification is a no-op that keeps the original `read_at`.
    ///
    /// Returns `None` if the notification does not belong to the
    /// recipient.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
        recipient_id: DbId,
        recipient_type: &str,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "UPDATE notifications \
             SET is_read = true, read_at = COALESCE(read_at, NOW()) \
             WHERE id = $1 AND recipient_id = $2 AND recipient_type = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .bind(recipient_id)
            .bind(recipient_type)
            .fetch_optional(pool)
            .await
    }

    /// Mark all unread notifications as read for a recipient.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(
        pool: &PgPool,
        recipient_id: DbId,
        recipient_type: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE recipient_id = $1 AND recipient_type = $2 AND is_read = false",
        )
        .bind(recipient_id)
        .bind(recipient_type)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a notification belonging to the recipient. Returns `true`
    /// if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        recipient_id: DbId,
        recipient_type: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM notifications \
             WHERE id = $1 AND recipient_id = $2 AND recipient_type = $3",
        )
        .bind(id)
        .bind(recipient_id)
        .bind(recipient_type)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
