//! Repository for the `tryon_history` table.

use sqlx::PgPool;
use tryon_core::types::DbId;

use crate::models::status::TryOnStatus;
use crate::models::tryon_history::{CreateTryOnHistory, TryOnHistory};

/// Column list for `tryon_history` joined with `tryon_statuses` (aliases `h`, `s`).
const COLUMNS: &str = "h.id, h.user_id, h.garment_id, h.subject_image_url, h.subject_source, \
    h.preset_subject_id, h.garment_image_url, h.result_image_url, h.category, h.scene_id, \
    h.is_mock, s.name AS status, h.error_message, h.created_at, h.updated_at";

/// Provides create, query and delete operations for try-on history.
///
/// Every read and delete is scoped to the owning user.
pub struct TryOnHistoryRepo;

impl TryOnHistoryRepo {
    /// Insert a history row, returning it with the status name resolved.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTryOnHistory,
    ) -> Result<TryOnHistory, sqlx::Error> {
        let query = format!(
            "WITH h AS (
                INSERT INTO tryon_history
                    (user_id, garment_id, subject_image_url, subject_source,
                     preset_subject_id, garment_image_url, result_image_url,
                     category, scene_id, is_mock, status_id, error_message)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING *
             )
             SELECT {COLUMNS} FROM h JOIN tryon_statuses s ON s.id = h.status_id"
        );
        sqlx::query_as::<_, TryOnHistory>(&query)
            .bind(input.user_id)
            .bind(input.garment_id)
            .bind(&input.subject_image_url)
            .bind(input.subject_source.as_str())
            .bind(&input.preset_subject_id)
            .bind(&input.garment_image_url)
            .bind(&input.result_image_url)
            .bind(&input.category)
            .bind(&input.scene_id)
            .bind(input.is_mock)
            .bind(input.status.id())
            .bind(&input.error_message)
            .fetch_one(pool)
            .await
    }

    /// List a user's completed generations, newest first.
    pub async fn list_completed(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TryOnHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM tryon_history h JOIN tryon_statuses s ON s.id = h.status_id
             WHERE h.user_id = $1 AND h.status_id = $2
             ORDER BY h.created_at DESC, h.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, TryOnHistory>(&query)
            .bind(user_id)
            .bind(TryOnStatus::Completed.id())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a user's completed generations.
    pub async fn count_completed(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM tryon_history WHERE user_id = $1 AND status_id = $2",
        )
        .bind(user_id)
        .bind(TryOnStatus::Completed.id())
        .fetch_one(pool)
        .await
    }

    /// Find a single record owned by `user_id`, in any status.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<TryOnHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM tryon_history h JOIN tryon_statuses s ON s.id = h.status_id
             WHERE h.id = $1 AND h.user_id = $2"
        );
        sqlx::query_as::<_, TryOnHistory>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a record owned by `user_id`.
    /// Returns `true` if a row was removed.
    pub async fn delete_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tryon_history WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
