//! Repository for the `user_recent_files` table.
//!
//! Holds the bounded recent-history list the listing writes after every
//! render. The list is fully overwritten each time; a separate
//! previous/next navigation feature reads it back.

use sqlx::PgPool;

use dossier_core::types::DbId;

/// Provides overwrite-and-read access to a user's recent-history list.
pub struct RecentFileRepo;

impl RecentFileRepo {
    /// Replace the user's recent-history list with the given ids, in order.
    ///
    /// The caller caps the slice (see
    /// `dossier_core::listing::RECENT_HISTORY_CAP`); this method stores
    /// whatever it is handed. Delete-then-insert runs in one transaction so
    /// a concurrent reader never observes a half-written list.
    pub async fn replace(
        pool: &PgPool,
        user_id: DbId,
        file_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM user_recent_files WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if !file_ids.is_empty() {
            // Multi-row INSERT: (user_id, position, file_id) per entry.
            let mut query =
                String::from("INSERT INTO user_recent_files (user_id, position, file_id) VALUES ");
            let mut param_idx = 1u32;
            for i in 0..file_ids.len() {
                if i > 0 {
                    query.push_str(", ");
                }
                query.push_str(&format!(
                    "(${}, ${}, ${})",
                    param_idx,
                    param_idx + 1,
                    param_idx + 2
                ));
                param_idx += 3;
            }

            let mut q = sqlx::query(&query);
            for (position, file_id) in file_ids.iter().enumerate() {
                q = q.bind(user_id).bind(position as i16).bind(*file_id);
            }
            q.execute(&mut *tx).await?;
        }

        tx.commit().await
    }

    /// Read back the user's recent-history ids in stored order.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT file_id FROM user_recent_files \
             WHERE user_id = $1 \
             ORDER BY position ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
