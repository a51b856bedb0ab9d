//! Repository for the `messages` table.

use sqlx::PgPool;

use dossier_core::types::DbId;

use crate::models::message::{CreateMessage, Message, KIND_COMMENT};

/// Column list for `messages` queries.
const COLUMNS: &str = "id, file_id, author_id, body, kind, posted_at, created_at";

/// Provides query operations for messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Post a message on a training file.
    ///
    /// The kind defaults to `comment` when the DTO leaves it unset.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let kind = input.kind.as_deref().unwrap_or(KIND_COMMENT);
        let query = format!(
            "INSERT INTO messages (file_id, author_id, body, kind, posted_at) \
             VALUES ($1, $2, $3, $4, COALESCE($5, NOW())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.file_id)
            .bind(input.author_id)
            .bind(&input.body)
            .bind(kind)
            .bind(input.posted_at)
            .fetch_one(pool)
            .await
    }

    /// List the comment messages posted on a training file, newest first.
    pub async fn list_comments_for_file(
        pool: &PgPool,
        file_id: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages \
             WHERE file_id = $1 AND kind = 'comment' \
             ORDER BY posted_at DESC, id ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(file_id)
            .fetch_all(pool)
            .await
    }

    /// Scan every comment message as `(file_id, author_id)` pairs, newest
    /// first.
    ///
    /// The secondary `id ASC` ordering pins the winner when two comments on
    /// the same file share a timestamp, so the classification downstream is
    /// stable on insertion order.
    pub async fn last_comment_authors(pool: &PgPool) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT file_id, author_id FROM messages \
             WHERE kind = 'comment' \
             ORDER BY posted_at DESC, id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
