//! Message entity model and DTOs.
//!
//! Messages are posted on a training file by a partner. Only the
//! `comment` kind participates in the listing's last-message filters and
//! message search; `note` exists for internal follow-ups.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dossier_core::types::{DbId, Timestamp};

/// Message kind for customer-visible discussion comments.
pub const KIND_COMMENT: &str = "comment";

/// Message kind for internal notes.
pub const KIND_NOTE: &str = "note";

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub file_id: DbId,
    pub author_id: DbId,
    pub body: String,
    pub kind: String,
    pub posted_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for posting a new message on a training file.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessage {
    pub file_id: DbId,
    pub author_id: DbId,
    pub body: String,
    /// Defaults to [`KIND_COMMENT`] when absent.
    pub kind: Option<String>,
    /// Defaults to the insertion time when absent.
    pub posted_at: Option<Timestamp>,
}
