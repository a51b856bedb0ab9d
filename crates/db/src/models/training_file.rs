//! Training-file entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dossier_core::types::{DbId, Timestamp};

/// A row from the `training_files` table.
///
/// The `access_token` column is deliberately absent here: it grants access
/// to the record and must never ride along in listing payloads. The
/// repository exposes it only to the access-resolution path.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingFile {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub partner_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new training file.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrainingFile {
    pub name: String,
    pub description: Option<String>,
    pub partner_id: Option<DbId>,
}

/// Raw query parameters for the portal listing endpoint.
///
/// Option keys arrive as untrusted strings; the handler parses them through
/// the closed enums in `dossier_core::listing`, which fall back to defaults
/// on unrecognized input.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListParams {
    /// 1-based page number. Defaults to 1.
    pub page: Option<i64>,
    /// Lower bound for the creation-date range (exclusive).
    pub date_begin: Option<Timestamp>,
    /// Upper bound for the creation-date range (inclusive).
    pub date_end: Option<Timestamp>,
    pub sortby: Option<String>,
    pub filterby: Option<String>,
    pub search: Option<String>,
    pub search_in: Option<String>,
    /// Accepted but currently inert; echoed back in the response.
    pub groupby: Option<String>,
}

/// Query parameters for the detail endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DetailParams {
    /// Opaque token granting access to this one record without a login.
    pub access_token: Option<String>,
}
