//! Customer-to-company relation model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dossier_core::types::{DbId, Timestamp};

/// A row from the `partner_relations` table.
///
/// Maps a customer partner to an internal company partner via a free-text
/// code. The company side must reference a partner that is both a company
/// and flagged internal; creation enforces this.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PartnerRelation {
    pub id: DbId,
    pub customer_id: DbId,
    pub company_id: DbId,
    pub code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new relation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRelation {
    pub customer_id: DbId,
    pub company_id: DbId,
    pub code: Option<String>,
}
