//! Partner entity model and DTOs.
//!
//! A partner is either a customer contact or an internal company. The
//! `is_company` + `is_internal` pair marks the partners eligible to be the
//! company side of a customer relation.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dossier_core::types::{DbId, Timestamp};

/// A row from the `partners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Partner {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub is_company: bool,
    pub is_internal: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new partner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePartner {
    pub name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub is_company: bool,
    #[serde(default)]
    pub is_internal: bool,
}
