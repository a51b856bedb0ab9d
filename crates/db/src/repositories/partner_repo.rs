//! Repository for the `partners` table.

use sqlx::PgPool;

use dossier_core::types::DbId;

use crate::models::partner::{CreatePartner, Partner};

/// Column list for `partners` queries.
const COLUMNS: &str = "id, name, email, is_company, is_internal, created_at, updated_at";

/// Provides CRUD operations for partners.
pub struct PartnerRepo;

impl PartnerRepo {
    /// Create a partner.
    pub async fn create(pool: &PgPool, input: &CreatePartner) -> Result<Partner, sqlx::Error> {
        let query = format!(
            "INSERT INTO partners (name, email, is_company, is_internal) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.is_company)
            .bind(input.is_internal)
            .fetch_one(pool)
            .await
    }

    /// Find a partner by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Partner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partners WHERE id = $1");
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a partner by id only if it is an internal company.
    ///
    /// Backs the relation invariant: the company side of a relation must be
    /// a company-type partner flagged internal.
    pub async fn find_internal_company(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Partner>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM partners \
             WHERE id = $1 AND is_company = true AND is_internal = true"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
