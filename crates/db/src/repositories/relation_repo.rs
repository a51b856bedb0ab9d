//! Repository for the `partner_relations` table.

use sqlx::PgPool;

use dossier_core::types::DbId;

use crate::models::relation::{CreateRelation, PartnerRelation};

/// Column list for `partner_relations` queries.
const COLUMNS: &str = "id, customer_id, company_id, code, created_at, updated_at";

/// Provides CRUD operations for customer-to-company relations.
pub struct RelationRepo;

impl RelationRepo {
    /// Create a relation. The caller validates the company side first.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRelation,
    ) -> Result<PartnerRelation, sqlx::Error> {
        let query = format!(
            "INSERT INTO partner_relations (customer_id, company_id, code) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PartnerRelation>(&query)
            .bind(input.customer_id)
            .bind(input.company_id)
            .bind(&input.code)
            .fetch_one(pool)
            .await
    }

    /// List all relations, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PartnerRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM partner_relations ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PartnerRelation>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the relations attached to a customer partner.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<PartnerRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM partner_relations \
             WHERE customer_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PartnerRelation>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a relation by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM partner_relations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
