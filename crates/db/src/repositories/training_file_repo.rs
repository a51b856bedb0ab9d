//! Repository for the `training_files` table.
//!
//! Hosts the listing pipeline's SQL side: a dynamically assembled WHERE
//! clause combining the caller's base scope, an optional id bucket from the
//! last-message filters, the creation-date range, and the free-text search
//! disjunction. `count` and `list` share one filter builder so the pager
//! total and the fetched page can never disagree.

use sqlx::{FromRow, PgPool};

use dossier_core::listing::{SearchScope, SortKey};
use dossier_core::types::{DbId, Timestamp};

use crate::models::training_file::{CreateTrainingFile, TrainingFile};

/// Column list for `training_files` queries. Excludes `access_token`.
const COLUMNS: &str = "id, name, description, partner_id, created_at, updated_at";

/// Fully resolved filter inputs for one listing request.
///
/// Assembled by the handler from the parsed option enums; no raw user
/// strings reach this struct except the search text, which is only ever
/// bound as a parameter.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Base scope: restrict to files belonging to this partner.
    /// `None` means no ownership restriction (internal tooling, tests).
    pub partner_scope: Option<DbId>,
    /// Intersect with this id set (the last-message filter bucket).
    pub id_bucket: Option<Vec<DbId>>,
    /// `created_at > begin AND created_at <= end`. Only set when the caller
    /// had both bounds.
    pub created_range: Option<(Timestamp, Timestamp)>,
    /// Free-text search and the scope it applies to.
    pub search: Option<(String, SearchScope)>,
}

/// Row shape for the access-resolution path: the entity plus its token.
#[derive(Debug, FromRow)]
struct FileAccessRow {
    #[sqlx(flatten)]
    file: TrainingFile,
    access_token: Option<String>,
}

/// Provides query operations for training files.
pub struct TrainingFileRepo;

impl TrainingFileRepo {
    /// Create a training file, generating a fresh opaque access token.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTrainingFile,
    ) -> Result<TrainingFile, sqlx::Error> {
        let token = uuid::Uuid::new_v4().to_string();
        let query = format!(
            "INSERT INTO training_files (name, description, partner_id, access_token) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingFile>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.partner_id)
            .bind(token)
            .fetch_one(pool)
            .await
    }

    /// Find a training file by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrainingFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_files WHERE id = $1");
        sqlx::query_as::<_, TrainingFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a training file together with its access token.
    ///
    /// Only the detail-route access resolution may call this; the token
    /// never leaves the handler.
    pub async fn find_with_access_token(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<(TrainingFile, Option<String>)>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS}, access_token FROM training_files WHERE id = $1");
        let row = sqlx::query_as::<_, FileAccessRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| (r.file, r.access_token)))
    }

    /// Count training files matching the given filter (for the pager total).
    pub async fn count(pool: &PgPool, params: &ListQuery) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_list_filter(params);
        let query = format!("SELECT COUNT(*)::BIGINT FROM training_files {where_clause}");
        let q = bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Fetch one page of training files matching the filter, ordered per the
    /// resolved sort key.
    ///
    /// An out-of-range offset simply yields an empty vec.
    pub async fn list(
        pool: &PgPool,
        params: &ListQuery,
        sort: SortKey,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TrainingFile>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_list_filter(params);
        let query = format!(
            "SELECT {COLUMNS} FROM training_files {where_clause} \
             ORDER BY {order} \
             LIMIT ${bind_idx} OFFSET ${next}",
            order = sort.order_clause(),
            next = bind_idx + 1,
        );
        let q = bind_values_as(sqlx::query_as::<_, TrainingFile>(&query), &bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Fetch `(id, partner_id)` for every training file.
    ///
    /// Feeds the last-message classification, which scans globally and is
    /// intersected with the scoped filter afterwards.
    pub async fn file_partner_pairs(
        pool: &PgPool,
    ) -> Result<Vec<(DbId, Option<DbId>)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, Option<DbId>)>(
            "SELECT id, partner_id FROM training_files ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }
}

// ---------------------------------------------------------------------------
// Filter assembly
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built listing queries.
enum BindValue {
    BigInt(DbId),
    Text(String),
    Timestamp(Timestamp),
    IdList(Vec<DbId>),
}

/// Build a WHERE clause and bind values from the listing filter inputs.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The
/// `where_clause` is empty if no filters are active, or starts with `WHERE `.
fn build_list_filter(params: &ListQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(partner_id) = params.partner_scope {
        conditions.push(format!("partner_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(partner_id));
    }

    if let Some(ref bucket) = params.id_bucket {
        conditions.push(format!("id = ANY(${bind_idx})"));
        bind_idx += 1;
        bind_values.push(BindValue::IdList(bucket.clone()));
    }

    if let Some((begin, end)) = params.created_range {
        conditions.push(format!("created_at > ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(begin));
        conditions.push(format!("created_at <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(end));
    }

    if let Some((ref text, scope)) = params.search {
        if !text.trim().is_empty() {
            let pattern = format!("%{}%", text.trim());
            let mut branches: Vec<String> = Vec::new();

            if scope.includes(SearchScope::Id) {
                branches.push(format!("CAST(id AS TEXT) ILIKE ${bind_idx}"));
                bind_idx += 1;
                bind_values.push(BindValue::Text(pattern.clone()));
            }
            if scope.includes(SearchScope::Content) {
                branches.push(format!(
                    "(name ILIKE ${bind_idx} OR description ILIKE ${next})",
                    next = bind_idx + 1
                ));
                bind_idx += 2;
                bind_values.push(BindValue::Text(pattern.clone()));
                bind_values.push(BindValue::Text(pattern.clone()));
            }
            if scope.includes(SearchScope::Customer) {
                branches.push(format!(
                    "EXISTS (SELECT 1 FROM partners p \
                     WHERE p.id = training_files.partner_id AND p.name ILIKE ${bind_idx})"
                ));
                bind_idx += 1;
                bind_values.push(BindValue::Text(pattern.clone()));
            }
            if scope.includes(SearchScope::Message) {
                branches.push(format!(
                    "EXISTS (SELECT 1 FROM messages m \
                     WHERE m.file_id = training_files.id \
                       AND m.kind = 'comment' AND m.body ILIKE ${bind_idx})"
                ));
                bind_idx += 1;
                bind_values.push(BindValue::Text(pattern));
            }

            conditions.push(format!("({})", branches.join(" OR ")));
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_values_as<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
            BindValue::IdList(v) => q = q.bind(v.as_slice()),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
            BindValue::IdList(v) => q = q.bind(v.as_slice()),
        }
    }
    q
}
