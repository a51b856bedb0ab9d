//! Handlers for the `/relations` resource.
//!
//! Relations map a customer partner to an internal company partner via a
//! free-text code. All endpoints require authentication.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use dossier_core::error::CoreError;
use dossier_core::types::DbId;
use dossier_db::models::relation::CreateRelation;
use dossier_db::repositories::{PartnerRepo, RelationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/relations
///
/// List all relations, newest first.
pub async fn list_relations(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let relations = RelationRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: relations }))
}

/// POST /api/v1/relations
///
/// Create a relation. The company side must reference a company-type
/// partner flagged internal; anything else is rejected with 400.
pub async fn create_relation(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRelation>,
) -> AppResult<impl IntoResponse> {
    let company = PartnerRepo::find_internal_company(&state.pool, input.company_id).await?;
    if company.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "partner {} is not an internal company",
            input.company_id
        ))));
    }

    let relation = RelationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        relation_id = relation.id,
        customer_id = relation.customer_id,
        company_id = relation.company_id,
        "Relation created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: relation })))
}

/// DELETE /api/v1/relations/{id}
///
/// Delete a relation by ID. Returns 204 No Content on success.
pub async fn delete_relation(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = RelationRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Relation",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
