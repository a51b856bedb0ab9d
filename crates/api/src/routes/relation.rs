//! Route definitions for the `/relations` resource.
//!
//! All endpoints require authentication.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::relation;
use crate::state::AppState;

/// Routes mounted at `/relations`.
///
/// ```text
/// GET    /      -> list_relations
/// POST   /      -> create_relation
/// DELETE /{id}  -> delete_relation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(relation::list_relations).post(relation::create_relation),
        )
        .route("/{id}", delete(relation::delete_relation))
}
