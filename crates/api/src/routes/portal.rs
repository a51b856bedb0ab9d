//! Route definitions for the customer portal resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::portal;
use crate::state::AppState;

/// Portal routes, mounted directly under the API root.
///
/// ```text
/// GET /my/home                 -> portal_home
/// GET /my/training-files       -> list_training_files
/// GET /training-files/{id}     -> training_file_detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/my/home", get(portal::portal_home))
        .route("/my/training-files", get(portal::list_training_files))
        .route("/training-files/{id}", get(portal::training_file_detail))
}
