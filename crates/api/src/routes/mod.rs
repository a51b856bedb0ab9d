pub mod auth;
pub mod health;
pub mod portal;
pub mod relation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                       login (public)
///
/// /my/home                          portal home counters (auth required)
/// /my/training-files                training-file listing (auth required)
///
/// /training-files/{id}              detail / follow-up (public; record
///                                   access token or owning login)
///
/// /relations                        list, create (auth required)
/// /relations/{id}                   delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(portal::router())
        .nest("/relations", relation::router())
}
