//! Domain-level error type shared across crates.

use crate::types::DbId;

/// Domain errors produced below the HTTP layer.
///
/// The API crate wraps this in its own `AppError` and maps each variant to
/// an HTTP status code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id found nothing.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but lacks rights to the resource.
    #[error("forbidden: {0}")]
    Forbidden(String),
}
