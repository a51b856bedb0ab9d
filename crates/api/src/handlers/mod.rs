//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `dossier_db` and
//! map errors via [`crate::error::AppError`].

pub mod auth;
pub mod portal;
pub mod relation;
