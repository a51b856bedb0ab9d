//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Query-parameter structs for the endpoints that list the entity

pub mod message;
pub mod partner;
pub mod relation;
pub mod training_file;
pub mod user;
