//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod message_repo;
pub mod partner_repo;
pub mod recent_file_repo;
pub mod relation_repo;
pub mod training_file_repo;
pub mod user_repo;

pub use message_repo::MessageRepo;
pub use partner_repo::PartnerRepo;
pub use recent_file_repo::RecentFileRepo;
pub use relation_repo::RelationRepo;
pub use training_file_repo::{ListQuery, TrainingFileRepo};
pub use user_repo::UserRepo;
