//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod garment_repo;
pub mod tryon_history_repo;

pub use garment_repo::GarmentRepo;
pub use tryon_history_repo::TryOnHistoryRepo;
