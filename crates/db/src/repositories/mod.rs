//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod workshop_repo;

pub use workshop_repo::WorkshopRepo;
