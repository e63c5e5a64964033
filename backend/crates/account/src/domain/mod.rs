//! Domain Layer
//!
//! Contains the account entity, value objects, and the persistence, storage
//! and mail traits implemented by the infrastructure layer.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::Account;
pub use repository::{AccountRepository, ObjectStorage, VerificationMailer};
