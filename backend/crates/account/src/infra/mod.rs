//! Infrastructure Layer
//!
//! Database, object storage and mail implementations of the domain traits.

pub mod postgres;
pub mod s3;
pub mod smtp;

pub use postgres::PgAccountRepository;
pub use s3::S3ObjectStorage;
pub use smtp::{SmtpConfig, SmtpMailer};
