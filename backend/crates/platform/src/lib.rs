//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, random tokens)
//! - Password hashing (Argon2id, NIST SP 800-63B defaults)
//! - Bearer token signing and validation (HS256 JWT)
//! - S3-compatible object store client (SigV4)

pub mod crypto;
pub mod object_store;
pub mod password;
pub mod token;
