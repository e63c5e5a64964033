//! Value Object Module

pub mod account_id;
pub mod account_password;
pub mod account_role;
pub mod email;
pub mod nickname;
pub mod operation;
pub mod profile;
pub mod verification_token;
