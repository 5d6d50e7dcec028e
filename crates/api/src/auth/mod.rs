//! Credential handling.
//!
//! - [`password`] -- Argon2id hashing and strength checks.
//! - [`jwt`] -- token issuance and validation.

pub mod jwt;
pub mod password;
