//! Authentication middleware extractors.
//!
//! - [`auth::AuthParty`] -- Extracts the authenticated account from a JWT
//!   Bearer token.

pub mod auth;
