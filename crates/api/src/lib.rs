//! Meemar API server library.
//!
//! Exposes the core building blocks (config, state, error handling,
//! routes, auth, storage, the notification worker and the payment
//! gateway) so integration tests and the binary entrypoint can both
//! access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notifier;
pub mod payments;
pub mod routes;
pub mod state;
pub mod storage;
