//! Request handlers, one module per resource.
//!
//! Handlers validate input, run the guard sequence for the operation,
//! call into `meemar_db` repositories and map the outcome onto the
//! JSON response envelope. Status-changing project handlers share the
//! guards defined in [`project`].

pub mod auth;
pub mod company;
pub mod document;
pub mod favorite;
pub mod notification;
pub mod office;
pub mod payment;
pub mod profile;
pub mod project;
pub mod project_design;
pub mod review;
pub mod search;
pub mod supervision;
pub mod user;
