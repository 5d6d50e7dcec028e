//! Domain model structs and DTOs.
//!
//! Each submodule pairs a `FromRow` entity struct with `Deserialize`
//! DTOs: one for inserts and one all-`Option` patch type for updates.
//! Account entities additionally carry serializable response
//! projections that strip credentials.

pub mod company;
pub mod favorite;
pub mod notification;
pub mod office;
pub mod project;
pub mod project_design;
pub mod review;
pub mod user;
