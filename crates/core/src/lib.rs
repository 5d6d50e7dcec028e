//! Domain rules for the meemar design & supervision platform.
//!
//! Pure, I/O-free logic shared by the database and API layers:
//!
//! - [`workflow`]: the project status machine (canonical statuses, the
//!   transition-rule table, and the guards every mutating endpoint runs).
//! - [`party`]: actor/recipient tag sets (individual / office / company)
//!   and the tagged references used for favorites and notifications.
//! - [`rating`]: review rating bounds and mean-rating aggregation.
//! - [`payment`]: payment sub-state constants and amount validation.
//! - [`document`]: upload slots and their size/extension constraints.
//! - [`notification`]: well-known notification type names.

pub mod document;
pub mod error;
pub mod notification;
pub mod party;
pub mod payment;
pub mod rating;
pub mod types;
pub mod workflow;
