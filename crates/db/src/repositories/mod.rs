//! Repository layer.
//!
//! Repositories are zero-sized structs whose async methods take the
//! `&PgPool` as their first argument. Workflow transitions on projects
//! are compare-and-swap writes keyed on the status the caller
//! previously read.

pub mod company_repo;
pub mod favorite_repo;
pub mod notification_repo;
pub mod office_repo;
pub mod project_design_repo;
pub mod project_repo;
pub mod review_repo;
pub mod user_repo;

pub use company_repo::CompanyRepo;
pub use favorite_repo::FavoriteRepo;
pub use notification_repo::NotificationRepo;
pub use office_repo::OfficeRepo;
pub use project_design_repo::ProjectDesignRepo;
pub use project_repo::ProjectRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;

/// Build an ILIKE pattern matching `q` as a literal substring. LIKE
/// metacharacters in the input are escaped so they match themselves.
pub(crate) fn ilike_pattern(q: &str) -> String {
    let escaped = q
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
