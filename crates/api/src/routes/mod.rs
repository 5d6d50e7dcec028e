pub mod auth;
pub mod company;
pub mod favorite;
pub mod health;
pub mod notification;
pub mod office;
pub mod payment;
pub mod profile;
pub mod project;
pub mod review;
pub mod search;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                            create account (public)
/// /auth/login                             login (public)
///
/// /profile                                own account get, update
///
/// /users/{id}                             public user profile
///
/// /offices                                list
/// /offices/suggestions                    top-rated offices
/// /offices/{id}                           get
/// /offices/{id}/projects                  engagements (design + supervision)
/// /offices/{id}/reviews                   reviews targeting the office
///
/// /companies                              list
/// /companies/suggestions                  top-rated companies
/// /companies/{id}                         get
/// /companies/{id}/projects                execution assignments
/// /companies/{id}/reviews                 reviews targeting the company
///
/// /projects                               list (role-scoped), create
/// /projects/{id}                          get, update, delete
/// /projects/{id}/respond                  office approve/reject (PUT)
/// /projects/{id}/submit-final-details     owner detail submission (PUT)
/// /projects/{id}/propose-payment          office payment proposal (PUT)
/// /projects/{id}/progress                 office progress stages (PUT)
/// /projects/{id}/request-supervision      owner supervision request (POST)
/// /projects/{id}/respond-supervision      supervising office approve/reject (PUT)
/// /projects/{id}/supervision-report       weekly report upload (PUT, multipart)
/// /projects/{id}/documents                slot -> path map (GET)
/// /projects/{id}/documents/{slot}         upload into slot (POST, multipart)
/// /projects/{id}/design                   design spec get, upsert
///
/// /payments/client-token                  gateway client token (GET)
/// /payments/checkout                      pay the proposed amount (POST)
///
/// /reviews                                create (POST)
/// /reviews/mine                           authored by caller (GET)
/// /reviews/{id}                           get, update, delete
///
/// /notifications                          list, create
/// /notifications/unread-count             unread count (GET)
/// /notifications/read-all                 mark all read (PUT)
/// /notifications/{id}/read                mark read (PUT)
/// /notifications/{id}                     delete
///
/// /favorites                              list, add, remove (?item_id, item_type)
///
/// /search/{type}                          substring search (?q=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Account creation and login.
        .nest("/auth", auth::router())
        // The caller's own account.
        .nest("/profile", profile::router())
        // Public user profiles.
        .nest("/users", user::router())
        // Office and company directories.
        .nest("/offices", office::router())
        .nest("/companies", company::router())
        // Projects, workflow transitions, documents, designs, supervision.
        .nest("/projects", project::router())
        // Payment gateway endpoints.
        .nest("/payments", payment::router())
        // Reviews and derived ratings.
        .nest("/reviews", review::router())
        // Recipient-scoped notifications.
        .nest("/notifications", notification::router())
        // Individual bookmarks.
        .nest("/favorites", favorite::router())
        // Entity search.
        .nest("/search", search::router())
}
