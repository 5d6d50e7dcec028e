//! HTTP-level integration tests for the project workflow.
//!
//! Drives projects through the full design lifecycle over the API:
//! request, office response, agreement upload, detail submission,
//! payment proposal and checkout, progress stages and the final
//! deliverable. Also covers the guard order (404/403/409/400) and the
//! conditional-write behaviour under concurrent responses.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use common::{
    body_json, delete_auth, get_auth, multipart_auth, post_json_auth, put_json_auth,
    signup_company, signup_individual, signup_office, wait_for_notifications,
};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Scenario helpers
// ---------------------------------------------------------------------------

/// Create a project request and return its ID.
async fn create_project(app: &Router, user_token: &str, office_id: i64) -> i64 {
    let body = json!({
        "office_id": office_id,
        "project_type": "Residential Villa",
        "name": "Villa A",
        "description": "Two floors with a garden",
    });
    let response = post_json_auth(app.clone(), "/api/v1/projects", user_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_i64().expect("project id")
}

/// Office response to a pending request.
async fn respond(app: &Router, office_token: &str, project_id: i64, body: Value) -> StatusCode {
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/respond"),
        office_token,
        body,
    )
    .await;
    response.status()
}

/// Upload a small PDF into the agreement slot.
async fn upload_agreement(app: &Router, user_token: &str, project_id: i64) {
    let response = multipart_auth(
        app.clone(),
        Method::POST,
        &format!("/api/v1/projects/{project_id}/documents/agreement"),
        user_token,
        "contract.pdf",
        b"%PDF-1.4 signed agreement",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Owner detail submission after office approval.
async fn submit_details(app: &Router, user_token: &str, project_id: i64) {
    let body = json!({
        "location": "Abdoun",
        "land_area": "500m2",
        "plot_number": "17",
        "basin_number": "4",
    });
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/submit-final-details"),
        user_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Office payment proposal.
async fn propose_payment(app: &Router, office_token: &str, project_id: i64, amount: f64) {
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/propose-payment"),
        office_token,
        json!({ "payment_amount": amount, "payment_notes": "Half up front" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Owner checkout with a given method token.
async fn checkout(
    app: &Router,
    user_token: &str,
    project_id: i64,
    amount: f64,
    method_token: &str,
) -> StatusCode {
    let body = json!({
        "project_id": project_id,
        "amount": amount,
        "payment_method_token": method_token,
    });
    let response = post_json_auth(app.clone(), "/api/v1/payments/checkout", user_token, body).await;
    response.status()
}

/// Fetch a project as JSON.
async fn get_project(app: &Router, token: &str, project_id: i64) -> Value {
    let response = get_auth(app.clone(), &format!("/api/v1/projects/{project_id}"), token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Drive a fresh project to `In Progress` through the API.
async fn setup_in_progress(
    app: &Router,
    user_token: &str,
    office_token: &str,
    office_id: i64,
) -> i64 {
    let project_id = create_project(app, user_token, office_id).await;
    assert_eq!(
        respond(app, office_token, project_id, json!({ "action": "approve" })).await,
        StatusCode::OK
    );
    upload_agreement(app, user_token, project_id).await;
    submit_details(app, user_token, project_id).await;
    propose_payment(app, office_token, project_id, 2500.0).await;
    assert_eq!(
        checkout(app, user_token, project_id, 2500.0, "tok_visa").await,
        StatusCode::OK
    );
    project_id
}

/// First notification of the given type in a notification envelope.
fn find_notification<'a>(envelope: &'a Value, kind: &str) -> Option<&'a Value> {
    envelope["items"]
        .as_array()?
        .iter()
        .find(|n| n["notification_type"] == kind)
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Both office_id and project_type are mandatory; the office must exist.
#[sqlx::test(migrations = "../../migrations")]
async fn test_create_project_input_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Owner", "owner@example.com").await;
    let (office_id, _) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        &user_token,
        json!({ "project_type": "Villa" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        &user_token,
        json!({ "office_id": office_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        &user_token,
        json!({ "office_id": office_id + 999, "project_type": "Villa" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A nameless request is labeled by its type, starts in the initial
/// status and notifies the office.
#[sqlx::test(migrations = "../../migrations")]
async fn test_create_project_defaults_and_notification(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        &user_token,
        json!({ "office_id": office_id, "project_type": "Warehouse" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = body_json(response).await;
    assert_eq!(project["name"], "Warehouse");
    assert_eq!(project["status"], "Pending Office Approval");
    assert_eq!(project["payment_status"], "Pending");
    assert_eq!(project["progress_stage"], 0);

    let envelope = wait_for_notifications(app.clone(), &office_token, 1).await;
    let notification =
        find_notification(&envelope, "NEW_PROJECT_REQUEST").expect("office notified");
    assert_eq!(
        notification["message"],
        "User 'Huda' submitted a new project request: 'Warehouse'."
    );
    assert_eq!(notification["target_entity_id"], project["id"]);
}

/// Offices and companies cannot open project requests.
#[sqlx::test(migrations = "../../migrations")]
async fn test_create_project_is_individual_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        &office_token,
        json!({ "office_id": office_id, "project_type": "Villa" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Office response
// ---------------------------------------------------------------------------

/// Approval moves the project onward, bumps the office workload and
/// notifies the owner.
#[sqlx::test(migrations = "../../migrations")]
async fn test_approve_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;

    let status = respond(&app, &office_token, project_id, json!({ "action": "approve" })).await;
    assert_eq!(status, StatusCode::OK);

    let project = get_project(&app, &user_token, project_id).await;
    assert_eq!(project["status"], "Office Approved - Awaiting Details");
    assert!(project["rejection_reason"].is_null());

    let response = get_auth(app.clone(), &format!("/api/v1/offices/{office_id}"), &user_token).await;
    let office = body_json(response).await;
    assert_eq!(office["active_projects_count"], 1);

    let envelope = wait_for_notifications(app.clone(), &user_token, 1).await;
    let notification =
        find_notification(&envelope, "PROJECT_APPROVED_BY_OFFICE").expect("owner notified");
    assert_eq!(
        notification["message"],
        "Office 'Atlas' has approved your project request for 'Villa A'. \
         You can now complete the project details."
    );
}

/// Rejection records the reason and carries it into the notification.
#[sqlx::test(migrations = "../../migrations")]
async fn test_reject_request_with_reason(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;

    let status = respond(
        &app,
        &office_token,
        project_id,
        json!({ "action": "reject", "rejection_reason": "Outside our service area" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let project = get_project(&app, &user_token, project_id).await;
    assert_eq!(project["status"], "Office Rejected");
    assert_eq!(project["rejection_reason"], "Outside our service area");

    let envelope = wait_for_notifications(app.clone(), &user_token, 1).await;
    let notification =
        find_notification(&envelope, "PROJECT_REJECTED_BY_OFFICE").expect("owner notified");
    assert_eq!(
        notification["message"],
        "Office 'Atlas' has rejected your project request for 'Villa A'. \
         Reason: Outside our service area"
    );
}

/// Only the assigned office may respond; the action must be known.
#[sqlx::test(migrations = "../../migrations")]
async fn test_respond_guards(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let (_, other_token) = signup_office(app.clone(), "Rival", "rival@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;

    // Unknown action fails before any other guard runs.
    let status = respond(&app, &office_token, project_id, json!({ "action": "maybe" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A different office is rejected.
    let status = respond(&app, &other_token, project_id, json!({ "action": "approve" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The owner cannot respond either.
    let status = respond(&app, &user_token, project_id, json!({ "action": "approve" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Unknown project is a 404.
    let status = respond(&app, &office_token, project_id + 999, json!({ "action": "approve" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// A second response lands on an already-moved project and conflicts.
#[sqlx::test(migrations = "../../migrations")]
async fn test_double_respond_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;

    let first = respond(&app, &office_token, project_id, json!({ "action": "approve" })).await;
    let second = respond(&app, &office_token, project_id, json!({ "action": "reject" })).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::CONFLICT);
}

/// Two simultaneous responses: exactly one wins, the other conflicts.
#[sqlx::test(migrations = "../../migrations")]
async fn test_concurrent_responses_single_winner(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;

    let approve = respond(&app, &office_token, project_id, json!({ "action": "approve" }));
    let reject = respond(&app, &office_token, project_id, json!({ "action": "reject" }));
    let (first, second) = tokio::join!(approve, reject);

    let mut statuses = [first, second];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    // The stored status matches whichever response won.
    let project = get_project(&app, &user_token, project_id).await;
    let status = project["status"].as_str().unwrap();
    assert!(
        status == "Office Approved - Awaiting Details" || status == "Office Rejected",
        "unexpected status {status}"
    );
}

// ---------------------------------------------------------------------------
// Detail submission
// ---------------------------------------------------------------------------

/// Details cannot be submitted before the signed agreement is on file.
#[sqlx::test(migrations = "../../migrations")]
async fn test_submit_details_requires_agreement(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;
    respond(&app, &office_token, project_id, json!({ "action": "approve" })).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/submit-final-details"),
        &user_token,
        json!({ "location": "Abdoun" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Agreement file has not been uploaded for this project yet."
    );
}

/// Successful submission stores the fields, stamps the start date and
/// hands the project to the office for review.
#[sqlx::test(migrations = "../../migrations")]
async fn test_submit_details_happy_path(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;
    respond(&app, &office_token, project_id, json!({ "action": "approve" })).await;
    upload_agreement(&app, &user_token, project_id).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/submit-final-details"),
        &user_token,
        json!({
            "location": "Abdoun",
            "land_area": "500m2",
            "supervision_weeks_target": 12,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["project"]["status"],
        "Details Submitted - Pending Office Review"
    );
    assert_eq!(json["project"]["location"], "Abdoun");
    assert_eq!(json["project"]["supervision_weeks_target"], 12);
    assert!(!json["project"]["start_date"].is_null());

    let envelope = wait_for_notifications(app.clone(), &office_token, 2).await;
    assert!(find_notification(&envelope, "USER_SUBMITTED_PROJECT_DETAILS").is_some());
}

/// Descriptive edits are only open while the office awaits details.
#[sqlx::test(migrations = "../../migrations")]
async fn test_descriptive_update_status_gate(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;

    // Still pending approval: no edits.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        &user_token,
        json!({ "budget": 120000.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    respond(&app, &office_token, project_id, json!({ "action": "approve" })).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        &user_token,
        json!({ "budget": 120000.0, "planner5d_url": "https://planner5d.example/p/abc" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["project"]["budget"], 120000.0);
    // The edit does not move the workflow.
    assert_eq!(json["project"]["status"], "Office Approved - Awaiting Details");
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

/// Proposal amounts must be positive and the project review-ready.
#[sqlx::test(migrations = "../../migrations")]
async fn test_propose_payment_guards(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;

    // Pending approval is not a valid source status.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/propose-payment"),
        &office_token,
        json!({ "payment_amount": 2500.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    respond(&app, &office_token, project_id, json!({ "action": "approve" })).await;
    upload_agreement(&app, &user_token, project_id).await;
    submit_details(&app, &user_token, project_id).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/propose-payment"),
        &office_token,
        json!({ "payment_amount": -5.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Proposal, wrong-amount rejection, gateway decline and successful
/// checkout, in order.
#[sqlx::test(migrations = "../../migrations")]
async fn test_payment_proposal_and_checkout(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;
    respond(&app, &office_token, project_id, json!({ "action": "approve" })).await;
    upload_agreement(&app, &user_token, project_id).await;
    submit_details(&app, &user_token, project_id).await;

    propose_payment(&app, &office_token, project_id, 2500.0).await;
    let project = get_project(&app, &user_token, project_id).await;
    assert_eq!(project["status"], "Payment Proposal Sent");
    assert_eq!(project["payment_status"], "Pending User Action");
    assert_eq!(project["proposed_payment_amount"], 2500.0);

    let envelope = wait_for_notifications(app.clone(), &user_token, 2).await;
    let notification =
        find_notification(&envelope, "OFFICE_PROPOSED_PAYMENT").expect("owner notified");
    assert_eq!(
        notification["message"],
        "Office 'Atlas' has sent a payment proposal of 2500.00 JOD for your project: \
         'Villa A'. Notes: Half up front"
    );

    // Amount must match the proposal exactly.
    assert_eq!(
        checkout(&app, &user_token, project_id, 2499.0, "tok_visa").await,
        StatusCode::BAD_REQUEST
    );

    // A declined charge is a dependency failure and changes nothing.
    assert_eq!(
        checkout(&app, &user_token, project_id, 2500.0, "fake-processor-declined").await,
        StatusCode::INTERNAL_SERVER_ERROR
    );
    let project = get_project(&app, &user_token, project_id).await;
    assert_eq!(project["status"], "Payment Proposal Sent");
    assert_eq!(project["payment_status"], "Pending User Action");

    // Successful charge records the payment and starts the work.
    let body = json!({
        "project_id": project_id,
        "amount": 2500.0,
        "payment_method_token": "tok_visa",
    });
    let response = post_json_auth(app.clone(), "/api/v1/payments/checkout", &user_token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Payment successful!");
    assert!(json["transaction_id"].as_str().unwrap().starts_with("sandbox-"));
    assert_eq!(json["project"]["status"], "In Progress");
    assert_eq!(json["project"]["payment_status"], "Paid");

    let envelope = wait_for_notifications(app.clone(), &office_token, 3).await;
    let notification = find_notification(&envelope, "PAYMENT_RECEIVED").expect("office notified");
    assert_eq!(
        notification["message"],
        "User 'Huda' has paid 2500.00 JOD for project: 'Villa A'."
    );
}

/// Only the owner can pay for a project.
#[sqlx::test(migrations = "../../migrations")]
async fn test_checkout_requires_owner(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (_, other_token) = signup_individual(app.clone(), "Salem", "salem@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;
    respond(&app, &office_token, project_id, json!({ "action": "approve" })).await;
    upload_agreement(&app, &user_token, project_id).await;
    submit_details(&app, &user_token, project_id).await;
    propose_payment(&app, &office_token, project_id, 2500.0).await;

    assert_eq!(
        checkout(&app, &other_token, project_id, 2500.0, "tok_visa").await,
        StatusCode::FORBIDDEN
    );
}

/// The client token endpoint hands out gateway initialization tokens.
#[sqlx::test(migrations = "../../migrations")]
async fn test_payment_client_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;

    let response = get_auth(app, "/api/v1/payments/client-token", &user_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["client_token"]
        .as_str()
        .unwrap()
        .starts_with("sandbox-client-token-"));
}

// ---------------------------------------------------------------------------
// Progress and completion
// ---------------------------------------------------------------------------

/// Progress stages move within bounds; the final stage completes the
/// project and releases office capacity.
#[sqlx::test(migrations = "../../migrations")]
async fn test_progress_stages(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = setup_in_progress(&app, &user_token, &office_token, office_id).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/progress"),
        &office_token,
        json!({ "stage": 7 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/progress"),
        &office_token,
        json!({ "stage": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["project"]["progress_stage"], 3);
    assert_eq!(json["project"]["status"], "In Progress");

    let envelope = wait_for_notifications(app.clone(), &user_token, 3).await;
    let notification =
        find_notification(&envelope, "PROJECT_PROGRESS_UPDATED").expect("owner notified");
    assert_eq!(
        notification["message"],
        "Office 'Atlas' has updated the progress for your project 'Villa A' to stage 3."
    );

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/progress"),
        &office_token,
        json!({ "stage": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["project"]["progress_stage"], 5);
    assert_eq!(json["project"]["status"], "Completed");

    let response = get_auth(app.clone(), &format!("/api/v1/offices/{office_id}"), &user_token).await;
    let office = body_json(response).await;
    assert_eq!(office["active_projects_count"], 0);
}

/// The final 2D upload is the deliverable: it completes the project
/// and stamps the end date.
#[sqlx::test(migrations = "../../migrations")]
async fn test_final_2d_upload_completes_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = setup_in_progress(&app, &user_token, &office_token, office_id).await;

    let response = multipart_auth(
        app.clone(),
        Method::POST,
        &format!("/api/v1/projects/{project_id}/documents/2d"),
        &office_token,
        "final-drawings.dwg",
        b"DWGDATA",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Final 2D document uploaded successfully.");
    assert_eq!(json["project"]["status"], "Completed");
    assert!(!json["project"]["end_date"].is_null());
    assert!(json["project"]["document_2d"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/"));

    // Completion is a one-way door: a second delivery conflicts.
    let response = multipart_auth(
        app.clone(),
        Method::POST,
        &format!("/api/v1/projects/{project_id}/documents/2d"),
        &office_token,
        "final-drawings.dwg",
        b"DWGDATA",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let envelope = wait_for_notifications(app.clone(), &user_token, 3).await;
    assert!(find_notification(&envelope, "OFFICE_UPLOADED_FINAL_2D").is_some());
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Slot ownership: owners upload agreements, offices upload drawings.
#[sqlx::test(migrations = "../../migrations")]
async fn test_document_slot_actor_enforcement(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;

    let response = multipart_auth(
        app.clone(),
        Method::POST,
        &format!("/api/v1/projects/{project_id}/documents/agreement"),
        &office_token,
        "contract.pdf",
        b"%PDF-1.4",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = multipart_auth(
        app.clone(),
        Method::POST,
        &format!("/api/v1/projects/{project_id}/documents/architectural"),
        &user_token,
        "plans.dwg",
        b"DWGDATA",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Unknown slots are rejected by name.
    let response = multipart_auth(
        app.clone(),
        Method::POST,
        &format!("/api/v1/projects/{project_id}/documents/blueprints"),
        &user_token,
        "plans.pdf",
        b"%PDF-1.4",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Per-slot extension allowlists are enforced.
#[sqlx::test(migrations = "../../migrations")]
async fn test_document_upload_validates_extension(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, _) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;

    let response = multipart_auth(
        app.clone(),
        Method::POST,
        &format!("/api/v1/projects/{project_id}/documents/agreement"),
        &user_token,
        "contract.docx",
        b"not a pdf",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The documents endpoint maps every slot to its stored path.
#[sqlx::test(migrations = "../../migrations")]
async fn test_documents_map(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (office_id, _) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;
    upload_agreement(&app, &user_token, project_id).await;

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/documents"),
        &user_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["agreement"].as_str().unwrap().starts_with("/uploads/"));
    assert!(json["2d"].is_null());
    assert!(json["license"].is_null());
    assert!(json["report"].is_null());
}

// ---------------------------------------------------------------------------
// Visibility and deletion
// ---------------------------------------------------------------------------

/// Listing is scoped by role; details are hidden from strangers.
#[sqlx::test(migrations = "../../migrations")]
async fn test_project_visibility(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (_, stranger_token) = signup_individual(app.clone(), "Salem", "salem@example.com").await;
    let (office_id, office_token) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let (_, company_token) = signup_company(app.clone(), "BuildCo", "build@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;

    let response = get_auth(app.clone(), "/api/v1/projects", &user_token).await;
    let owned = body_json(response).await;
    assert_eq!(owned.as_array().unwrap().len(), 1);

    let response = get_auth(app.clone(), "/api/v1/projects", &office_token).await;
    let engaged = body_json(response).await;
    assert_eq!(engaged.as_array().unwrap().len(), 1);

    let response = get_auth(app.clone(), "/api/v1/projects", &stranger_token).await;
    let foreign = body_json(response).await;
    assert_eq!(foreign.as_array().unwrap().len(), 0);

    let response = get_auth(app.clone(), "/api/v1/projects", &company_token).await;
    let assigned = body_json(response).await;
    assert_eq!(assigned.as_array().unwrap().len(), 0);

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        &stranger_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Deletion is owner-only and final.
#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user_token) = signup_individual(app.clone(), "Huda", "huda@example.com").await;
    let (_, stranger_token) = signup_individual(app.clone(), "Salem", "salem@example.com").await;
    let (office_id, _) = signup_office(app.clone(), "Atlas", "atlas@example.com").await;
    let project_id = create_project(&app, &user_token, office_id).await;

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        &stranger_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        &user_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}"),
        &user_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
