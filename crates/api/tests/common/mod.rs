use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use meemar_api::auth::jwt::JwtConfig;
use meemar_api::config::ServerConfig;
use meemar_api::notifier::Notifier;
use meemar_api::payments::SandboxGateway;
use meemar_api::routes;
use meemar_api::state::AppState;

/// Configuration used by every integration test.
///
/// Uploads land in a per-process temp directory; stored names are
/// unique so concurrent tests do not collide.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: std::env::temp_dir()
            .join("meemar-test-uploads")
            .to_string_lossy()
            .into_owned(),
        jwt: JwtConfig {
            secret: "integration-test-secret-keep-it-long".to_string(),
            token_expiry_days: 7,
        },
    }
}

/// Assemble the application router on top of the given pool.
///
/// Follows the construction in `main.rs` layer for layer (minus the
/// `/uploads` static service), so requests in tests cross the same
/// CORS, request-id, timeout, tracing and panic-recovery stack as in
/// production.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let (notifier, _worker) = Notifier::spawn(pool.clone());

    let state = AppState {
        pool,
        config: Arc::new(config),
        notifier,
        gateway: Arc::new(SandboxGateway),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON request without authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, None, body).await
}

/// Send an authenticated JSON POST.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    json_request(app, Method::POST, uri, Some(token), body).await
}

/// Send an authenticated JSON PUT.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    json_request(app, Method::PUT, uri, Some(token), body).await
}

/// Send an authenticated DELETE.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an authenticated multipart request carrying one file plus
/// optional text fields.
pub async fn multipart_auth(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    filename: &str,
    file_bytes: &[u8],
    text_fields: &[(&str, &str)],
) -> Response<Body> {
    let boundary = "meemar-test-boundary";
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in text_fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(file_bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Sign up an individual account via the API. Returns (id, token).
pub async fn signup_individual(app: Router, name: &str, email: &str) -> (i64, String) {
    let body = serde_json::json!({
        "account_type": "individual",
        "name": name,
        "email": email,
        "password": "sup3r-secret!",
    });
    signup(app, body).await
}

/// Sign up an office account via the API. Returns (id, token).
pub async fn signup_office(app: Router, name: &str, email: &str) -> (i64, String) {
    let body = serde_json::json!({
        "account_type": "office",
        "name": name,
        "email": email,
        "password": "sup3r-secret!",
        "location": "Amman",
    });
    signup(app, body).await
}

/// Sign up a company account via the API. Returns (id, token).
pub async fn signup_company(app: Router, name: &str, email: &str) -> (i64, String) {
    let body = serde_json::json!({
        "account_type": "company",
        "name": name,
        "email": email,
        "password": "sup3r-secret!",
        "company_type": "Construction",
    });
    signup(app, body).await
}

async fn signup(app: Router, body: serde_json::Value) -> (i64, String) {
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["account"]["id"].as_i64().expect("account id");
    let token = json["token"].as_str().expect("token").to_string();
    (id, token)
}

/// Poll the notifications endpoint until at least `want` items are
/// visible. Delivery runs on a background channel, so a freshly fired
/// event can land a beat after the transition response.
pub async fn wait_for_notifications(app: Router, token: &str, want: usize) -> serde_json::Value {
    for _ in 0..50 {
        let response = get_auth(app.clone(), "/api/v1/notifications", token).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        if json["items"].as_array().map_or(0, Vec::len) >= want {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("expected at least {want} notifications to be delivered");
}
