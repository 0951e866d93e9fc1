use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::{self, ServerState};
use service::auth::repository::mock::MockAccountRepository;
use service::auth::{AccountService, CredentialConfig, CredentialService};
use service::employee::repository::mock::MockEmployeeRepository;
use service::employee::EmployeeDirectory;
use service::media::PhotoUploader;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app(jwt_secret: Option<&str>) -> anyhow::Result<Router> {
    let creds = CredentialService::new(CredentialConfig {
        jwt_secret: jwt_secret.map(String::from),
        hash_memory_kib: 1024,
        hash_iterations: 1,
        ..CredentialConfig::default()
    })
    .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let state = ServerState {
        accounts: Arc::new(AccountService::new(Arc::new(MockAccountRepository::default()), Arc::new(creds))),
        employees: Arc::new(EmployeeDirectory::new(
            Arc::new(MockEmployeeRepository::default()),
            Arc::new(PhotoUploader::disabled()),
        )),
    };
    Ok(routes::build_router(state, cors()))
}

async fn post_json(app: &Router, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let app = build_app(None)?;
    let resp = app.oneshot(Request::builder().uri("/health").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    assert_eq!(serde_json::from_slice::<Value>(&bytes)?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn test_signup_and_login_flow() -> anyhow::Result<()> {
    let app = build_app(Some("test-secret"))?;

    let (status, account) = post_json(
        &app,
        "/auth/signup",
        json!({"username": "ada", "email": "Ada@Example.com", "password": "S3curePass!"}),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(account["email"], "ada@example.com");
    assert_eq!(account["username"], "ada");
    assert!(account.get("password_hash").is_none());

    let (status, body) = post_json(&app, "/auth/login", json!({"username": "ada", "password": "S3curePass!"})).await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap_or_default();
    assert_eq!(token.split('.').count(), 3);

    let (status, body) = post_json(&app, "/auth/login", json!({"email": "ADA@example.com", "password": "S3curePass!"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_signup_rejected() -> anyhow::Result<()> {
    let app = build_app(Some("test-secret"))?;
    let body = json!({"username": "ada", "email": "ada@example.com", "password": "S3curePass!"});
    let (status, _) = post_json(&app, "/auth/signup", body).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, err) = post_json(
        &app,
        "/auth/signup",
        json!({"username": "other", "email": "ADA@EXAMPLE.com", "password": "S3curePass!"}),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err, json!({"code": "INVALID_INPUT", "message": "Email already exists"}));
    Ok(())
}

#[tokio::test]
async fn test_signup_validation_details() -> anyhow::Result<()> {
    let app = build_app(Some("test-secret"))?;
    let (status, err) = post_json(&app, "/auth/signup", json!({"username": "ab", "password": 12})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "INVALID_INPUT");
    assert_eq!(err["message"], "username must be at least 3 characters");
    let details = err["details"].as_array().cloned().unwrap_or_default();
    assert_eq!(details.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() -> anyhow::Result<()> {
    let app = build_app(Some("test-secret"))?;
    post_json(&app, "/auth/signup", json!({"username": "ada", "email": "ada@example.com", "password": "S3curePass!"})).await?;

    let (wrong_status, wrong) = post_json(&app, "/auth/login", json!({"username": "ada", "password": "wrong-pass"})).await?;
    let (unknown_status, unknown) = post_json(&app, "/auth/login", json!({"username": "nobody", "password": "S3curePass!"})).await?;
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, unknown);
    assert_eq!(wrong, json!({"code": "UNAUTHENTICATED", "message": "Invalid credentials"}));
    Ok(())
}

#[tokio::test]
async fn test_login_requires_identifier() -> anyhow::Result<()> {
    let app = build_app(Some("test-secret"))?;
    let (status, err) = post_json(&app, "/auth/login", json!({"password": "S3curePass!"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "INVALID_INPUT");
    Ok(())
}

#[tokio::test]
async fn test_missing_signing_key_is_internal() -> anyhow::Result<()> {
    let app = build_app(None)?;
    post_json(&app, "/auth/signup", json!({"username": "ada", "email": "ada@example.com", "password": "S3curePass!"})).await?;
    let (status, err) = post_json(&app, "/auth/login", json!({"username": "ada", "password": "S3curePass!"})).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err["code"], "INTERNAL_ERROR");
    assert_eq!(err["message"], "Token signing is not configured");
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_invalid_input() -> anyhow::Result<()> {
    let app = build_app(Some("test-secret"))?;
    let req = Request::builder()
        .method("POST")
        .uri("/auth/signup")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let err: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(err["code"], "INVALID_INPUT");
    Ok(())
}
