//! Integration tests for the registration API.

use auth_register::{
    api::{create_router, AppState},
    config::CognitoConfig,
    UpsertController,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use identity_provider::{InMemoryIdentityProvider, ATTR_PHONE_NUMBER};
use std::sync::Arc;
use tower::ServiceExt;

const POOL_ID: &str = "us-east-1_test";

/// Create a test app backed by an in-memory identity provider.
fn create_test_app(config: CognitoConfig) -> (Router, Arc<InMemoryIdentityProvider>) {
    let provider = Arc::new(InMemoryIdentityProvider::new());
    let controller = UpsertController::new(provider.clone(), config);
    (create_router(AppState::new(controller)), provider)
}

fn ready_config() -> CognitoConfig {
    CognitoConfig::new(POOL_ID, "client123")
}

fn register_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(
    app: &Router,
    request: Request<Body>,
) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    (status, content_type, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app(ready_config());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, _, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_then_update() {
    let (app, provider) = create_test_app(ready_config());
    let body = r#"{
        "name": "Maria",
        "email": "maria@example.com",
        "password": "S3nha!forte",
        "phone": "+5511912345678"
    }"#;

    let (status, content_type, json) = send(&app, register_request(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        json,
        serde_json::json!({ "success": true, "message": "Usuário criado com sucesso!" })
    );

    let (status, _, json) = send(&app, register_request(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Usuário atualizado com sucesso!");

    assert_eq!(provider.count().await, 1);
    let user = provider.user(POOL_ID, "maria@example.com").await.unwrap();
    assert!(user.password_permanent);
    assert_eq!(user.password, "S3nha!forte");
    assert!(user.attributes.iter().any(|a| a.name == ATTR_PHONE_NUMBER));
}

#[tokio::test]
async fn test_missing_password_is_rejected() {
    let (app, provider) = create_test_app(ready_config());

    let (status, _, json) = send(
        &app,
        register_request(r#"{"name": "Maria", "email": "maria@example.com"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("Erro ao processar o usuário: "));
    assert!(message.contains("Invalid payload"));
    assert_eq!(provider.count().await, 0);
}

#[tokio::test]
async fn test_invalid_phone_is_rejected() {
    let (app, provider) = create_test_app(ready_config());

    let (status, _, json) = send(
        &app,
        register_request(
            r#"{"name": "Maria", "email": "maria@example.com", "password": "pw", "phone": "+abc123"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("+abc123"));
    assert_eq!(provider.count().await, 0);
}

#[tokio::test]
async fn test_blank_configuration_fails_every_request() {
    let (app, provider) = create_test_app(CognitoConfig::new(POOL_ID, ""));

    let (status, _, json) = send(
        &app,
        register_request(r#"{"name": "Maria", "email": "maria@example.com", "password": "pw"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("Configuration missing"));
    assert_eq!(provider.count().await, 0);
}

#[tokio::test]
async fn test_malformed_body_still_returns_result() {
    let (app, _) = create_test_app(ready_config());

    let (status, content_type, json) = send(&app, register_request("{not json")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(json["success"], false);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("Erro ao processar o usuário: Invalid payload"));
}
