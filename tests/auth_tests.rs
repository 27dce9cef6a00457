//! Session, registration and password reset flows.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use lingora::config::Config;
use tower::ServiceExt;

fn test_config() -> Config {
    let db_path = std::env::temp_dir().join(format!("lingora-auth-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.database.url = format!("sqlite:{}", db_path.display());
    config.storage.public_dir = std::env::temp_dir()
        .join(format!("lingora-auth-test-public-{}", uuid::Uuid::new_v4()))
        .display()
        .to_string();
    config.auth.expose_reset_token = true;
    config
}

async fn spawn_app_with(config: Config) -> Router {
    let state = lingora::api::create_app_state_from_config(config)
        .await
        .expect("failed to create app state");
    lingora::api::router(state).await
}

async fn spawn_app() -> Router {
    spawn_app_with(test_config()).await
}

async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", mime::APPLICATION_JSON.as_ref())
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn login_as(app: &Router, email: &str, password: &str) -> String {
    let response = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "ok");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = spawn_app().await;

    let response = post_json(
        &app,
        "/api/auth/login",
        serde_json::json!({ "email": "admin@lingora.local", "password": "wrong" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid credentials");

    // Unknown account answers exactly the same way.
    let response = post_json(
        &app,
        "/api/auth/login",
        serde_json::json!({ "email": "nobody@lingora.local", "password": "admin123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = spawn_app().await;

    let response = post_json(
        &app,
        "/api/auth/login",
        serde_json::json!({ "email": "", "password": "admin123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Email is required");
}

#[tokio::test]
async fn test_session_flow() {
    let app = spawn_app().await;

    // Protected endpoints reject anonymous callers.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = login_as(&app, "admin@lingora.local", "admin123").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "admin@lingora.local");
    assert_eq!(json["data"]["name"], "Admin");
    assert_eq!(json["data"]["isActive"], true);
    // The password hash never leaves the server.
    assert!(json["data"]["password"].is_null());
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = spawn_app().await;
    let cookie = login_as(&app, "admin@lingora.local", "admin123").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/auth/me")
                .header(header::COOKIE, &cookie)
                .header("Content-Type", mime::APPLICATION_JSON.as_ref())
                .body(Body::from(
                    serde_json::json!({ "name": "Site Admin" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Site Admin");
    assert_eq!(json["data"]["email"], "admin@lingora.local");
}

#[tokio::test]
async fn test_register_and_login() {
    let app = spawn_app().await;

    let response = post_json(
        &app,
        "/api/auth/register",
        serde_json::json!({
            "name": "New User",
            "email": "new@example.com",
            "password": "password1"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "New User");
    assert_eq!(json["data"]["email"], "new@example.com");
    assert!(json["data"]["id"].is_string());

    login_as(&app, "new@example.com", "password1").await;

    // Same email again conflicts.
    let response = post_json(
        &app,
        "/api/auth/register",
        serde_json::json!({
            "name": "Other",
            "email": "new@example.com",
            "password": "password2"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["error"], "User already exists");
}

#[tokio::test]
async fn test_register_validation() {
    let app = spawn_app().await;

    let response = post_json(
        &app,
        "/api/auth/register",
        serde_json::json!({ "name": "X", "email": "not-an-email", "password": "password1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid email address");

    let response = post_json(
        &app,
        "/api/auth/register",
        serde_json::json!({ "name": "X", "email": "x@example.com", "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Password must be at least 6 characters"
    );
}

#[tokio::test]
async fn test_register_kill_switch() {
    let mut config = test_config();
    config.auth.allow_registration = false;
    let app = spawn_app_with(config).await;

    let response = post_json(
        &app,
        "/api/auth/register",
        serde_json::json!({
            "name": "New User",
            "email": "new@example.com",
            "password": "password1"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "Registration is currently disabled"
    );
}

#[tokio::test]
async fn test_auth_config_reflects_flags() {
    let mut config = test_config();
    config.auth.allow_registration = false;
    let app = spawn_app_with(config).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/config")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["allowRegistration"], false);
    assert_eq!(json["data"]["allowPasswordReset"], true);
}

#[tokio::test]
async fn test_forgot_password_is_silent_for_unknown_email() {
    let app = spawn_app().await;

    let response = post_json(
        &app,
        "/api/auth/forgot-password",
        serde_json::json!({ "email": "nobody@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["data"]["message"],
        "If an account with that email exists, a password reset link has been sent"
    );
    // No token is minted for an unknown account, not even in dev mode.
    assert!(json["data"]["resetToken"].is_null());
}

#[tokio::test]
async fn test_forgot_password_kill_switch() {
    let mut config = test_config();
    config.auth.allow_password_reset = false;
    let app = spawn_app_with(config).await;

    let response = post_json(
        &app,
        "/api/auth/forgot-password",
        serde_json::json!({ "email": "admin@lingora.local" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "Password reset is currently disabled"
    );
}

#[tokio::test]
async fn test_password_reset_flow() {
    let app = spawn_app().await;

    let response = post_json(
        &app,
        "/api/auth/forgot-password",
        serde_json::json!({ "email": "admin@lingora.local" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let first_token = body_json(response).await["data"]["resetToken"]
        .as_str()
        .expect("dev mode should expose the token")
        .to_string();
    assert_eq!(first_token.len(), 64);

    // A second request replaces the outstanding token.
    let response = post_json(
        &app,
        "/api/auth/forgot-password",
        serde_json::json!({ "email": "admin@lingora.local" }),
    )
    .await;
    let second_token = body_json(response).await["data"]["resetToken"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(first_token, second_token);

    let response = post_json(
        &app,
        "/api/auth/reset-password",
        serde_json::json!({ "token": first_token, "password": "brandnew123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid or expired reset token"
    );

    let response = post_json(
        &app,
        "/api/auth/reset-password",
        serde_json::json!({ "token": second_token, "password": "brandnew123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["message"],
        "Password reset successfully"
    );

    // The old password is gone, the new one works.
    let response = post_json(
        &app,
        "/api/auth/login",
        serde_json::json!({ "email": "admin@lingora.local", "password": "admin123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    login_as(&app, "admin@lingora.local", "brandnew123").await;

    // Tokens are single use.
    let response = post_json(
        &app,
        "/api/auth/reset-password",
        serde_json::json!({ "token": second_token, "password": "again12345" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_change_password_verifies_current() {
    let app = spawn_app().await;
    let cookie = login_as(&app, "admin@lingora.local", "admin123").await;

    let change = |current: &str, new: &str| {
        serde_json::json!({ "currentPassword": current, "newPassword": new })
    };

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/change-password")
                .header(header::COOKIE, &cookie)
                .header("Content-Type", mime::APPLICATION_JSON.as_ref())
                .body(Body::from(change("wrong-password", "fresh12345").to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Current password is incorrect"
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/change-password")
                .header(header::COOKIE, &cookie)
                .header("Content-Type", mime::APPLICATION_JSON.as_ref())
                .body(Body::from(change("admin123", "fresh12345").to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    login_as(&app, "admin@lingora.local", "fresh12345").await;
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = spawn_app().await;
    let cookie = login_as(&app, "admin@lingora.local", "admin123").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
