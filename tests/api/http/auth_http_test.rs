//! Auth API HTTP Handler Tests

use super::{get_json, post_json, TestApp};
use axum::http::StatusCode;
use farmcart_core::api::MessageResponse;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn register_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": "secret123",
        "full_name": "Asha Patil",
        "phone": "9876543210"
    })
}

// ============================================================================
// Register / Login
// ============================================================================

#[tokio::test]
async fn test_register_creates_user_and_profile() {
    let app = TestApp::new();

    let (status, body): (StatusCode, Option<MessageResponse>) = post_json(
        &app.router,
        "/api/auth/register",
        None,
        &register_body("asha@farm.test"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body.message, "User registered");
    let uid = body.id.unwrap();

    let user = app.doc("users", &uid).await.unwrap();
    assert_eq!(user["role"], "user");
    assert_eq!(user["status"], "active");
    assert_eq!(user["email"], "asha@farm.test");
    assert_eq!(user["phone"], "9876543210");

    let profile = app.doc("user_profiles", &uid).await.unwrap();
    assert_eq!(profile["user_id"], json!(uid));
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() {
    let app = TestApp::new();
    let body = register_body("dup@farm.test");

    let (status, _): (StatusCode, Option<Value>) =
        post_json(&app.router, "/api/auth/register", None, &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _): (StatusCode, Option<Value>) =
        post_json(&app.router, "/api/auth/register", None, &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = TestApp::new();

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/auth/register",
        None,
        &json!({"email": "not-an-email", "password": "secret123", "full_name": "Asha"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/auth/register",
        None,
        &json!({"email": "a@farm.test", "password": "secret123", "full_name": "Asha", "role": "admin"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.docs("users").await.is_empty());
}

#[tokio::test]
async fn test_login_passes_session_through() {
    let app = TestApp::new();
    let (_, created): (StatusCode, Option<MessageResponse>) = post_json(
        &app.router,
        "/api/auth/register",
        None,
        &register_body("login@farm.test"),
    )
    .await;
    let uid = created.unwrap().id.unwrap();

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/auth/login",
        None,
        &json!({"email": "login@farm.test", "password": "secret123"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["localId"], json!(uid));
    assert_eq!(body["idToken"], json!(format!("id-token-{}", uid)));
    assert!(body["refreshToken"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    let _: (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/auth/register",
        None,
        &register_body("wrong@farm.test"),
    )
    .await;

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/auth/login",
        None,
        &json!({"email": "wrong@farm.test", "password": "nope-nope"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.unwrap()["error"], "unauthorized");
}

#[tokio::test]
async fn test_admin_login_requires_admin_role() {
    let app = TestApp::new();
    let (_, created): (StatusCode, Option<MessageResponse>) = post_json(
        &app.router,
        "/api/auth/register",
        None,
        &register_body("boss@farm.test"),
    )
    .await;
    let uid = created.unwrap().id.unwrap();
    let credentials = json!({"email": "boss@farm.test", "password": "secret123"});

    let (status, _): (StatusCode, Option<Value>) =
        post_json(&app.router, "/api/auth/admin/login", None, &credentials).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(app.doc("admin_users", &uid).await.is_none());

    let mut user = app.doc("users", &uid).await.unwrap();
    user["role"] = json!("admin");
    app.seed("users", &uid, user).await;

    let (status, _): (StatusCode, Option<Value>) =
        post_json(&app.router, "/api/auth/admin/login", None, &credentials).await;
    assert_eq!(status, StatusCode::OK);

    let admin = app.doc("admin_users", &uid).await.unwrap();
    assert_eq!(admin["user_id"], json!(uid));
    assert!(admin["last_login"].is_string());
}

// ============================================================================
// Seller onboarding
// ============================================================================

#[tokio::test]
async fn test_seller_register_then_login_while_pending() {
    let app = TestApp::new();

    let (status, body): (StatusCode, Option<MessageResponse>) = post_json(
        &app.router,
        "/api/auth/seller/register",
        None,
        &json!({
            "email": "grower@farm.test",
            "password": "secret123",
            "full_name": "Ravi Kumar",
            "farm_name": "Green Acres",
            "farm_location": "Nashik"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body.message, "Seller registered (pending approval)");
    let uid = body.id.unwrap();

    assert_eq!(app.doc("users", &uid).await.unwrap()["role"], "seller");
    let profile = app.doc("seller_profiles", &uid).await.unwrap();
    assert_eq!(profile["approval_status"], "pending");
    assert_eq!(profile["farm_name"], "Green Acres");

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/auth/seller/login",
        None,
        &json!({"email": "grower@farm.test", "password": "secret123"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.unwrap()["message"]
        .as_str()
        .unwrap()
        .contains("pending"));
}

// ============================================================================
// Google / Logout / Me
// ============================================================================

#[tokio::test]
async fn test_google_sign_in_creates_account_once() {
    let app = TestApp::new();
    app.identity
        .issue_token("google-id-token", "g-1", Some("meera@gmail.test"))
        .await;

    let (status, body): (StatusCode, Option<MessageResponse>) = post_json(
        &app.router,
        "/api/auth/google",
        None,
        &json!({"idToken": "google-id-token"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.message, "Google OAuth success");
    assert_eq!(body.id.as_deref(), Some("g-1"));

    let user = app.doc("users", "g-1").await.unwrap();
    assert_eq!(user["full_name"], "meera");
    assert_eq!(user["google_id"], "g-1");
    assert!(app.doc("user_profiles", "g-1").await.is_some());
    let created_at = user["created_at"].clone();

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/auth/google",
        None,
        &json!({"idToken": "google-id-token"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.doc("users", "g-1").await.unwrap()["created_at"], created_at);
}

#[tokio::test]
async fn test_google_sign_in_requires_token() {
    let app = TestApp::new();

    let (status, body): (StatusCode, Option<Value>) =
        post_json(&app.router, "/api/auth/google", None, &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["message"], "idToken required");

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/auth/google",
        None,
        &json!({"idToken": "forged"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_sessions() {
    let app = TestApp::new();
    let token = app.login_as("u-logout", "user").await;

    let (status, body): (StatusCode, Option<MessageResponse>) =
        post_json(&app.router, "/api/auth/logout", Some(&token), &json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().message, "Logged out (tokens revoked)");
    assert_eq!(app.identity.revoked().await, vec!["u-logout".to_string()]);
}

#[tokio::test]
async fn test_me_resolves_role_from_store() {
    let app = TestApp::new();
    let token = app.login_as("s-me", "seller").await;

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app.router, "/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["uid"], "s-me");
    assert_eq!(body["role"], "seller");
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn test_me_rejects_missing_and_invalid_tokens() {
    let app = TestApp::new();

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app.router, "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.unwrap()["message"], "Missing Bearer token");

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app.router, "/api/auth/me", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.unwrap()["message"], "Invalid/expired token");
}
