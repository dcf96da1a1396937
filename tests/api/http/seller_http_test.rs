//! Seller and admin API HTTP Handler Tests

use super::{get_json, patch_json, post_json, put_json, TestApp};
use axum::http::StatusCode;
use farmcart_core::api::{ItemsResponse, MessageResponse};
use farmcart_core::domain::SellerStats;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn product_body() -> Value {
    json!({
        "name": "Raw Honey",
        "slug": "raw-honey",
        "sku": "HON-1",
        "price": 350.0,
        "stock_quantity": 12
    })
}

// ============================================================================
// Approval workflow
// ============================================================================

#[tokio::test]
async fn test_pending_seller_blocked_until_admin_approves() {
    let app = TestApp::new();
    let seller = app.seller("s1", "pending").await;
    let admin = app.login_as("root", "admin").await;

    let (status, body): (StatusCode, Option<Value>) =
        post_json(&app.router, "/api/products", Some(&seller), &product_body()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.unwrap()["message"]
        .as_str()
        .unwrap()
        .contains("pending"));

    let (status, body): (StatusCode, Option<MessageResponse>) = patch_json(
        &app.router,
        "/api/admin/sellers/s1/approve",
        Some(&admin),
        &json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().message, "Seller approved");

    let profile = app.doc("seller_profiles", "s1").await.unwrap();
    assert_eq!(profile["approval_status"], "approved");
    assert_eq!(profile["is_verified"], true);
    assert_eq!(profile["farm_name"], "s1 farm");
    let user = app.doc("users", "s1").await.unwrap();
    assert_eq!(user["role"], "seller");
    assert_eq!(user["status"], "active");

    let (status, _): (StatusCode, Option<Value>) =
        post_json(&app.router, "/api/products", Some(&seller), &product_body()).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_approve_unknown_seller_is_not_found() {
    let app = TestApp::new();
    let admin = app.login_as("root", "admin").await;

    let (status, _): (StatusCode, Option<Value>) = patch_json(
        &app.router,
        "/api/admin/sellers/ghost/approve",
        Some(&admin),
        &json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.doc("users", "ghost").await.is_none());
}

#[tokio::test]
async fn test_reject_records_reason() {
    let app = TestApp::new();
    app.seller("s1", "pending").await;
    let admin = app.login_as("root", "admin").await;

    let (status, body): (StatusCode, Option<MessageResponse>) = patch_json(
        &app.router,
        "/api/admin/sellers/s1/reject",
        Some(&admin),
        &json!({"rejection_reason": "Missing certification"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().message, "Seller rejected");

    let profile = app.doc("seller_profiles", "s1").await.unwrap();
    assert_eq!(profile["approval_status"], "rejected");
    assert_eq!(profile["rejection_reason"], "Missing certification");
}

#[tokio::test]
async fn test_admin_endpoints_reject_non_admins() {
    let app = TestApp::new();
    let seller = app.seller("s1", "approved").await;

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app.router, "/api/admin/sellers", Some(&seller)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _): (StatusCode, Option<Value>) = patch_json(
        &app.router,
        "/api/admin/sellers/s1/approve",
        Some(&seller),
        &json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_suspended_admin_is_forbidden() {
    let app = TestApp::new();
    let admin = app.login_with_status("root", "admin", "suspended").await;

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app.router, "/api/admin/stats", Some(&admin)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.unwrap()["message"], "Account status: suspended");
}

#[tokio::test]
async fn test_set_seller_status_and_list() {
    let app = TestApp::new();
    app.seller("s1", "approved").await;
    app.seller("s2", "pending").await;
    let admin = app.login_as("root", "admin").await;

    let (status, body): (StatusCode, Option<Value>) = patch_json(
        &app.router,
        "/api/admin/sellers/s1/status",
        Some(&admin),
        &json!({"status": "suspended"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["message"], "Seller user status updated");
    assert_eq!(body["status"], "suspended");
    assert_eq!(app.doc("users", "s1").await.unwrap()["status"], "suspended");

    let (status, _): (StatusCode, Option<Value>) = patch_json(
        &app.router,
        "/api/admin/sellers/s1/status",
        Some(&admin),
        &json!({"status": "sleeping"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list): (StatusCode, Option<ItemsResponse<Value>>) =
        get_json(&app.router, "/api/admin/sellers", Some(&admin)).await;
    assert_eq!(list.unwrap().items.len(), 2);
}

#[tokio::test]
async fn test_admin_stats_counts_collections() {
    let app = TestApp::new();
    app.seller("s1", "approved").await;
    let admin = app.login_as("root", "admin").await;
    app.seed("products", "p1", json!({"id": "p1", "seller_id": "s1"}))
        .await;
    app.seed("blogs", "b1", json!({"id": "b1"})).await;

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app.router, "/api/admin/stats", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["users"], 2);
    assert_eq!(body["sellers"], 1);
    assert_eq!(body["products"], 1);
    assert_eq!(body["blogs"], 1);
    assert_eq!(body["orders"], 0);
}

// ============================================================================
// Seller profile and dashboards
// ============================================================================

#[tokio::test]
async fn test_seller_cannot_self_approve_through_profile_update() {
    let app = TestApp::new();
    let seller = app.seller("s1", "pending").await;

    let (status, _): (StatusCode, Option<MessageResponse>) = put_json(
        &app.router,
        "/api/sellers/s1",
        Some(&seller),
        &json!({"farm_name": "Sunrise Farm", "approval_status": "approved"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, profile): (StatusCode, Option<Value>) =
        get_json(&app.router, "/api/sellers/s1", None).await;
    assert_eq!(status, StatusCode::OK);
    let profile = profile.unwrap();
    assert_eq!(profile["farm_name"], "Sunrise Farm");
    assert_eq!(profile["approval_status"], "pending");
}

#[tokio::test]
async fn test_seller_cannot_edit_another_profile() {
    let app = TestApp::new();
    app.seller("s1", "approved").await;
    let other = app.seller("s2", "approved").await;

    let (status, _): (StatusCode, Option<Value>) = put_json(
        &app.router,
        "/api/sellers/s1",
        Some(&other),
        &json!({"farm_name": "Hijacked"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        app.doc("seller_profiles", "s1").await.unwrap()["farm_name"],
        "s1 farm"
    );
}

#[tokio::test]
async fn test_seller_stats_aggregate_orders_and_reviews() {
    let app = TestApp::new();
    let seller = app.seller("s1", "approved").await;

    app.seed("products", "p1", json!({"id": "p1", "seller_id": "s1", "is_active": true}))
        .await;
    app.seed("products", "p2", json!({"id": "p2", "seller_id": "s1", "is_active": false}))
        .await;
    app.seed(
        "orders",
        "o1",
        json!({"id": "o1", "seller_id": "s1", "status": "pending", "total_amount": 100.0}),
    )
    .await;
    app.seed(
        "orders",
        "o2",
        json!({"id": "o2", "seller_id": "s1", "status": "delivered", "total_amount": 250.5}),
    )
    .await;
    app.seed("reviews", "r1", json!({"id": "r1", "seller_id": "s1", "rating": 4}))
        .await;
    app.seed("reviews", "r2", json!({"id": "r2", "seller_id": "s1", "rating": 5}))
        .await;

    let (status, stats): (StatusCode, Option<SellerStats>) =
        get_json(&app.router, "/api/sellers/s1/stats", Some(&seller)).await;
    assert_eq!(status, StatusCode::OK);
    let stats = stats.unwrap();
    assert_eq!(stats.total_products, 2);
    assert_eq!(stats.active_products, 1);
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.pending_orders, 1);
    assert_eq!(stats.completed_orders, 1);
    assert_eq!(stats.total_revenue, 350.5);
    assert_eq!(stats.average_rating, 4.5);
    assert_eq!(stats.total_reviews, 2);

    let (status, dashboard): (StatusCode, Option<Value>) = get_json(
        &app.router,
        "/api/sellers/s1/dashboard-stats",
        Some(&seller),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard.unwrap(), json!({"products": 2, "orders": 2}));

    let (_, products): (StatusCode, Option<ItemsResponse<Value>>) =
        get_json(&app.router, "/api/sellers/s1/products", None).await;
    assert_eq!(products.unwrap().items.len(), 2);
}
