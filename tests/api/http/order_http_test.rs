//! Order API HTTP Handler Tests

use super::{get_json, patch_json, post_json, TestApp};
use axum::http::StatusCode;
use farmcart_core::api::{ItemsResponse, MessageResponse};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

async fn seed_product(app: &TestApp) {
    app.seed(
        "products",
        "p1",
        json!({
            "id": "p1",
            "seller_id": "s1",
            "name": "Farm Eggs",
            "price": 90.0,
            "images": ["https://img.test/eggs.jpg", "https://img.test/eggs-2.jpg"],
            "is_active": true
        }),
    )
    .await;
}

fn order_body(payment_method: &str) -> Value {
    json!({
        "seller_id": "s1",
        "items": [{"product_id": "p1", "quantity": 2}],
        "payment_method": payment_method,
        "subtotal": 180.0,
        "delivery_fee": 20.0,
        "total_amount": 200.0,
        "customer_phone": "9000000001",
        "delivery_address": {"city": "Pune", "pincode": "411001"},
        "tracking_location": "Pune hub"
    })
}

/// Place an order as `buyer` and return its id
async fn place_order(app: &TestApp, token: &str, payment_method: &str) -> String {
    let (status, body): (StatusCode, Option<MessageResponse>) = post_json(
        &app.router,
        "/api/orders",
        Some(token),
        &order_body(payment_method),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body.unwrap().id.unwrap()
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_order_writes_items_and_tracking() {
    let app = TestApp::new();
    seed_product(&app).await;
    let buyer = app.login_as("u1", "user").await;

    let (status, body): (StatusCode, Option<MessageResponse>) =
        post_json(&app.router, "/api/orders", Some(&buyer), &order_body("cod")).await;
    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body.message, "Order created");
    let order_id = body.id.unwrap();
    let order_number = body.extra["order_number"].as_str().unwrap().to_string();
    assert!(order_number.starts_with("ORD-"));
    assert_eq!(order_number.rsplit('-').next().unwrap().len(), 8);

    let order = app.doc("orders", &order_id).await.unwrap();
    assert_eq!(order["user_id"], "u1");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["payment_status"], "pending");
    assert_eq!(order["customer_email"], "u1@farm.test");

    let items = app.docs("order_items").await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product_name"], "Farm Eggs");
    assert_eq!(items[0]["product_image"], "https://img.test/eggs.jpg");
    assert_eq!(items[0]["unit_price"], 90.0);
    assert_eq!(items[0]["total_price"], 0.0);
    assert_eq!(items[0]["quantity"], 2);

    let tracking = app.docs("order_tracking").await;
    assert_eq!(tracking.len(), 1);
    assert_eq!(tracking[0]["status"], "pending");
    assert_eq!(tracking[0]["description"], "Order created");
    assert_eq!(tracking[0]["location"], "Pune hub");

    // Cash on delivery needs no transaction
    assert!(app.docs("transactions").await.is_empty());
}

#[tokio::test]
async fn test_online_order_records_pending_transaction() {
    let app = TestApp::new();
    seed_product(&app).await;
    let buyer = app.login_as("u1", "user").await;

    let order_id = place_order(&app, &buyer, "upi").await;

    let transactions = app.docs("transactions").await;
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["order_id"], json!(order_id));
    assert_eq!(transactions[0]["status"], "pending");
    assert_eq!(transactions[0]["amount"], 200.0);
    assert_eq!(transactions[0]["payment_method"], "upi");
}

#[tokio::test]
async fn test_create_order_validation() {
    let app = TestApp::new();
    let buyer = app.login_as("u1", "user").await;

    let cases = [
        (
            json!({"items": [{"product_id": "p1"}]}),
            "seller_id required (single seller per order)",
        ),
        (json!({"seller_id": "s1", "items": []}), "items required"),
        (
            json!({"seller_id": "s1", "items": [{"quantity": 1}]}),
            "Each item needs product_id",
        ),
        (
            json!({"seller_id": "s1", "items": [{"product_id": "../users/u1"}]}),
            "Invalid document id: \"../users/u1\"",
        ),
    ];
    for (payload, message) in cases {
        let (status, body): (StatusCode, Option<Value>) =
            post_json(&app.router, "/api/orders", Some(&buyer), &payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.unwrap()["message"], message);
    }
    assert_eq!(app.store.count("orders").await, 0);
}

// ============================================================================
// Read access
// ============================================================================

#[tokio::test]
async fn test_track_requires_matching_phone() {
    let app = TestApp::new();
    seed_product(&app).await;
    let buyer = app.login_as("u1", "user").await;
    let order_id = place_order(&app, &buyer, "cod").await;

    let (status, body): (StatusCode, Option<Value>) = get_json(
        &app.router,
        &format!("/api/orders/track?orderId={}&phone=9000000001", order_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["order"]["id"], json!(order_id));
    assert_eq!(body["tracking"].as_array().unwrap().len(), 1);

    let (status, body): (StatusCode, Option<Value>) = get_json(
        &app.router,
        &format!("/api/orders/track?orderId={}&phone=9999999999", order_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.unwrap()["message"], "Phone mismatch");

    let (status, _): (StatusCode, Option<Value>) = get_json(
        &app.router,
        "/api/orders/track?orderId=missing&phone=9000000001",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_details_visible_to_buyer_seller_and_admin_only() {
    let app = TestApp::new();
    seed_product(&app).await;
    let buyer = app.login_as("u1", "user").await;
    let seller = app.seller("s1", "approved").await;
    let admin = app.login_as("root", "admin").await;
    let stranger = app.login_as("u2", "user").await;
    let order_id = place_order(&app, &buyer, "cod").await;
    let path = format!("/api/orders/{}", order_id);

    for token in [&buyer, &seller, &admin] {
        let (status, body): (StatusCode, Option<Value>) =
            get_json(&app.router, &path, Some(token)).await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["tracking"].as_array().unwrap().len(), 1);
    }

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app.router, &path, Some(&stranger)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_order_listings_enforce_ownership() {
    let app = TestApp::new();
    seed_product(&app).await;
    let buyer = app.login_as("u1", "user").await;
    let stranger = app.login_as("u2", "user").await;
    let seller = app.seller("s1", "approved").await;
    let admin = app.login_as("root", "admin").await;
    place_order(&app, &buyer, "cod").await;

    let (status, body): (StatusCode, Option<ItemsResponse<Value>>) =
        get_json(&app.router, "/api/orders/user/u1", Some(&buyer)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().items.len(), 1);

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app.router, "/api/orders/user/u1", Some(&stranger)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body): (StatusCode, Option<ItemsResponse<Value>>) =
        get_json(&app.router, "/api/orders/seller/s1", Some(&seller)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().items.len(), 1);

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app.router, "/api/orders", Some(&buyer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body): (StatusCode, Option<ItemsResponse<Value>>) =
        get_json(&app.router, "/api/orders", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().items.len(), 1);
}

// ============================================================================
// Status and payment updates
// ============================================================================

#[tokio::test]
async fn test_seller_updates_status_and_tracking_grows() {
    let app = TestApp::new();
    seed_product(&app).await;
    let buyer = app.login_as("u1", "user").await;
    let seller = app.seller("s1", "approved").await;
    let other_seller = app.seller("s2", "approved").await;
    let order_id = place_order(&app, &buyer, "cod").await;
    let path = format!("/api/orders/{}/status", order_id);

    let (status, _): (StatusCode, Option<Value>) = patch_json(
        &app.router,
        &path,
        Some(&other_seller),
        &json!({"status": "shipped"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body): (StatusCode, Option<Value>) = patch_json(
        &app.router,
        &path,
        Some(&seller),
        &json!({"status": "shipped", "location": "Mumbai", "description": "Handed to courier"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["message"], "Order status updated");
    assert_eq!(body["status"], "shipped");

    assert_eq!(app.doc("orders", &order_id).await.unwrap()["status"], "shipped");
    let tracking = app.docs("order_tracking").await;
    assert_eq!(tracking.len(), 2);
    assert!(tracking
        .iter()
        .any(|t| t["status"] == "shipped" && t["updated_by"] == "s1"));

    let (status, _): (StatusCode, Option<Value>) =
        patch_json(&app.router, &path, Some(&buyer), &json!({"status": "delivered"})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_payment_update_mirrors_onto_transactions() {
    let app = TestApp::new();
    seed_product(&app).await;
    let buyer = app.login_as("u1", "user").await;
    let admin = app.login_as("root", "admin").await;
    let order_id = place_order(&app, &buyer, "online").await;

    let (status, body): (StatusCode, Option<Value>) = patch_json(
        &app.router,
        &format!("/api/orders/{}/payment", order_id),
        Some(&admin),
        &json!({
            "payment_status": "paid",
            "transaction_status": "success",
            "transaction_id": "pay_123",
            "gateway_response": {"provider": "razorpay"}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["payment_status"], "paid");

    assert_eq!(
        app.doc("orders", &order_id).await.unwrap()["payment_status"],
        "paid"
    );
    let transactions = app.docs("transactions").await;
    assert_eq!(transactions[0]["status"], "success");
    assert_eq!(transactions[0]["transaction_id"], "pay_123");
    assert_eq!(transactions[0]["gateway_response"]["provider"], "razorpay");
    assert_eq!(transactions[0]["amount"], 200.0);
}
