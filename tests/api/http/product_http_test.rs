//! Product API HTTP Handler Tests

use super::{delete_json, get_json, patch_json, post_json, put_json, TestApp};
use axum::http::StatusCode;
use farmcart_core::api::{ItemsResponse, MessageResponse};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn product_body(slug: &str, sku: &str) -> Value {
    json!({
        "name": "Heirloom Tomato",
        "slug": slug,
        "sku": sku,
        "description": "Vine ripened",
        "category": "vegetables",
        "price": 40.0,
        "stock_quantity": 25,
        "images": ["https://img.test/tomato.jpg"]
    })
}

async fn seed_catalog(app: &TestApp) {
    let products = [
        ("p1", "Heirloom Tomato", "Red and juicy", "vegetables", 40.0, true),
        ("p2", "Baby Spinach", "Leafy greens", "vegetables", 25.0, true),
        ("p3", "Alphonso Mango", "Sweet tomato-free fruit", "fruits", 120.0, true),
        ("p4", "Old Carrot", "Discontinued", "vegetables", 30.0, false),
    ];
    for (id, name, description, category, price, is_active) in products {
        app.seed(
            "products",
            id,
            json!({
                "id": id,
                "seller_id": "s1",
                "name": name,
                "slug": id,
                "sku": format!("SKU-{}", id),
                "description": description,
                "category": category,
                "price": price,
                "is_active": is_active,
            }),
        )
        .await;
    }
}

fn ids(items: ItemsResponse<Value>) -> Vec<String> {
    let mut ids: Vec<String> = items
        .items
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_defaults_to_active_products() {
    let app = TestApp::new();
    seed_catalog(&app).await;

    let (status, body): (StatusCode, Option<ItemsResponse<Value>>) =
        get_json(&app.router, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(body.unwrap()), vec!["p1", "p2", "p3"]);

    let (_, body): (StatusCode, Option<ItemsResponse<Value>>) =
        get_json(&app.router, "/api/products?isActive=false", None).await;
    assert_eq!(ids(body.unwrap()), vec!["p4"]);
}

#[tokio::test]
async fn test_list_applies_category_and_price_range() {
    let app = TestApp::new();
    seed_catalog(&app).await;

    let (_, body): (StatusCode, Option<ItemsResponse<Value>>) = get_json(
        &app.router,
        "/api/products?category=vegetables&minPrice=30&maxPrice=50",
        None,
    )
    .await;
    assert_eq!(ids(body.unwrap()), vec!["p1"]);
}

#[tokio::test]
async fn test_list_search_matches_name_and_description() {
    let app = TestApp::new();
    seed_catalog(&app).await;

    let (_, body): (StatusCode, Option<ItemsResponse<Value>>) =
        get_json(&app.router, "/api/products?search=%20TOMATO%20", None).await;
    assert_eq!(ids(body.unwrap()), vec!["p1", "p3"]);

    let (_, body): (StatusCode, Option<ItemsResponse<Value>>) =
        get_json(&app.router, "/api/products?search=%20%20", None).await;
    assert_eq!(body.unwrap().items.len(), 3);
}

#[tokio::test]
async fn test_get_unknown_product_is_not_found() {
    let app = TestApp::new();

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app.router, "/api/products/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Product not found");
}

// ============================================================================
// Create / Update / Delete
// ============================================================================

#[tokio::test]
async fn test_approved_seller_creates_product() {
    let app = TestApp::new();
    let token = app.seller("s1", "approved").await;

    let (status, body): (StatusCode, Option<MessageResponse>) = post_json(
        &app.router,
        "/api/products",
        Some(&token),
        &product_body("heirloom-tomato", "TOM-1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body.message, "Product created");

    let (status, product): (StatusCode, Option<Value>) = get_json(
        &app.router,
        &format!("/api/products/{}", body.id.unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let product = product.unwrap();
    assert_eq!(product["seller_id"], "s1");
    assert_eq!(product["is_active"], true);
    assert_eq!(product["review_count"], 0);
}

#[tokio::test]
async fn test_create_rejects_duplicate_slug_and_sku() {
    let app = TestApp::new();
    let token = app.seller("s1", "approved").await;

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/products",
        Some(&token),
        &product_body("tomato", "TOM-1"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/products",
        Some(&token),
        &product_body("tomato", "TOM-2"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.unwrap()["message"], "slug must be unique");

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/products",
        Some(&token),
        &product_body("tomato-2", "TOM-1"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.unwrap()["message"], "sku must be unique");

    assert_eq!(app.store.count("products").await, 1);
}

#[tokio::test]
async fn test_buyer_cannot_create_product() {
    let app = TestApp::new();
    let token = app.login_as("buyer", "user").await;

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app.router,
        "/api/products",
        Some(&token),
        &product_body("tomato", "TOM-1"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.count("products").await, 0);
}

#[tokio::test]
async fn test_update_is_limited_to_owner() {
    let app = TestApp::new();
    seed_catalog(&app).await;
    let owner = app.seller("s1", "approved").await;
    let other = app.seller("s2", "approved").await;

    let (status, _): (StatusCode, Option<Value>) = put_json(
        &app.router,
        "/api/products/p1",
        Some(&other),
        &json!({"price": 1.0}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body): (StatusCode, Option<MessageResponse>) = put_json(
        &app.router,
        "/api/products/p1",
        Some(&owner),
        &json!({"price": 45.5, "slug": "p1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().message, "Product updated");

    let product = app.doc("products", "p1").await.unwrap();
    assert_eq!(product["price"], 45.5);
    assert_eq!(product["name"], "Heirloom Tomato");
}

#[tokio::test]
async fn test_update_slug_taken_by_other_product_is_conflict() {
    let app = TestApp::new();
    seed_catalog(&app).await;
    let owner = app.seller("s1", "approved").await;

    let (status, _): (StatusCode, Option<Value>) = put_json(
        &app.router,
        "/api/products/p1",
        Some(&owner),
        &json!({"slug": "p2"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(app.doc("products", "p1").await.unwrap()["slug"], "p1");
}

#[tokio::test]
async fn test_set_status_and_admin_delete() {
    let app = TestApp::new();
    seed_catalog(&app).await;
    let owner = app.seller("s1", "approved").await;
    let admin = app.login_as("root", "admin").await;

    let (status, body): (StatusCode, Option<Value>) = patch_json(
        &app.router,
        "/api/products/p1/status",
        Some(&owner),
        &json!({"is_active": false}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["message"], "Product status updated");
    assert_eq!(body["is_active"], false);
    assert_eq!(app.doc("products", "p1").await.unwrap()["is_active"], false);

    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&app.router, "/api/products/p1", Some(&owner)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&app.router, "/api/products/p1", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.doc("products", "p1").await.is_none());
}

// ============================================================================
// Variants
// ============================================================================

#[tokio::test]
async fn test_variant_lifecycle() {
    let app = TestApp::new();
    seed_catalog(&app).await;
    let owner = app.seller("s1", "approved").await;

    let (status, body): (StatusCode, Option<MessageResponse>) = post_json(
        &app.router,
        "/api/products/p1/variants",
        Some(&owner),
        &json!({"variant_name": "1 kg", "price": 75.0, "sku": "TOM-1KG", "stock_quantity": 10}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let variant_id = body.unwrap().id.unwrap();

    let (status, _): (StatusCode, Option<Value>) = put_json(
        &app.router,
        &format!("/api/products/p1/variants/{}", variant_id),
        Some(&owner),
        &json!({"price": 70.0}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list): (StatusCode, Option<ItemsResponse<Value>>) =
        get_json(&app.router, "/api/products/p1/variants", None).await;
    let list = list.unwrap();
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0]["price"], 70.0);
    assert_eq!(list.items[0]["variant_name"], "1 kg");

    // Variant addressed through a product it does not belong to
    let (status, body): (StatusCode, Option<Value>) = put_json(
        &app.router,
        &format!("/api/products/p2/variants/{}", variant_id),
        Some(&owner),
        &json!({"price": 1.0}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Variant not found");

    let (status, _): (StatusCode, Option<Value>) = delete_json(
        &app.router,
        &format!("/api/products/p1/variants/{}", variant_id),
        Some(&owner),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.store.count("product_variants").await, 0);
}

#[tokio::test]
async fn test_variant_of_another_sellers_product_is_untouchable() {
    let app = TestApp::new();
    seed_catalog(&app).await;
    let s1 = app.seller("s1", "approved").await;
    app.seller("s2", "approved").await;
    app.seed(
        "products",
        "p5",
        json!({"id": "p5", "seller_id": "s2", "name": "Duck Eggs", "slug": "p5", "sku": "SKU-p5", "price": 60.0, "is_active": true}),
    )
    .await;
    app.seed(
        "product_variants",
        "v2",
        json!({"id": "v2", "product_id": "p5", "variant_name": "Dozen", "price": 60.0, "sku": "DE-12"}),
    )
    .await;

    // s1 owns p1, but v2 hangs off p5
    let (status, body): (StatusCode, Option<Value>) = put_json(
        &app.router,
        "/api/products/p1/variants/v2",
        Some(&s1),
        &json!({"price": 1.0}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Variant not found");

    let (status, body): (StatusCode, Option<Value>) =
        delete_json(&app.router, "/api/products/p1/variants/v2", Some(&s1)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Variant not found");

    let v2 = app.doc("product_variants", "v2").await.unwrap();
    assert_eq!(v2["price"], 60.0);

    // Through the real product, s1 still fails the ownership check
    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&app.router, "/api/products/p5/variants/v2", Some(&s1)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(app.doc("product_variants", "v2").await.is_some());
}

#[tokio::test]
async fn test_product_id_cannot_escape_collection() {
    let app = TestApp::new();
    seed_catalog(&app).await;
    app.login_as("u1", "user").await;

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app.router, "/api/products/..%2Fusers%2Fu1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap().get("email").is_none());
}
