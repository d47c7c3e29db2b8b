//! Product form and deletion through the HTTP API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use gemini_store_integration_tests::{TestApp, sample_products};
use serde_json::{Value, json};

async fn set_field(app: &TestApp, field: &str, value: &str) -> (StatusCode, Value) {
    app.post("/api/products/form/field", json!({ "field": field, "value": value }))
        .await
}

#[tokio::test]
async fn test_form_is_closed_by_default() {
    let app = TestApp::ready(&sample_products(2)).await;

    let (status, _) = app.get("/api/products/form").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.post_empty("/api/products/form/submit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_goes_to_front() {
    let app = TestApp::ready(&sample_products(9)).await;

    let (status, form) = app.post("/api/products/form", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["mode"], "create");
    assert_eq!(form["productId"], Value::Null);
    assert_eq!(form["draft"]["name"], "");
    assert!(
        form["draft"]["imageUrl"]
            .as_str()
            .unwrap()
            .starts_with("https://picsum.photos/seed/")
    );

    set_field(&app, "name", "Desk Lamp").await;
    set_field(&app, "category", "Home Goods").await;
    let (_, form) = set_field(&app, "price", "24.5").await;
    assert_eq!(form["draft"]["price"], 24.5);

    let (status, product) = app.post_empty("/api/products/form/submit").await;
    assert_eq!(status, StatusCode::OK);
    assert!(product["id"].as_str().unwrap().starts_with("prod-"));
    assert_eq!(product["name"], "Desk Lamp");

    let (_, page) = app.get("/api/catalog").await;
    assert_eq!(page["totalMatches"], 10);
    assert_eq!(page["items"][0]["name"], "Desk Lamp");

    let (status, _) = app.get("/api/products/form").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, notice) = app.get("/api/notice").await;
    assert_eq!(notice["message"], "Product added successfully!");
}

#[tokio::test]
async fn test_edit_product_in_place() {
    let app = TestApp::ready(&sample_products(3)).await;

    let (status, form) = app
        .post("/api/products/form", json!({ "productId": "gen-1" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["mode"], "edit");
    assert_eq!(form["productId"], "gen-1");
    assert_eq!(form["draft"]["name"], "Sample 1");

    set_field(&app, "name", "Renamed").await;
    let (_, form) = set_field(&app, "price", "not a number").await;
    assert_eq!(form["draft"]["price"], 0.0);

    let (_, product) = app.post_empty("/api/products/form/submit").await;
    assert_eq!(product["id"], "gen-1");

    let (_, page) = app.get("/api/catalog").await;
    assert_eq!(page["totalMatches"], 3);
    assert_eq!(page["items"][1]["name"], "Renamed");

    let (_, notice) = app.get("/api/notice").await;
    assert_eq!(notice["message"], "Product updated successfully!");
}

#[tokio::test]
async fn test_edit_unknown_product_is_not_found() {
    let app = TestApp::ready(&sample_products(1)).await;

    let (status, _) = app
        .post("/api/products/form", json!({ "productId": "missing" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_field_is_bad_request() {
    let app = TestApp::ready(&sample_products(1)).await;
    app.post("/api/products/form", json!({})).await;

    let (status, body) = set_field(&app, "sku", "X-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("sku"));
}

#[tokio::test]
async fn test_close_form_discards_draft() {
    let app = TestApp::ready(&sample_products(1)).await;
    app.post("/api/products/form", json!({})).await;
    set_field(&app, "name", "Never saved").await;

    let (status, body) = app.delete("/api/products/form").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, page) = app.get("/api/catalog").await;
    assert_eq!(page["totalMatches"], 1);
}

#[tokio::test]
async fn test_delete_product_keeps_cart_lines() {
    let app = TestApp::ready(&sample_products(3)).await;
    app.post("/api/cart/add", json!({ "productId": "gen-0" })).await;

    let (status, _) = app.delete("/api/products/gen-0").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, page) = app.get("/api/catalog").await;
    assert_eq!(page["totalMatches"], 2);
    assert_ne!(page["items"][0]["id"], "gen-0");

    let (_, cart) = app.get("/api/cart").await;
    assert_eq!(cart["items"][0]["productId"], "gen-0");

    let (_, notice) = app.get("/api/notice").await;
    assert_eq!(notice["message"], "Product deleted.");
    assert_eq!(notice["kind"], "info");
}

