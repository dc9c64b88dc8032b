//! Integration tests for products and carts over HTTP.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{Value, json};

use minimart_integration_tests::TestContext;

async fn message(resp: reqwest::Response) -> String {
    let body: Value = resp.json().await.unwrap();
    body["message"].as_str().unwrap().to_string()
}

async fn list_cart(ctx: &TestContext, token: &str) -> Vec<Value> {
    let resp = ctx
        .authed(ctx.client.get(ctx.url("/carts")), token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

async fn add(ctx: &TestContext, token: &str, body: &Value) -> reqwest::Response {
    ctx.authed(ctx.client.post(ctx.url("/carts")), token)
        .json(body)
        .send()
        .await
        .unwrap()
}

// ============================================================================
// GET /products
// ============================================================================

#[tokio::test]
async fn test_list_products() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    let resp = ctx
        .authed(ctx.client.get(ctx.url("/products")), &token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Value> = resp.json().await.unwrap();
    let ids: Vec<i64> = products.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);

    let bananas = &products[0];
    assert_eq!(bananas["name"], "Organic Bananas");
    assert_eq!(bananas["slug"], "organic-bananas");
    assert_eq!(
        bananas["image"],
        "https://cdn.minimart.example/products/organic-bananas.jpg"
    );
    assert!((bananas["sales_price"].as_f64().unwrap() - 1.99).abs() < 1e-9);
}

// ============================================================================
// Cart flows
// ============================================================================

#[tokio::test]
async fn test_empty_cart_is_empty_array() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    assert!(list_cart(&ctx, &token).await.is_empty());
}

#[tokio::test]
async fn test_alice_add_update_delete() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    let resp = add(&ctx, &token, &json!({ "productId": 7, "quantity": 2 })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(message(resp).await, "Successfully added to cart");

    let items = list_cart(&ctx, &token).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 7);
    assert_eq!(items[0]["quantity"], 2);

    let resp = ctx
        .authed(ctx.client.put(ctx.url("/carts/7")), &token)
        .json(&json!({ "quantity": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(message(resp).await, "Successfully updated in cart");

    let items = list_cart(&ctx, &token).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 7);
    assert_eq!(items[0]["quantity"], 5);

    let resp = ctx
        .authed(ctx.client.delete(ctx.url("/carts/7")), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(message(resp).await, "Successfully deleted in cart");

    assert!(list_cart(&ctx, &token).await.is_empty());
}

#[tokio::test]
async fn test_bob_duplicate_add() {
    let ctx = TestContext::new().await;
    let token = ctx.login("bob", "builder").await;

    let resp = add(&ctx, &token, &json!({ "productId": 3, "quantity": 1 })).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = add(&ctx, &token, &json!({ "productId": 3, "quantity": 4 })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message(resp).await,
        "Product already in cart instead use PUT to update cart"
    );

    let items = list_cart(&ctx, &token).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 3);
    assert_eq!(items[0]["quantity"], 1);
}

#[tokio::test]
async fn test_add_accepts_id_alias() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    let resp = add(&ctx, &token, &json!({ "id": 2, "quantity": 1 })).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let items = list_cart(&ctx, &token).await;
    assert_eq!(items[0]["id"], 2);
    assert_eq!(items[0]["name"], "Whole Milk 1L");
}

#[tokio::test]
async fn test_add_unknown_product() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    let resp = add(&ctx, &token, &json!({ "productId": 100, "quantity": 1 })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Product with productID:100 does not exist");

    assert!(list_cart(&ctx, &token).await.is_empty());
}

#[tokio::test]
async fn test_add_rejects_non_positive_quantity() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    for quantity in [0, -3] {
        let resp = add(&ctx, &token, &json!({ "productId": 1, "quantity": quantity })).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(resp).await, "Quantity must be a positive integer");
    }

    assert!(list_cart(&ctx, &token).await.is_empty());
}

#[tokio::test]
async fn test_update_missing_item() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    let resp = ctx
        .authed(ctx.client.put(ctx.url("/carts/4")), &token)
        .json(&json!({ "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Product does not exist in cart");

    // No entry is created by a failed update
    assert!(list_cart(&ctx, &token).await.is_empty());
}

#[tokio::test]
async fn test_update_path_id_wins_over_body() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    add(&ctx, &token, &json!({ "productId": 1, "quantity": 1 })).await;
    add(&ctx, &token, &json!({ "productId": 2, "quantity": 1 })).await;

    let resp = ctx
        .authed(ctx.client.put(ctx.url("/carts/1")), &token)
        .json(&json!({ "productId": 2, "quantity": 9 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let items = list_cart(&ctx, &token).await;
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["quantity"], 9);
    assert_eq!(items[1]["id"], 2);
    assert_eq!(items[1]["quantity"], 1);
}

#[tokio::test]
async fn test_unparseable_path_id() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    let resp = ctx
        .authed(ctx.client.delete(ctx.url("/carts/abc")), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Unable to parse productID:abc");
}

#[tokio::test]
async fn test_delete_missing_item() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    let resp = ctx
        .authed(ctx.client.delete(ctx.url("/carts/5")), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Product does not exist in cart");
}

#[tokio::test]
async fn test_carts_are_per_identity() {
    let ctx = TestContext::new().await;
    let alice = ctx.login("alice", "wonderland").await;
    let bob = ctx.login("bob", "builder").await;

    add(&ctx, &alice, &json!({ "productId": 1, "quantity": 1 })).await;

    assert_eq!(list_cart(&ctx, &alice).await.len(), 1);
    assert!(list_cart(&ctx, &bob).await.is_empty());

    // bob can add the same product independently
    let resp = add(&ctx, &bob, &json!({ "productId": 1, "quantity": 3 })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(list_cart(&ctx, &alice).await[0]["quantity"], 1);
}

#[tokio::test]
async fn test_idle_cart_expires() {
    let ctx = TestContext::with_cart_ttl(Duration::from_millis(200)).await;
    let token = ctx.login("alice", "wonderland").await;

    add(&ctx, &token, &json!({ "productId": 6, "quantity": 1 })).await;
    assert_eq!(list_cart(&ctx, &token).await.len(), 1);

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(list_cart(&ctx, &token).await.is_empty());
}

// ============================================================================
// Malformed input
// ============================================================================

#[tokio::test]
async fn test_non_utf8_path_id_is_json_message() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    let requests = [
        ctx.client.delete(ctx.url("/carts/%FF")),
        ctx.client.put(ctx.url("/carts/%FF")).json(&json!({ "quantity": 1 })),
    ];

    for request in requests {
        let resp = ctx.authed(request, &token).send().await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers()["content-type"].to_str().unwrap(),
            "application/json"
        );
        assert!(!message(resp).await.is_empty());
    }
}

#[tokio::test]
async fn test_add_malformed_body() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    let bodies = [
        "{\"productId\": 1, \"quantity\":",
        "{\"productId\": \"one\", \"quantity\": 1}",
        "not json at all",
    ];

    for body in bodies {
        let resp = ctx
            .authed(ctx.client.post(ctx.url("/carts")), &token)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        assert!(!message(resp).await.is_empty(), "{body}");
    }

    assert!(list_cart(&ctx, &token).await.is_empty());
}

#[tokio::test]
async fn test_add_without_json_content_type() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    let resp = ctx
        .authed(ctx.client.post(ctx.url("/carts")), &token)
        .body("productId=1&quantity=1")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!message(resp).await.is_empty());
}

#[tokio::test]
async fn test_update_malformed_body() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    add(&ctx, &token, &json!({ "productId": 1, "quantity": 2 })).await;

    let resp = ctx
        .authed(ctx.client.put(ctx.url("/carts/1")), &token)
        .header("Content-Type", "application/json")
        .body("{\"quantity\": \"lots\"}")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!message(resp).await.is_empty());
    assert_eq!(list_cart(&ctx, &token).await[0]["quantity"], 2);
}

#[tokio::test]
async fn test_update_rejects_zero_quantity() {
    let ctx = TestContext::new().await;
    let token = ctx.login("alice", "wonderland").await;

    add(&ctx, &token, &json!({ "productId": 1, "quantity": 2 })).await;

    let resp = ctx
        .authed(ctx.client.put(ctx.url("/carts/1")), &token)
        .json(&json!({ "quantity": 0 }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Quantity must be a positive integer");
    assert_eq!(list_cart(&ctx, &token).await[0]["quantity"], 2);
}
