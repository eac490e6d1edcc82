//! Integration tests for the cart flow.
//!
//! The server recomputes a cart's total on every mutation, so each test
//! checks the total alongside the item list.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p tiffin-api)
//!
//! Run with: cargo test -p tiffin-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use tiffin_integration_tests::{base_url, unique_email};

/// Register a throwaway account and return a bearer token.
async fn auth_token(client: &Client) -> String {
    let email = unique_email();

    let resp = client
        .post(format!("{}/register", base_url()))
        .json(&json!({
            "firstName": "Cart",
            "lastName": "Tester",
            "email": email,
            "password": "secret123",
        }))
        .send()
        .await
        .expect("Failed to register test account");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{}/login", base_url()))
        .json(&json!({ "email": email, "password": "secret123" }))
        .send()
        .await
        .expect("Failed to log in test account");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse login response");
    body["token"]
        .as_str()
        .expect("token is a string")
        .to_string()
}

/// Store a cart and return the normalized document the server answers with.
async fn save_cart(client: &Client, token: &str, id: &str, items: Value) -> Value {
    let resp = client
        .post(format!("{}/cart", base_url()))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "id": id, "items": items }))
        .send()
        .await
        .expect("Failed to save cart");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse cart response")
}

/// Fetch a cart document.
async fn get_cart(client: &Client, token: &str, id: &str) -> Value {
    let resp = client
        .get(format!("{}/cart/{id}", base_url()))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .expect("Failed to get cart");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse cart response")
}

/// Set one line's quantity and return the raw response.
async fn put_quantity(
    client: &Client,
    token: &str,
    cart_id: &str,
    item_id: &str,
    quantity: u32,
) -> reqwest::Response {
    client
        .put(format!("{}/cart/{cart_id}/item/{item_id}", base_url()))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "quantity": quantity }))
        .send()
        .await
        .expect("Failed to send quantity update")
}

/// Read a money field off the wire (serialized as a string).
fn decimal(value: &Value) -> f64 {
    value
        .as_str()
        .expect("money fields serialize as strings")
        .parse()
        .expect("money field parses as a number")
}

// ============================================================================
// Saving
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_save_cart_recomputes_total() {
    let client = Client::new();
    let token = auth_token(&client).await;
    let cart_id = Uuid::new_v4().to_string();

    let cart = save_cart(
        &client,
        &token,
        &cart_id,
        json!([
            { "itemId": "masala-dosa", "name": "Masala Dosa", "price": "60.00", "quantity": 2 },
            { "itemId": "chai", "name": "Chai", "price": "12.50", "quantity": 1 },
        ]),
    )
    .await;

    assert_eq!(cart["id"], cart_id.as_str());
    assert_eq!(cart["items"].as_array().expect("items is an array").len(), 2);
    assert!((decimal(&cart["totalPrice"]) - 132.5).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_client_supplied_total_is_ignored() {
    let client = Client::new();
    let token = auth_token(&client).await;
    let cart_id = Uuid::new_v4().to_string();

    let resp = client
        .post(format!("{}/cart", base_url()))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({
            "id": cart_id,
            "items": [
                { "itemId": "thali", "name": "Thali", "price": "80.00", "quantity": 2 },
            ],
            "totalPrice": "1.00",
        }))
        .send()
        .await
        .expect("Failed to save cart");

    assert_eq!(resp.status(), StatusCode::OK);
    let cart: Value = resp.json().await.expect("Failed to parse cart response");
    assert!((decimal(&cart["totalPrice"]) - 160.0).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_save_merges_duplicates_and_drops_zero_quantities() {
    let client = Client::new();
    let token = auth_token(&client).await;
    let cart_id = Uuid::new_v4().to_string();

    let cart = save_cart(
        &client,
        &token,
        &cart_id,
        json!([
            { "itemId": "thali", "name": "Thali", "price": "80.00", "quantity": 1 },
            { "itemId": "thali", "name": "Thali", "price": "80.00", "quantity": 2 },
            { "itemId": "lassi", "name": "Lassi", "price": "30.00", "quantity": 0 },
        ]),
    )
    .await;

    let items = cart["items"].as_array().expect("items is an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["itemId"], "thali");
    assert_eq!(items[0]["quantity"], 3);
    assert!((decimal(&cart["totalPrice"]) - 240.0).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_get_cart_roundtrip() {
    let client = Client::new();
    let token = auth_token(&client).await;
    let cart_id = Uuid::new_v4().to_string();

    let saved = save_cart(
        &client,
        &token,
        &cart_id,
        json!([
            { "itemId": "chai", "name": "Chai", "price": "12.50", "quantity": 4 },
        ]),
    )
    .await;

    let fetched = get_cart(&client, &token, &cart_id).await;
    assert_eq!(saved, fetched);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_second_save_replaces_first() {
    let client = Client::new();
    let token = auth_token(&client).await;
    let cart_id = Uuid::new_v4().to_string();

    save_cart(
        &client,
        &token,
        &cart_id,
        json!([
            { "itemId": "chai", "name": "Chai", "price": "12.50", "quantity": 1 },
        ]),
    )
    .await;

    save_cart(
        &client,
        &token,
        &cart_id,
        json!([
            { "itemId": "thali", "name": "Thali", "price": "80.00", "quantity": 1 },
        ]),
    )
    .await;

    // Whole-cart saves replace; the later write is the one that sticks
    let cart = get_cart(&client, &token, &cart_id).await;
    let items = cart["items"].as_array().expect("items is an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["itemId"], "thali");
    assert!((decimal(&cart["totalPrice"]) - 80.0).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_cart_requires_token() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/cart", base_url()))
        .json(&json!({ "id": "anonymous-cart", "items": [] }))
        .send()
        .await
        .expect("Failed to send cart request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Quantity Updates
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_update_item_quantity() {
    let client = Client::new();
    let token = auth_token(&client).await;
    let cart_id = Uuid::new_v4().to_string();

    save_cart(
        &client,
        &token,
        &cart_id,
        json!([
            { "itemId": "chai", "name": "Chai", "price": "12.50", "quantity": 1 },
        ]),
    )
    .await;

    let resp = put_quantity(&client, &token, &cart_id, "chai", 4).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = resp.json().await.expect("Failed to parse cart response");
    let items = cart["items"].as_array().expect("items is an array");
    assert_eq!(items[0]["quantity"], 4);
    assert!((decimal(&cart["totalPrice"]) - 50.0).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_zero_quantity_removes_item() {
    let client = Client::new();
    let token = auth_token(&client).await;
    let cart_id = Uuid::new_v4().to_string();

    save_cart(
        &client,
        &token,
        &cart_id,
        json!([
            { "itemId": "chai", "name": "Chai", "price": "12.50", "quantity": 2 },
            { "itemId": "thali", "name": "Thali", "price": "80.00", "quantity": 1 },
        ]),
    )
    .await;

    let resp = put_quantity(&client, &token, &cart_id, "chai", 0).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = resp.json().await.expect("Failed to parse cart response");
    let items = cart["items"].as_array().expect("items is an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["itemId"], "thali");
    assert!((decimal(&cart["totalPrice"]) - 80.0).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_update_unknown_item_is_a_noop() {
    let client = Client::new();
    let token = auth_token(&client).await;
    let cart_id = Uuid::new_v4().to_string();

    save_cart(
        &client,
        &token,
        &cart_id,
        json!([
            { "itemId": "chai", "name": "Chai", "price": "12.50", "quantity": 2 },
        ]),
    )
    .await;

    let resp = put_quantity(&client, &token, &cart_id, "no-such-item", 3).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = resp.json().await.expect("Failed to parse cart response");
    assert_eq!(cart["items"].as_array().expect("items is an array").len(), 1);
    assert!((decimal(&cart["totalPrice"]) - 25.0).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_update_unknown_cart_not_found() {
    let client = Client::new();
    let token = auth_token(&client).await;
    let cart_id = Uuid::new_v4().to_string();

    let resp = put_quantity(&client, &token, &cart_id, "chai", 1).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["error"], "Cart not found");
}

// ============================================================================
// Clearing
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_clear_cart_empties_items_and_total() {
    let client = Client::new();
    let token = auth_token(&client).await;
    let cart_id = Uuid::new_v4().to_string();

    save_cart(
        &client,
        &token,
        &cart_id,
        json!([
            { "itemId": "thali", "name": "Thali", "price": "80.00", "quantity": 2 },
        ]),
    )
    .await;

    let resp = client
        .delete(format!("{}/cart/{cart_id}/all", base_url()))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .expect("Failed to clear cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let cart = get_cart(&client, &token, &cart_id).await;
    assert!(
        cart["items"]
            .as_array()
            .expect("items is an array")
            .is_empty()
    );
    assert!(decimal(&cart["totalPrice"]).abs() < 1e-9);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_concurrent_quantity_updates_stay_consistent() {
    let client = Client::new();
    let token = auth_token(&client).await;
    let cart_id = Uuid::new_v4().to_string();

    save_cart(
        &client,
        &token,
        &cart_id,
        json!([
            { "itemId": "chai", "name": "Chai", "price": "10.00", "quantity": 2 },
            { "itemId": "thali", "name": "Thali", "price": "20.00", "quantity": 1 },
        ]),
    )
    .await;

    // Quantity updates are fetch-then-store with nothing guarding the gap,
    // so one of these two writes may clobber the other (last write wins).
    let (first, second) = tokio::join!(
        put_quantity(&client, &token, &cart_id, "chai", 5),
        put_quantity(&client, &token, &cart_id, "thali", 7),
    );
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);

    let cart = get_cart(&client, &token, &cart_id).await;
    let items = cart["items"].as_array().expect("items is an array");

    let quantity_of = |id: &str| {
        items
            .iter()
            .find(|item| item["itemId"] == id)
            .and_then(|item| item["quantity"].as_u64())
            .expect("item is present with a numeric quantity")
    };
    let outcome = (quantity_of("chai"), quantity_of("thali"));

    // Both applied, or exactly one lost to the race
    assert!(
        [(5, 7), (5, 1), (2, 7)].contains(&outcome),
        "unexpected cart state after racing updates: {outcome:?}"
    );

    // Whatever interleaving happened, the stored total matches the items
    let expected: f64 = items
        .iter()
        .map(|item| decimal(&item["price"]) * item["quantity"].as_f64().expect("quantity is numeric"))
        .sum();
    assert!((decimal(&cart["totalPrice"]) - expected).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_clear_unknown_cart_succeeds() {
    let client = Client::new();
    let token = auth_token(&client).await;

    // Clearing something that was never saved is not an error
    let resp = client
        .delete(format!("{}/cart/{}/all", base_url(), Uuid::new_v4()))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .expect("Failed to send clear request");

    assert_eq!(resp.status(), StatusCode::OK);
}
