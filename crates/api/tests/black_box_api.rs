use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use reqwest::StatusCode;
use serde_json::json;

use leafy_api::app::build_router;
use leafy_api::jwt::JwtCodec;
use leafy_core::StoreConfig;
use leafy_store::{MemoryStore, Storefront, TracingNotifier};

const JWT_SECRET: &str = "test-secret";
const ADMIN: (&str, &str) = ("sulvianti", "admin-pw");

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let storefront = Storefront::new(
            Arc::new(MemoryStore::new()),
            Arc::new(TracingNotifier),
            StoreConfig::default(),
        );
        storefront.seed_admin(ADMIN.0, ADMIN.1).await.unwrap();

        let app = build_router(storefront, JwtCodec::new(JWT_SECRET));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn login(client: &reqwest::Client, base_url: &str, username: &str, password: &str) -> String {
    let res = client
        .post(format!("{}/login", base_url))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn seed_batches(client: &reqwest::Client, base_url: &str, token: &str) {
    let today = Utc::now().date_naive();
    let week_ago = (today - ChronoDuration::days(7)).to_string();

    let res = client
        .post(format!("{}/batches", base_url))
        .bearer_auth(token)
        .json(&json!([
            {
                "id": 1,
                "plantDate": week_ago,
                "quantity": 10,
                "stock": 10,
                "readyForSale": true
            },
            {
                "id": 2,
                "name": "Bibit Tomat",
                "plantDate": week_ago,
                "quantity": 20,
                "stock": 20,
                "readyForSale": false
            }
        ]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

fn order_body(batch_id: u32, quantity: u32, phone: &str) -> serde_json::Value {
    json!({
        "batchId": batch_id,
        "quantity": quantity,
        "phone": phone,
        "address": "Jl. Kebun 12",
        "delivery": "deliver",
        "payment": "transfer"
    })
}

#[tokio::test]
async fn admin_manages_batches_and_public_sees_them() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Unauthenticated writes are rejected.
    let res = client
        .post(format!("{}/batches", server.base_url))
        .json(&json!([]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let token = login(&client, &server.base_url, ADMIN.0, ADMIN.1).await;
    seed_batches(&client, &server.base_url, &token).await;

    // Public listing, no token needed; the unnamed batch got the default label.
    let res = client
        .get(format!("{}/batches", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let batches: serde_json::Value = res.json().await.unwrap();
    assert_eq!(batches.as_array().unwrap().len(), 2);
    assert_eq!(batches[0]["name"], "Bibit Cabai");
    assert_eq!(batches[1]["name"], "Bibit Tomat");

    // Delete one and it disappears.
    let res = client
        .delete(format!("{}/batches/2", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/batches", server.base_url))
        .send()
        .await
        .unwrap();
    let batches: serde_json::Value = res.json().await.unwrap();
    assert_eq!(batches.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn guest_order_flow_decrements_stock_and_is_phone_lookupable() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let token = login(&client, &server.base_url, ADMIN.0, ADMIN.1).await;
    seed_batches(&client, &server.base_url, &token).await;

    let res = client
        .post(format!("{}/order", server.base_url))
        .json(&order_body(1, 3, "0812345"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["userType"], "guest");

    // Stock went down.
    let res = client
        .get(format!("{}/batches", server.base_url))
        .send()
        .await
        .unwrap();
    let batches: serde_json::Value = res.json().await.unwrap();
    assert_eq!(batches[0]["stock"], 7);
    assert_eq!(batches[0]["quantity"], 10);

    // Guest lookup by exact phone returns it; a different phone returns nothing.
    let res = client
        .get(format!("{}/orders?phone=0812345", server.base_url))
        .send()
        .await
        .unwrap();
    let orders: serde_json::Value = res.json().await.unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["totalPrice"], 15_000);
    assert_eq!(orders[0]["userId"], "guest");
    assert_eq!(orders[0]["status"], "pending");

    let res = client
        .get(format!("{}/orders?phone=0800000", server.base_url))
        .send()
        .await
        .unwrap();
    let orders: serde_json::Value = res.json().await.unwrap();
    assert!(orders.as_array().unwrap().is_empty());

    // A guest with no lookup key sees nothing at all.
    let res = client
        .get(format!("{}/orders", server.base_url))
        .send()
        .await
        .unwrap();
    let orders: serde_json::Value = res.json().await.unwrap();
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn overdraw_is_a_conflict_and_leaves_stock_alone() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let token = login(&client, &server.base_url, ADMIN.0, ADMIN.1).await;
    seed_batches(&client, &server.base_url, &token).await;

    let res = client
        .post(format!("{}/order", server.base_url))
        .json(&order_body(1, 11, "0812345"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .get(format!("{}/batches", server.base_url))
        .send()
        .await
        .unwrap();
    let batches: serde_json::Value = res.json().await.unwrap();
    assert_eq!(batches[0]["stock"], 10);
}

#[tokio::test]
async fn order_against_unknown_batch_is_not_found() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/order", server.base_url))
        .json(&order_body(99, 1, "0812345"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_updates_enforce_role_and_transition_graph() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let admin_token = login(&client, &server.base_url, ADMIN.0, ADMIN.1).await;
    seed_batches(&client, &server.base_url, &admin_token).await;

    let res = client
        .post(format!("{}/order", server.base_url))
        .json(&order_body(1, 2, "0812345"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let order_id = body["orderId"].as_str().unwrap().to_string();

    // A customer may not touch order status.
    let res = client
        .post(format!("{}/register", server.base_url))
        .json(&json!({ "username": "budi", "password": "rahasia" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let customer_token = login(&client, &server.base_url, "budi", "rahasia").await;

    let res = client
        .put(format!("{}/orders/{}", server.base_url, order_id))
        .bearer_auth(&customer_token)
        .json(&json!({ "status": "processing" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Unknown status strings are rejected before any store access.
    let res = client
        .put(format!("{}/orders/{}", server.base_url, order_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // pending -> processing is allowed; pending -> completed is not.
    let res = client
        .put(format!("{}/orders/{}", server.base_url, order_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "status": "processing" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["order"]["status"], "processing");

    let res = client
        .put(format!("{}/orders/{}", server.base_url, order_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "status": "pending" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cancelling_an_order_restores_batch_stock() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let token = login(&client, &server.base_url, ADMIN.0, ADMIN.1).await;
    seed_batches(&client, &server.base_url, &token).await;

    let res = client
        .post(format!("{}/order", server.base_url))
        .json(&order_body(1, 4, "0812345"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let order_id = body["orderId"].as_str().unwrap().to_string();

    let res = client
        .put(format!("{}/orders/{}", server.base_url, order_id))
        .bearer_auth(&token)
        .json(&json!({ "status": "cancelled" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/batches", server.base_url))
        .send()
        .await
        .unwrap();
    let batches: serde_json::Value = res.json().await.unwrap();
    assert_eq!(batches[0]["stock"], 10);
}

#[tokio::test]
async fn customers_see_their_own_orders_admin_sees_all() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let admin_token = login(&client, &server.base_url, ADMIN.0, ADMIN.1).await;
    seed_batches(&client, &server.base_url, &admin_token).await;

    client
        .post(format!("{}/register", server.base_url))
        .json(&json!({ "username": "budi", "password": "rahasia" }))
        .send()
        .await
        .unwrap();
    let customer_token = login(&client, &server.base_url, "budi", "rahasia").await;

    // One order as the customer, one as a guest.
    client
        .post(format!("{}/order", server.base_url))
        .bearer_auth(&customer_token)
        .json(&order_body(1, 1, "0812345"))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/order", server.base_url))
        .json(&order_body(1, 1, "0899999"))
        .send()
        .await
        .unwrap();

    let res = client
        .get(format!("{}/orders", server.base_url))
        .bearer_auth(&customer_token)
        .send()
        .await
        .unwrap();
    let orders: serde_json::Value = res.json().await.unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["userId"], "budi");

    let res = client
        .get(format!("{}/orders", server.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    let orders: serde_json::Value = res.json().await.unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn catalog_reports_readiness_and_progress() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let token = login(&client, &server.base_url, ADMIN.0, ADMIN.1).await;
    seed_batches(&client, &server.base_url, &token).await;

    let res = client
        .get(format!("{}/catalog", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let entries: serde_json::Value = res.json().await.unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    // Batch 1 is ready; batch 2 is 7 days into the 14-day window.
    assert_eq!(entries[0]["state"], "ready");
    assert_eq!(entries[1]["state"], "growing");
    assert_eq!(entries[1]["progressPercent"], 50.0);
    assert_eq!(entries[1]["daysToReady"], 7);

    // Facets narrow the view.
    let res = client
        .get(format!("{}/catalog?status=ready", server.base_url))
        .send()
        .await
        .unwrap();
    let ready: serde_json::Value = res.json().await.unwrap();
    assert_eq!(ready.as_array().unwrap().len(), 1);
    assert_eq!(ready[0]["id"], 1);
}

#[tokio::test]
async fn identity_endpoints_require_a_valid_token() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/user", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/user", server.base_url))
        .bearer_auth("garbage-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let token = login(&client, &server.base_url, ADMIN.0, ADMIN.1).await;
    let res = client
        .get(format!("{}/user", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["username"], ADMIN.0);
    assert_eq!(body["role"], "admin");

    let res = client
        .post(format!("{}/logout", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/login", server.base_url))
        .json(&json!({ "username": ADMIN.0, "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("{}/register", server.base_url))
        .json(&json!({ "username": ADMIN.0, "password": "anything" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
