//! Integration tests for the API server.

use std::sync::Arc;
use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use cart_client::{FetchFailure, InMemoryCartClient};
use common::{ProductId, UserId};
use domain::{Cart, CartLine, Money};
use inventory::{InMemoryInventory, InventoryService};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::InMemoryOrderStore;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

type TestState =
    Arc<api::routes::orders::AppState<InMemoryCartClient, InMemoryInventory, InMemoryOrderStore>>;

fn setup() -> (axum::Router, TestState) {
    let state = api::create_default_state();
    let app = api::create_app(state.clone(), get_metrics_handle());
    (app, state)
}

fn cart_for(user: &str, items: Vec<CartLine>) -> Cart {
    Cart {
        id: format!("cart-{user}"),
        user_id: UserId::new(user),
        items,
        total_price: None,
    }
}

fn line(product: &str, quantity: u32, amount: i64) -> CartLine {
    CartLine {
        product: ProductId::new(product),
        quantity,
        unit_price: Money::new(amount, "USD"),
    }
}

async fn seed_stock(state: &TestState, product: &str, on_hand: u32) {
    state
        .inventory
        .set_stock(&ProductId::new(product), on_hand)
        .await
        .unwrap();
}

fn address_body() -> serde_json::Value {
    serde_json::json!({
        "shippingAddress": {
            "street": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "zip": "62704",
            "country": "US"
        }
    })
}

fn create_order_request(user: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header("content-type", "application/json")
        .header("x-user-id", user)
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_order() {
    let (app, state) = setup();
    state
        .cart_client
        .put_cart(cart_for("user-1", vec![line("SKU-001", 2, 100)]));
    seed_stock(&state, "SKU-001", 10).await;

    let response = app
        .oneshot(create_order_request("user-1", &address_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["order"]["status"], "PENDING");
    assert_eq!(json["order"]["totalPrice"]["amount"], 200);
    assert_eq!(json["order"]["totalPrice"]["currency"], "USD");
    assert_eq!(json["order"]["shippingAddress"]["zip"], "62704");
    assert!(json["order"]["id"].as_str().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_order_accepts_pincode_alias() {
    let (app, state) = setup();
    state
        .cart_client
        .put_cart(cart_for("user-1", vec![line("SKU-001", 1, 100)]));
    seed_stock(&state, "SKU-001", 5).await;

    let body = serde_json::json!({
        "shippingAddress": {
            "street": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "pincode": "62704",
            "country": "US"
        }
    });
    let response = app
        .oneshot(create_order_request("user-1", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["order"]["shippingAddress"]["zip"], "62704");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_order_requires_identity() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/orders")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&address_body()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_order_cart_not_found() {
    let (app, _) = setup();

    let response = app
        .oneshot(create_order_request("ghost", &address_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_order_empty_cart() {
    let (app, state) = setup();
    state.cart_client.put_cart(cart_for("user-1", vec![]));

    let response = app
        .oneshot(create_order_request("user-1", &address_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("empty"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_order_invalid_address() {
    let (app, state) = setup();
    state
        .cart_client
        .put_cart(cart_for("user-1", vec![line("SKU-001", 1, 100)]));
    seed_stock(&state, "SKU-001", 5).await;

    let body = serde_json::json!({
        "shippingAddress": {
            "street": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "country": "US"
        }
    });
    let response = app
        .oneshot(create_order_request("user-1", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("zip"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_order_cart_service_unavailable() {
    let (app, state) = setup();
    state
        .cart_client
        .put_cart(cart_for("user-1", vec![line("SKU-001", 1, 100)]));
    state
        .cart_client
        .set_fetch_failure(Some(FetchFailure::Transport));

    let response = app
        .oneshot(create_order_request("user-1", &address_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("unavailable"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_order_insufficient_stock() {
    let (app, state) = setup();
    state
        .cart_client
        .put_cart(cart_for("user-1", vec![line("SKU-001", 5, 100)]));
    seed_stock(&state, "SKU-001", 2).await;

    let response = app
        .oneshot(create_order_request("user-1", &address_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("SKU-001"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_and_get_order() {
    let (app, state) = setup();
    state
        .cart_client
        .put_cart(cart_for("user-1", vec![line("SKU-001", 2, 100)]));
    seed_stock(&state, "SKU-001", 10).await;

    let create_response = app
        .clone()
        .oneshot(create_order_request("user-1", &address_body()))
        .await
        .unwrap();
    assert_eq!(create_response.status(), StatusCode::CREATED);
    let created = json_body(create_response).await;
    let order_id = created["order"]["id"].as_str().unwrap().to_string();

    let get_response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/orders/{order_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(get_response.status(), StatusCode::OK);
    let json = json_body(get_response).await;
    assert_eq!(json["id"], order_id.as_str());
    assert_eq!(json["userId"], "user-1");
    assert_eq!(json["status"], "PENDING");
}

#[tokio::test]
async fn test_get_order_not_found() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/orders/{}", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_order_invalid_id() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/orders/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_orders_for_user() {
    let (app, state) = setup();
    state
        .cart_client
        .put_cart(cart_for("user-1", vec![line("SKU-001", 1, 100)]));
    seed_stock(&state, "SKU-001", 10).await;

    let create_response = app
        .clone()
        .oneshot(create_order_request("user-1", &address_body()))
        .await
        .unwrap();
    assert_eq!(create_response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/orders")
                .header("x-user-id", "user-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["userId"], "user-1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_inventory_set_and_get() {
    let (app, _) = setup();

    let put_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/inventory/SKU-001")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&serde_json::json!({ "onHand": 7 })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(put_response.status(), StatusCode::OK);
    let put_json = json_body(put_response).await;
    assert_eq!(put_json["onHand"], 7);
    assert_eq!(put_json["reserved"], 0);

    let get_response = app
        .oneshot(
            Request::builder()
                .uri("/api/inventory/SKU-001")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(get_response.status(), StatusCode::OK);
    let json = json_body(get_response).await;
    assert_eq!(json["product"], "SKU-001");
    assert_eq!(json["onHand"], 7);
}

#[tokio::test]
async fn test_inventory_get_unknown_product() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/inventory/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
