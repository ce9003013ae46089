//! HTTP API server for the order placement service.
//!
//! Provides REST endpoints for checkout, order lookup, and stock management,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post, put};
use cart_client::{CartClient, InMemoryCartClient};
use checkout::CheckoutCoordinator;
use inventory::{InMemoryInventory, InventoryService};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{InMemoryOrderStore, OrderStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<C, I, O>(state: Arc<AppState<C, I, O>>, metrics_handle: PrometheusHandle) -> Router
where
    C: CartClient + Clone + Send + Sync + 'static,
    I: InventoryService + Clone + Send + Sync + 'static,
    O: OrderStore + Send + Sync + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/orders", post(routes::orders::create::<C, I, O>))
        .route("/api/orders", get(routes::orders::list::<C, I, O>))
        .route("/api/orders/{id}", get(routes::orders::get::<C, I, O>))
        .route(
            "/api/inventory/{product_id}",
            get(routes::inventory::get::<C, I, O>),
        )
        .route(
            "/api/inventory/{product_id}",
            put(routes::inventory::set::<C, I, O>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state from concrete service handles.
pub fn create_state<C, I, O>(
    cart_client: C,
    inventory: I,
    orders: O,
    fetch_budget: Duration,
) -> Arc<AppState<C, I, O>>
where
    C: CartClient + Clone + Send + Sync + 'static,
    I: InventoryService + Clone + Send + Sync + 'static,
    O: OrderStore + Clone + Send + Sync + 'static,
{
    let coordinator =
        CheckoutCoordinator::new(cart_client.clone(), inventory.clone(), orders.clone())
            .with_fetch_budget(fetch_budget);

    Arc::new(AppState {
        coordinator,
        cart_client,
        inventory,
        orders,
    })
}

/// Creates application state backed entirely by in-memory services.
pub fn create_default_state()
-> Arc<AppState<InMemoryCartClient, InMemoryInventory, InMemoryOrderStore>> {
    create_state(
        InMemoryCartClient::new(),
        InMemoryInventory::new(),
        InMemoryOrderStore::new(),
        checkout::DEFAULT_FETCH_BUDGET,
    )
}
