//! Order creation and read endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use cart_client::CartClient;
use checkout::CheckoutCoordinator;
use common::{OrderId, UserId};
use domain::{Order, ShippingAddress};
use inventory::InventoryService;
use order_store::OrderStore;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<C, I, O> {
    pub coordinator: CheckoutCoordinator<C, I, O>,
    pub cart_client: C,
    pub inventory: I,
    pub orders: O,
}

// -- Request types --

/// Body of `POST /api/orders`.
///
/// Every field is optional on the wire so that missing pieces surface as an
/// address validation failure rather than a deserialization rejection.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub shipping_address: Option<ShippingAddressPayload>,
}

#[derive(Deserialize, Default)]
pub struct ShippingAddressPayload {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, alias = "pincode")]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl ShippingAddressPayload {
    fn into_address(self) -> ShippingAddress {
        ShippingAddress::new(
            self.street.unwrap_or_default(),
            self.city.unwrap_or_default(),
            self.state.unwrap_or_default(),
            self.zip.unwrap_or_default(),
            self.country.unwrap_or_default(),
        )
    }
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderCreatedResponse {
    pub order: Order,
}

// -- Handlers --

/// POST /api/orders — create an order from the caller's cart.
#[tracing::instrument(skip(state, headers, req))]
pub async fn create<C, I, O>(
    State(state): State<Arc<AppState<C, I, O>>>,
    headers: HeaderMap,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(axum::http::StatusCode, Json<OrderCreatedResponse>), ApiError>
where
    C: CartClient + Clone + Send + Sync + 'static,
    I: InventoryService + Clone + Send + Sync + 'static,
    O: OrderStore + Send + Sync + 'static,
{
    let user = caller_identity(&headers)?;
    let address = req
        .shipping_address
        .unwrap_or_default()
        .into_address();

    let order = state.coordinator.place_order(user, address).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(OrderCreatedResponse { order }),
    ))
}

/// GET /api/orders/{id} — load a persisted order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<C, I, O>(
    State(state): State<Arc<AppState<C, I, O>>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError>
where
    C: CartClient + Clone + Send + Sync + 'static,
    I: InventoryService + Clone + Send + Sync + 'static,
    O: OrderStore + Send + Sync + 'static,
{
    let order_id = parse_order_id(&id)?;
    let order = state
        .orders
        .get(order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok(Json(order))
}

/// GET /api/orders — list the caller's orders, newest first.
#[tracing::instrument(skip(state, headers))]
pub async fn list<C, I, O>(
    State(state): State<Arc<AppState<C, I, O>>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Order>>, ApiError>
where
    C: CartClient + Clone + Send + Sync + 'static,
    I: InventoryService + Clone + Send + Sync + 'static,
    O: OrderStore + Send + Sync + 'static,
{
    let user = caller_identity(&headers)?;
    let orders = state.orders.list_for_user(&user).await?;
    Ok(Json(orders))
}

/// Resolves the caller's user ID from the `x-user-id` header placed by the
/// upstream session layer.
fn caller_identity(headers: &HeaderMap) -> Result<UserId, ApiError> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(UserId::new)
        .ok_or_else(|| ApiError::Unauthorized("missing x-user-id header".to_string()))
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order ID: {e}")))?;
    Ok(OrderId::from_uuid(uuid))
}
