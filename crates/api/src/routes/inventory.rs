//! Stock level inspection and adjustment endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use cart_client::CartClient;
use common::ProductId;
use inventory::{InventoryRecord, InventoryService};
use order_store::OrderStore;
use serde::Deserialize;

use crate::error::ApiError;
use crate::routes::orders::AppState;

/// Body of `PUT /api/inventory/{productId}`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStockRequest {
    pub on_hand: u32,
}

/// GET /api/inventory/{productId} — current stock level for a product.
#[tracing::instrument(skip(state))]
pub async fn get<C, I, O>(
    State(state): State<Arc<AppState<C, I, O>>>,
    Path(product_id): Path<String>,
) -> Result<Json<InventoryRecord>, ApiError>
where
    C: CartClient + Clone + Send + Sync + 'static,
    I: InventoryService + Clone + Send + Sync + 'static,
    O: OrderStore + Send + Sync + 'static,
{
    let product = ProductId::new(product_id.clone());
    let record = state
        .inventory
        .stock_level(&product)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {product_id} not found")))?;

    Ok(Json(record))
}

/// PUT /api/inventory/{productId} — set the on-hand quantity for a product.
#[tracing::instrument(skip(state, req))]
pub async fn set<C, I, O>(
    State(state): State<Arc<AppState<C, I, O>>>,
    Path(product_id): Path<String>,
    Json(req): Json<SetStockRequest>,
) -> Result<Json<InventoryRecord>, ApiError>
where
    C: CartClient + Clone + Send + Sync + 'static,
    I: InventoryService + Clone + Send + Sync + 'static,
    O: OrderStore + Send + Sync + 'static,
{
    let product = ProductId::new(product_id);
    state.inventory.set_stock(&product, req.on_hand).await?;
    let record = state
        .inventory
        .stock_level(&product)
        .await?
        .ok_or_else(|| ApiError::Internal("stock record missing after update".to_string()))?;

    Ok(Json(record))
}
