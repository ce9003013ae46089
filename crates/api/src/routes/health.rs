//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

/// Body of the liveness response.
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// GET /health — reports the service as live.
///
/// Deliberately shallow: it does not touch the cart service or any store, so
/// a degraded dependency never takes the whole service out of rotation.
pub async fn check() -> Json<Health> {
    Json(Health { status: "ok" })
}
