//! Integration tests for the Postgres inventory backend.
//!
//! These tests need a running Postgres reachable via `DATABASE_URL` and are
//! ignored by default. Run with:
//! `DATABASE_URL=postgres://... cargo test -p inventory -- --ignored`

use common::ProductId;
use inventory::{InventoryError, InventoryService, PostgresInventory, ReservationLine};
use sqlx::PgPool;

async fn connect() -> PostgresInventory {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.expect("failed to connect");
    let inventory = PostgresInventory::new(pool);
    inventory.run_migrations().await.expect("migrations failed");
    inventory
}

fn line(product: &ProductId, quantity: u32) -> ReservationLine {
    ReservationLine {
        product: product.clone(),
        quantity,
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn reserve_and_release_roundtrip() {
    let inventory = connect().await;
    let product = ProductId::new(format!("IT-{}", uuid::Uuid::new_v4()));

    inventory.set_stock(&product, 10).await.unwrap();

    let token = inventory.reserve_all(&[line(&product, 4)]).await.unwrap();
    let record = inventory.stock_level(&product).await.unwrap().unwrap();
    assert_eq!(record.reserved, 4);

    inventory.release(&token).await.unwrap();
    inventory.release(&token).await.unwrap();

    let record = inventory.stock_level(&product).await.unwrap().unwrap();
    assert_eq!(record.reserved, 0);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn oversell_is_rejected_without_partial_mutation() {
    let inventory = connect().await;
    let a = ProductId::new(format!("IT-{}", uuid::Uuid::new_v4()));
    let b = ProductId::new(format!("IT-{}", uuid::Uuid::new_v4()));

    inventory.set_stock(&a, 5).await.unwrap();
    inventory.set_stock(&b, 1).await.unwrap();

    let result = inventory.reserve_all(&[line(&a, 2), line(&b, 3)]).await;
    assert!(matches!(
        result,
        Err(InventoryError::InsufficientStock { .. })
    ));

    // The passing line must have been rolled back with the failing one.
    let record = inventory.stock_level(&a).await.unwrap().unwrap();
    assert_eq!(record.reserved, 0);
}
