//! PostgreSQL-backed inventory implementation.

use async_trait::async_trait;
use common::{ProductId, ReservationToken};
use sqlx::{PgPool, Row};

use crate::{
    InventoryError, InventoryRecord, InventoryService, ReservationLine, merge_lines,
};

/// Inventory backed by Postgres.
///
/// Reservation runs inside one transaction; each row update carries the
/// availability predicate in its WHERE clause, so a concurrent reservation
/// that would oversell simply matches zero rows and the transaction rolls
/// back. Rows are touched in product order to avoid cross-request deadlock.
#[derive(Clone)]
pub struct PostgresInventory {
    pool: PgPool,
}

impl PostgresInventory {
    /// Creates a new Postgres inventory.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    async fn availability(
        tx: &mut sqlx::PgConnection,
        product: &ProductId,
    ) -> Result<u32, InventoryError> {
        let row = sqlx::query("SELECT on_hand, reserved FROM inventory WHERE product_id = $1")
            .bind(product.as_str())
            .fetch_optional(tx)
            .await?;

        Ok(row
            .map(|r| {
                let on_hand: i64 = r.get("on_hand");
                let reserved: i64 = r.get("reserved");
                clamp_u32(on_hand - reserved)
            })
            .unwrap_or(0))
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

#[async_trait]
impl InventoryService for PostgresInventory {
    async fn reserve_all(
        &self,
        lines: &[ReservationLine],
    ) -> Result<ReservationToken, InventoryError> {
        let merged = merge_lines(lines);
        let token = ReservationToken::new();

        let mut tx = self.pool.begin().await?;

        for (product, quantity) in &merged {
            let updated = sqlx::query(
                r#"
                UPDATE inventory
                SET reserved = reserved + $2
                WHERE product_id = $1 AND on_hand - reserved >= $2
                "#,
            )
            .bind(product.as_str())
            .bind(i64::from(*quantity))
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                let available = Self::availability(&mut *tx, product).await?;
                tx.rollback().await?;
                return Err(InventoryError::InsufficientStock {
                    product: product.clone(),
                    requested: *quantity,
                    available,
                });
            }
        }

        for (product, quantity) in &merged {
            sqlx::query(
                "INSERT INTO reservations (token, product_id, quantity) VALUES ($1, $2, $3)",
            )
            .bind(token.as_uuid())
            .bind(product.as_str())
            .bind(i64::from(*quantity))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(token)
    }

    async fn release(&self, token: &ReservationToken) -> Result<(), InventoryError> {
        let mut tx = self.pool.begin().await?;

        // Deleting the reservation rows first makes release idempotent: a
        // second call finds nothing to restore.
        let held = sqlx::query(
            "DELETE FROM reservations WHERE token = $1 RETURNING product_id, quantity",
        )
        .bind(token.as_uuid())
        .fetch_all(&mut *tx)
        .await?;

        for row in held {
            let product: String = row.get("product_id");
            let quantity: i64 = row.get("quantity");
            sqlx::query(
                "UPDATE inventory SET reserved = GREATEST(reserved - $2, 0) WHERE product_id = $1",
            )
            .bind(&product)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn stock_level(
        &self,
        product: &ProductId,
    ) -> Result<Option<InventoryRecord>, InventoryError> {
        let row = sqlx::query("SELECT on_hand, reserved FROM inventory WHERE product_id = $1")
            .bind(product.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| {
            let on_hand: i64 = r.get("on_hand");
            let reserved: i64 = r.get("reserved");
            InventoryRecord {
                product: product.clone(),
                on_hand: clamp_u32(on_hand),
                reserved: clamp_u32(reserved),
            }
        }))
    }

    async fn set_stock(&self, product: &ProductId, on_hand: u32) -> Result<(), InventoryError> {
        sqlx::query(
            r#"
            INSERT INTO inventory (product_id, on_hand, reserved)
            VALUES ($1, $2, 0)
            ON CONFLICT (product_id)
            DO UPDATE SET on_hand = GREATEST(EXCLUDED.on_hand, inventory.reserved)
            "#,
        )
        .bind(product.as_str())
        .bind(i64::from(on_hand))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
