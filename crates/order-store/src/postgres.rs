//! PostgreSQL-backed order store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use domain::{Order, OrderStatus};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::{OrderStore, OrderStoreError};

/// Order store backed by Postgres.
///
/// One row per order; lines and the shipping address are JSONB snapshots
/// since order creation never queries into them.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new Postgres order store.
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

    fn row_to_order(row: PgRow) -> Result<Order, OrderStoreError> {
        let items_json: serde_json::Value = row.try_get("items")?;
        let address_json: serde_json::Value = row.try_get("shipping_address")?;
        let status_text: String = row.try_get("status")?;
        let amount: i64 = row.try_get("total_amount")?;
        let currency: String = row.try_get("currency")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(Order {
            id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
            user_id: UserId::new(row.try_get::<String, _>("user_id")?),
            items: serde_json::from_value(items_json)?,
            total_price: domain::Money::new(amount, currency),
            shipping_address: serde_json::from_value(address_json)?,
            status: serde_json::from_value(serde_json::Value::String(status_text))?,
            created_at,
        })
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), OrderStoreError> {
        let items = serde_json::to_value(&order.items)?;
        let address = serde_json::to_value(&order.shipping_address)?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, items, total_amount, currency,
                                shipping_address, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_str())
        .bind(items)
        .bind(order.total_price.amount())
        .bind(order.total_price.currency().as_str())
        .bind(address)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return OrderStoreError::Duplicate(order.id);
            }
            OrderStoreError::Database(e)
        })?;

        Ok(())
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, OrderStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, items, total_amount, currency,
                   shipping_address, status, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_order).transpose()
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Order>, OrderStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, items, total_amount, currency,
                   shipping_address, status, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_order).collect()
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderStoreError> {
        let updated = sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(OrderStoreError::NotFound(id));
        }
        Ok(())
    }
}
