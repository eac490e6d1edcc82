//! Order repository for order persistence.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use tiffin_core::{OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::order::{NewOrder, Order, OrderItem};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    items: Json<Vec<OrderItem>>,
    total_price: Decimal,
    status: OrderStatus,
    ordered_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            items: row.items.0,
            total_price: row.total_price,
            status: row.status,
            ordered_at: row.ordered_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order and return its generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        let id = sqlx::query_scalar::<_, OrderId>(
            r"
            INSERT INTO orders (user_id, items, total_price, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(order.user_id)
        .bind(Json(&order.items))
        .bind(order.total_price)
        .bind(order.status)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, items, total_price, status, ordered_at, updated_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Order::from))
    }

    /// List every order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, items, total_price, status, ordered_at, updated_at
            FROM orders
            ORDER BY ordered_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Move an order to a new status. Items and total are immutable after
    /// creation; only the status and timestamp change.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            UPDATE orders
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, items, total_price, status, ordered_at, updated_at
            ",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
