//! Order service.
//!
//! Orders are append-mostly: created once from a client-supplied item
//! list, then mutated only along the status chain. The client's total is
//! stored verbatim; nothing here re-prices against the catalog.

use sqlx::PgPool;
use thiserror::Error;

use tiffin_core::{OrderId, OrderStatus};

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::models::order::{NewOrder, Order};

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order not found.
    #[error("order not found")]
    NotFound,

    /// The requested status move goes against the order flow.
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Order service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Persist a new order and return its generated ID.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the insert fails.
    pub async fn create_order(&self, order: NewOrder) -> Result<OrderId, OrderError> {
        let id = self.orders.create(&order).await?;

        Ok(id)
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if no order has this ID.
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders.get(id).await?.ok_or(OrderError::NotFound)
    }

    /// List every order, newest first.
    ///
    /// Unfiltered and unpaginated; fine at mess scale.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the query fails.
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list().await?)
    }

    /// Move an order to a new status and return the updated order.
    ///
    /// Statuses only move forward along placed → preparing → ready →
    /// shipped → delivered; `cancelled` is reachable from any non-terminal
    /// state, and `delivered`/`cancelled` are terminal.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if no order has this ID.
    /// Returns `OrderError::InvalidTransition` for a rejected move.
    pub async fn update_status(&self, id: OrderId, next: OrderStatus) -> Result<Order, OrderError> {
        let order = self.orders.get(id).await?.ok_or(OrderError::NotFound)?;

        if !order.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: next,
            });
        }

        Ok(self.orders.update_status(id, next).await?)
    }
}
