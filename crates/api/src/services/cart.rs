//! Cart service.
//!
//! All mutations go through [`Cart`]'s normalizing constructors, so a
//! stored cart always satisfies the cart invariants: no duplicate item
//! lines, no zero quantities, total equal to the sum of its lines.

use sqlx::PgPool;
use thiserror::Error;

use tiffin_core::CartId;

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::models::cart::{Cart, CartItem};

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Cart not found.
    #[error("cart not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart service.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            carts: CartRepository::new(pool),
        }
    }

    /// Store a whole cart, replacing any existing one with the same ID.
    ///
    /// Incoming lines are normalized (duplicates merged, zero quantities
    /// dropped) and the total is recomputed before the write. Returns the
    /// cart as stored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the write fails.
    pub async fn save_cart(&self, id: CartId, items: Vec<CartItem>) -> Result<Cart, CartError> {
        let cart = Cart::new(id, items);
        self.carts.upsert(&cart).await?;

        Ok(cart)
    }

    /// Get a cart by ID.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if no cart has this ID.
    pub async fn get_cart(&self, id: &CartId) -> Result<Cart, CartError> {
        self.carts.get(id).await?.ok_or(CartError::NotFound)
    }

    /// Set a single line's quantity. Zero removes the line; an unknown
    /// item ID leaves the cart unchanged. The total is recomputed either
    /// way.
    ///
    /// Fetch and store are two independent round trips with nothing
    /// guarding the gap, so concurrent updates to the same cart resolve
    /// last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if no cart has this ID.
    pub async fn update_item_quantity(
        &self,
        cart_id: &CartId,
        item_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        let mut cart = self.carts.get(cart_id).await?.ok_or(CartError::NotFound)?;

        cart.set_item_quantity(item_id, quantity);
        self.carts.upsert(&cart).await?;

        Ok(cart)
    }

    /// Empty a cart. The cart row itself survives with no items and a
    /// zero total; clearing an unknown ID is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the write fails.
    pub async fn clear_cart(&self, id: &CartId) -> Result<(), CartError> {
        self.carts.clear(id).await?;

        Ok(())
    }
}
