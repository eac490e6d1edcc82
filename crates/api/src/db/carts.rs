//! Cart repository for cart document persistence.
//!
//! Carts are stored whole: one row per cart with the item lines as a JSONB
//! array and the total alongside. Saving is a read-then-write pair rather
//! than a single atomic upsert, so two concurrent saves of the same cart
//! resolve last-write-wins (see the model tests for the pinned behaviour).

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use tiffin_core::CartId;

use super::RepositoryError;
use crate::models::cart::{Cart, CartItem};

#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartId,
    items: Json<Vec<CartItem>>,
    total_price: Decimal,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        // Stored carts were normalized on the way in; decode trusts the row.
        Self {
            id: row.id,
            items: row.items.0,
            total_price: row.total_price,
        }
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a cart by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &CartId) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT id, items, total_price
            FROM carts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Cart::from))
    }

    /// Store a cart, inserting the row if the ID is new.
    ///
    /// The existence check and the write are separate statements; a save
    /// racing another save of the same cart overwrites it wholesale.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if two inserts race on the same
    /// new ID. Returns `RepositoryError::Database` for other database errors.
    pub async fn upsert(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let existing = sqlx::query_scalar::<_, String>("SELECT id FROM carts WHERE id = $1")
            .bind(&cart.id)
            .fetch_optional(self.pool)
            .await?;

        if existing.is_some() {
            sqlx::query(
                r"
                UPDATE carts
                SET items = $2, total_price = $3, updated_at = now()
                WHERE id = $1
                ",
            )
            .bind(&cart.id)
            .bind(Json(&cart.items))
            .bind(cart.total_price)
            .execute(self.pool)
            .await?;
        } else {
            sqlx::query(
                r"
                INSERT INTO carts (id, items, total_price)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(&cart.id)
            .bind(Json(&cart.items))
            .bind(cart.total_price)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("cart already exists".to_owned());
                }
                RepositoryError::Database(e)
            })?;
        }

        Ok(())
    }

    /// Empty a cart in place. The row survives with no items and a zero
    /// total. A miss is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, id: &CartId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            UPDATE carts
            SET items = '[]'::jsonb, total_price = 0, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
