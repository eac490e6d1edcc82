//! Product repository for catalog persistence.

use sqlx::PgPool;

use tiffin_core::ProductId;

use super::RepositoryError;
use crate::models::product::{Product, ProductDraft};

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the whole catalog, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, description, price, category, image_url,
                   is_available, rating, product_type, meal_time
            FROM products
            ORDER BY created_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, description, price, category, image_url,
                   is_available, rating, product_type, meal_time
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Insert a new product and return it with its generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products
                (name, description, price, category, image_url,
                 is_available, rating, product_type, meal_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, description, price, category, image_url,
                      is_available, rating, product_type, meal_time
            ",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(&draft.category)
        .bind(&draft.image_url)
        .bind(draft.is_available)
        .bind(draft.rating)
        .bind(&draft.product_type)
        .bind(&draft.meal_time)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Replace every mutable field of a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET name = $2, description = $3, price = $4, category = $5,
                image_url = $6, is_available = $7, rating = $8,
                product_type = $9, meal_time = $10, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(&draft.category)
        .bind(&draft.image_url)
        .bind(draft.is_available)
        .bind(draft.rating)
        .bind(&draft.product_type)
        .bind(&draft.meal_time)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
