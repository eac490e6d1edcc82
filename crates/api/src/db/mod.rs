//! Database operations for the Tiffin `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Credentials and roles (never deleted)
//! - `profiles` - User profile documents (freely CRUD-able)
//! - `products` - Menu/catalog items
//! - `carts` - Whole-document carts keyed by client-supplied ID (JSONB items)
//! - `orders` - Orders with JSONB item lists
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p tiffin-cli -- migrate
//! ```

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use carts::CartRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Driver-level failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row does not decode into what the code expects.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// No row matched.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint fired (duplicate email, duplicate id).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Open the `PostgreSQL` connection pool.
///
/// Pool sizing is fixed (10 max, 2 warm) with a 10 second acquire
/// timeout; mess-scale traffic never needs more.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
