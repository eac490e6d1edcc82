//! Integration tests for Tiffin.
//!
//! # Running Tests
//!
//! ```bash
//! # Terminal 1: migrate and start the API
//! cargo run -p tiffin-cli -- migrate
//! cargo run -p tiffin-api
//!
//! # Terminal 2: run the ignored tests against it
//! cargo test -p tiffin-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d so a plain `cargo test` stays green without a
//! running server. Each test registers its own throwaway account and uses
//! fresh cart and order IDs, so runs are independent and repeatable against
//! the same database.

#![cfg_attr(not(test), forbid(unsafe_code))]

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("TIFFIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A unique email so repeated runs never collide on registration.
#[must_use]
pub fn unique_email() -> String {
    format!("test-{}@example.com", uuid::Uuid::new_v4())
}
