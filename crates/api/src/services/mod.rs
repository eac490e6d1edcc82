//! Business logic services.
//!
//! Services own validation and the rules between the HTTP handlers and
//! the repositories. Each borrows the pool (and the token service where
//! needed) for the life of one request.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
pub use orders::{OrderError, OrderService};
pub use token::{TokenError, TokenService};
