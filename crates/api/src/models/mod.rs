//! Domain models for the Tiffin API.
//!
//! Wire names follow the app's JSON conventions (camelCase, with `type` and
//! `image` as the historical field names); database column names stay
//! snake_case and map via `sqlx::FromRow` field names.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use order::{NewOrder, Order, OrderItem};
pub use product::{Product, ProductDraft};
pub use user::{CurrentUser, Profile, UserAccount};
