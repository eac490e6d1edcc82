//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Auth
//! POST /register               - Register a new account
//! POST /login                  - Login, returns a bearer token
//!
//! # Admin (admin token)
//! PUT  /admin/users/{id}/role  - Change a user's role
//!
//! # Users (profile documents)
//! GET    /users                - List profiles (public)
//! GET    /users/{id}           - Profile detail (public)
//! POST   /users                - Create profile (auth)
//! PATCH  /users/{id}           - Patch profile (auth)
//! DELETE /users/{id}           - Delete profile (auth)
//!
//! # Products
//! GET    /products             - Catalog listing (public)
//! GET    /products/{id}        - Product detail (public)
//! POST   /products             - Add product (auth)
//! PUT    /products/{id}        - Replace product (auth)
//! DELETE /products/{id}        - Remove product (auth)
//!
//! # Cart (auth)
//! POST   /cart                 - Store a whole cart
//! GET    /cart/{id}            - Cart detail
//! PUT    /cart/{cartId}/item/{itemId} - Set one line's quantity
//! DELETE /cart/{id}/all        - Empty a cart
//!
//! # Orders (auth)
//! POST /orders                 - Place an order
//! GET  /orders                 - List orders
//! GET  /orders/{id}            - Order detail
//! PUT  /orders/{id}            - Move an order's status
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/users/{id}/role", put(admin::update_role))
}

/// Create the user profile routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index).post(users::create))
        .route(
            "/{id}",
            get(users::show).patch(users::update).delete(users::destroy),
        )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::save))
        .route("/{cart_id}", get(cart::show))
        .route("/{cart_id}/all", delete(cart::clear))
        .route("/{cart_id}/item/{item_id}", put(cart::update_item))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::index))
        .route("/{id}", get(orders::show).put(orders::update))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Register and login sit at the root
        .merge(auth_routes())
        // Admin-gated management
        .nest("/admin", admin_routes())
        // Profile documents
        .nest("/users", user_routes())
        // Catalog
        .nest("/products", product_routes())
        // Carts
        .nest("/cart", cart_routes())
        // Orders
        .nest("/orders", order_routes())
}
