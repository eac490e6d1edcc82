//! Cart routes.
//!
//! Carts are written whole: the client sends its id and the full item
//! list, the server normalizes and stores it. The single-item quantity
//! endpoint is the only partial mutation, and it still rewrites the
//! whole document.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use tiffin_core::CartId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::cart::{Cart, CartItem};
use crate::services::CartService;
use crate::state::AppState;

/// Request to store a whole cart.
#[derive(Debug, Deserialize)]
pub struct SaveCartRequest {
    pub id: CartId,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// Request to set one line's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Store a cart.
///
/// POST /cart
///
/// Creates the cart if the ID is new, otherwise replaces it. The response
/// is the cart as stored, after normalization.
///
/// # Errors
///
/// Returns 500 if the write fails.
pub async fn save(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<SaveCartRequest>,
) -> Result<Json<Cart>> {
    let cart = CartService::new(state.pool())
        .save_cart(req.id, req.items)
        .await?;

    Ok(Json(cart))
}

/// Get a cart.
///
/// GET /cart/{id}
///
/// # Errors
///
/// Returns 404 for an unknown cart ID.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<CartId>,
) -> Result<Json<Cart>> {
    let cart = CartService::new(state.pool()).get_cart(&id).await?;

    Ok(Json(cart))
}

/// Set one line's quantity.
///
/// PUT /cart/{cartId}/item/{itemId}
///
/// A quantity of zero removes the line; an item ID the cart doesn't hold
/// leaves it unchanged. Returns the cart after the write.
///
/// # Errors
///
/// Returns 404 for an unknown cart ID.
pub async fn update_item(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((cart_id, item_id)): Path<(CartId, String)>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<Json<Cart>> {
    let cart = CartService::new(state.pool())
        .update_item_quantity(&cart_id, &item_id, req.quantity)
        .await?;

    Ok(Json(cart))
}

/// Empty a cart.
///
/// DELETE /cart/{id}/all
///
/// The cart itself survives with no items and a zero total. Clearing an
/// unknown ID succeeds silently.
///
/// # Errors
///
/// Returns 500 if the write fails.
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<CartId>,
) -> Result<()> {
    CartService::new(state.pool()).clear_cart(&id).await?;

    Ok(())
}
