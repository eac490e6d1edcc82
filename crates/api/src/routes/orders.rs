//! Order routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;
use tiffin_core::{OrderId, OrderStatus, UserId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::order::{NewOrder, Order, OrderItem};
use crate::services::OrderService;
use crate::state::AppState;

fn parse_order_id(id: &str) -> Result<OrderId> {
    OrderId::parse(id).map_err(|_| AppError::NotFound("Order not found".to_owned()))
}

fn parse_status(status: &str) -> Result<OrderStatus> {
    status.parse().map_err(AppError::BadRequest)
}

/// Request to place an order.
///
/// The total is stored as sent; the server does not re-price the items
/// against the catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total_price: Decimal,
    /// Defaults to `placed` when omitted.
    pub status: Option<String>,
}

/// Response carrying a created order's ID.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: OrderId,
}

/// Request to move an order to a new status. Any other fields in the
/// payload are ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub status: String,
}

/// Place an order.
///
/// POST /orders
///
/// # Errors
///
/// Returns 400 when the status string doesn't parse.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let status = match req.status.as_deref() {
        Some(s) => parse_status(s)?,
        None => OrderStatus::default(),
    };

    let order = NewOrder {
        user_id: req.user_id,
        items: req.items,
        total_price: req.total_price,
        status,
    };

    let id = OrderService::new(state.pool()).create_order(order).await?;

    tracing::info!(order_id = %id, "order created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// List every order, newest first.
///
/// GET /orders
///
/// # Errors
///
/// Returns 500 if the database is unreachable.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderService::new(state.pool()).list_orders().await?;

    Ok(Json(orders))
}

/// Get a single order.
///
/// GET /orders/{id}
///
/// # Errors
///
/// Returns 404 for an unknown or malformed ID.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let id = parse_order_id(&id)?;

    let order = OrderService::new(state.pool()).get_order(id).await?;

    Ok(Json(order))
}

/// Move an order to a new status.
///
/// PUT /orders/{id}
///
/// Statuses only move forward (placed → preparing → ready → shipped →
/// delivered); `cancelled` is reachable from any non-terminal state.
/// Returns the updated order.
///
/// # Errors
///
/// Returns 400 when the status string doesn't parse, 404 for an unknown
/// ID and 409 for a rejected transition.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<Order>> {
    let id = parse_order_id(&id)?;
    let status = parse_status(&req.status)?;

    let order = OrderService::new(state.pool())
        .update_status(id, status)
        .await?;

    tracing::info!(order_id = %id, status = %order.status, "order status updated");

    Ok(Json(order))
}
