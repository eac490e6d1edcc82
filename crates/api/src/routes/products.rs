//! Product catalog routes.
//!
//! Browsing is public; catalog writes need a token. There is no separate
//! admin gate here (any authenticated account may edit the menu).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use tiffin_core::ProductId;

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::product::{Product, ProductDraft};
use crate::state::AppState;

fn parse_product_id(id: &str) -> Result<ProductId> {
    ProductId::parse(id).map_err(|_| AppError::NotFound("Product not found".to_owned()))
}

/// Response carrying a created product's ID.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: ProductId,
}

/// List the whole catalog.
///
/// GET /products
///
/// # Errors
///
/// Returns 500 if the database is unreachable.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;

    Ok(Json(products))
}

/// Get a single product.
///
/// GET /products/{id}
///
/// # Errors
///
/// Returns 404 for an unknown or malformed ID.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = parse_product_id(&id)?;

    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}

/// Add a product to the catalog.
///
/// POST /products
///
/// # Errors
///
/// Returns 400 for an empty name.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    if draft.name.trim().is_empty() {
        return Err(AppError::BadRequest("'name' is required".to_owned()));
    }

    let product = ProductRepository::new(state.pool()).create(&draft).await?;

    tracing::info!(product_id = %product.id, name = %product.name, "product created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: product.id })))
}

/// Replace a product's fields.
///
/// PUT /products/{id}
///
/// # Errors
///
/// Returns 400 for an empty name, 404 for an unknown ID.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
    Json(draft): Json<ProductDraft>,
) -> Result<StatusCode> {
    let id = parse_product_id(&id)?;

    if draft.name.trim().is_empty() {
        return Err(AppError::BadRequest("'name' is required".to_owned()));
    }

    ProductRepository::new(state.pool())
        .update(id, &draft)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product not found".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(StatusCode::OK)
}

/// Remove a product from the catalog.
///
/// DELETE /products/{id}
///
/// # Errors
///
/// Returns 404 for an unknown ID.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_product_id(&id)?;

    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Product not found".to_owned()));
    }

    Ok(StatusCode::NO_CONTENT)
}
