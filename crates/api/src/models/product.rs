//! Product catalog types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tiffin_core::ProductId;

/// A menu item.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// The wire name has always been `image`.
    #[serde(rename = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Dish type (e.g., "veg", "non-veg").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Which meal slot the dish belongs to (e.g., "breakfast", "lunch").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_time: Option<String>,
}

/// Client-supplied fields for creating or replacing a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: Option<String>,
    #[serde(rename = "image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_available: bool,
    pub rating: Option<f64>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub meal_time: Option<String>,
}
