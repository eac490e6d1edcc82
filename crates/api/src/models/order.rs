//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tiffin_core::{OrderId, OrderStatus, UserId};

/// A single line in an order. Thinner than a cart line: the price was
/// captured into the order total at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub item_id: String,
    pub quantity: u32,
}

/// An order as stored and returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    /// Taken verbatim from the creating request; not recomputed from items.
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub ordered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total_price: Decimal,
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_wire_format() {
        let order = Order {
            id: OrderId::generate(),
            user_id: UserId::generate(),
            items: vec![OrderItem {
                item_id: "i1".to_owned(),
                quantity: 2,
            }],
            total_price: Decimal::new(20, 0),
            status: OrderStatus::Placed,
            ordered_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "placed");
        assert_eq!(json["items"][0]["itemId"], "i1");
        assert!(json.get("totalPrice").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("orderedAt").is_some());
    }
}
