//! Cart domain types and the pure cart arithmetic.
//!
//! Every write path goes through [`Cart::new`] or the mutators here, so the
//! stored document always satisfies the cart invariants no matter what the
//! client sent: `total_price == Σ price × quantity`, and no zero-quantity
//! item is ever kept.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tiffin_core::CartId;

/// A single line in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub item_id: String,
    #[serde(default)]
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    /// Price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A cart document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub items: Vec<CartItem>,
    pub total_price: Decimal,
}

impl Cart {
    /// Build a cart from a client-supplied item list.
    ///
    /// Duplicate `item_id`s are merged by summing quantities (the first
    /// occurrence keeps its name and price), zero-quantity items are dropped,
    /// and the total is recomputed from scratch.
    #[must_use]
    pub fn new(id: CartId, items: Vec<CartItem>) -> Self {
        let items = normalize_items(items);
        let total_price = items_total(&items);
        Self {
            id,
            items,
            total_price,
        }
    }

    /// An empty cart with a zero total.
    #[must_use]
    pub fn empty(id: CartId) -> Self {
        Self {
            id,
            items: Vec::new(),
            total_price: Decimal::ZERO,
        }
    }

    /// Set the quantity of one item.
    ///
    /// Quantity 0 removes the item; a positive quantity replaces the stored
    /// quantity. An `item_id` not present in the cart is a no-op either way.
    /// The total is recomputed in all cases.
    pub fn set_item_quantity(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.items.retain(|item| item.item_id != item_id);
        } else if let Some(item) = self.items.iter_mut().find(|item| item.item_id == item_id) {
            item.quantity = quantity;
        }
        self.total_price = items_total(&self.items);
    }

    /// Remove every item and zero the total. The cart document itself stays.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total_price = Decimal::ZERO;
    }
}

/// Merge duplicate item IDs (summing quantities) and drop zero quantities.
fn normalize_items(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        if let Some(existing) = merged.iter_mut().find(|m| m.item_id == item.item_id) {
            existing.quantity += item.quantity;
        } else {
            merged.push(item);
        }
    }
    merged.retain(|item| item.quantity > 0);
    merged
}

fn items_total(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::line_total).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, quantity: u32) -> CartItem {
        CartItem {
            item_id: id.to_owned(),
            name: format!("item {id}"),
            price: Decimal::new(price, 0),
            quantity,
        }
    }

    #[test]
    fn test_new_computes_total() {
        let cart = Cart::new(CartId::new("c1"), vec![item("i1", 10, 2)]);
        assert_eq!(cart.total_price, Decimal::new(20, 0));
    }

    #[test]
    fn test_new_merges_duplicate_item_ids() {
        let cart = Cart::new(
            CartId::new("c1"),
            vec![item("i1", 10, 2), item("i2", 5, 1), item("i1", 10, 3)],
        );

        assert_eq!(cart.items.len(), 2);
        let merged = cart.items.iter().find(|i| i.item_id == "i1").unwrap();
        assert_eq!(merged.quantity, 5);
        assert_eq!(cart.total_price, Decimal::new(55, 0));
    }

    #[test]
    fn test_new_drops_zero_quantity_items() {
        let cart = Cart::new(
            CartId::new("c1"),
            vec![item("i1", 10, 0), item("i2", 5, 2)],
        );

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().unwrap().item_id, "i2");
        assert_eq!(cart.total_price, Decimal::new(10, 0));
    }

    #[test]
    fn test_new_with_no_items_has_zero_total() {
        let cart = Cart::new(CartId::new("c1"), vec![]);
        assert!(cart.items.is_empty());
        assert_eq!(cart.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_set_quantity_replaces_and_recomputes() {
        let mut cart = Cart::new(CartId::new("c1"), vec![item("i1", 10, 2)]);
        cart.set_item_quantity("i1", 5);

        assert_eq!(cart.items.first().unwrap().quantity, 5);
        assert_eq!(cart.total_price, Decimal::new(50, 0));
    }

    #[test]
    fn test_set_quantity_is_idempotent() {
        let mut once = Cart::new(CartId::new("c1"), vec![item("i1", 10, 2)]);
        once.set_item_quantity("i1", 5);

        let mut twice = once.clone();
        twice.set_item_quantity("i1", 5);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_quantity_zero_removes_item() {
        let mut cart = Cart::new(
            CartId::new("c1"),
            vec![item("i1", 10, 2), item("i2", 5, 1)],
        );
        cart.set_item_quantity("i1", 0);

        assert_eq!(cart.items.len(), 1);
        assert!(cart.items.iter().all(|i| i.item_id != "i1"));
        assert_eq!(cart.total_price, Decimal::new(5, 0));
    }

    #[test]
    fn test_set_quantity_unknown_item_is_noop_with_correct_total() {
        let mut cart = Cart::new(CartId::new("c1"), vec![item("i1", 10, 2)]);
        let before = cart.clone();

        cart.set_item_quantity("ghost", 0);
        assert_eq!(cart, before);

        cart.set_item_quantity("ghost", 7);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear_keeps_cart_but_empties_it() {
        let mut cart = Cart::new(CartId::new("c1"), vec![item("i1", 10, 2)]);
        cart.clear();

        assert_eq!(cart.id, CartId::new("c1"));
        assert!(cart.items.is_empty());
        assert_eq!(cart.total_price, Decimal::ZERO);
    }

    // The single-item update path is read-modify-write across two storage
    // calls with no transaction, so two concurrent updaters that both read
    // the same snapshot overwrite each other: whichever writes last wins.
    // This pins that behavior deterministically at the model layer.
    #[test]
    fn test_concurrent_edits_from_same_snapshot_are_last_write_wins() {
        let snapshot = Cart::new(
            CartId::new("c1"),
            vec![item("i1", 10, 2), item("i2", 5, 1)],
        );

        // Updater A reads the snapshot and bumps i1.
        let mut write_a = snapshot.clone();
        write_a.set_item_quantity("i1", 9);

        // Updater B reads the SAME snapshot and removes i2.
        let mut write_b = snapshot.clone();
        write_b.set_item_quantity("i2", 0);

        // Writes land in order A then B; the stored cart is exactly B's
        // view, and A's change to i1 is silently lost.
        let stored = write_b;
        assert_eq!(stored.items.iter().find(|i| i.item_id == "i1").unwrap().quantity, 2);
        assert!(stored.items.iter().all(|i| i.item_id != "i2"));
        // The invariant still holds even though the update was lost.
        assert_eq!(stored.total_price, Decimal::new(20, 0));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let cart = Cart::new(CartId::new("c1"), vec![item("i1", 10, 2)]);
        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(json["id"], "c1");
        assert!(json.get("totalPrice").is_some());
        assert_eq!(json["items"][0]["itemId"], "i1");
    }

    #[test]
    fn test_items_deserialize_without_name() {
        let cart: Cart = serde_json::from_str(
            r#"{"id": "c1", "items": [{"itemId": "i1", "price": "10", "quantity": 2}], "totalPrice": "0"}"#,
        )
        .unwrap();
        assert_eq!(cart.items.first().unwrap().name, "");
    }
}
