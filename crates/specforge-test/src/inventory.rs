//! Inventory items.

use specforge_core::{Record, Value};

/// An item with three independently thresholded fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i64,
    pub price: i64,
    pub stock: i64,
    pub rating: f64,
}

impl Item {
    pub fn new(id: i64, price: i64, stock: i64, rating: f64) -> Self {
        Self {
            id,
            price,
            stock,
            rating,
        }
    }
}

impl Record for Item {
    fn member(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::I64(self.id)),
            "price" => Some(Value::I64(self.price)),
            "stock" => Some(Value::I64(self.stock)),
            "rating" => Some(Value::F64(self.rating)),
            _ => None,
        }
    }
}

/// Six items against the thresholds `price >= 50`, `stock >= 10` and
/// `rating >= 4.0`. Exactly two thresholds hold for items 2, 3 and 4.
pub fn six_items() -> Vec<Item> {
    vec![
        Item::new(1, 60, 20, 4.5), // all three
        Item::new(2, 60, 20, 3.0), // price, stock
        Item::new(3, 10, 20, 4.2), // stock, rating
        Item::new(4, 70, 1, 4.9),  // price, rating
        Item::new(5, 10, 1, 4.0),  // rating
        Item::new(6, 10, 2, 1.0),  // none
    ]
}
