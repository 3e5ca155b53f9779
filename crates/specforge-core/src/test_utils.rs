//! Test fixtures for specforge-core.
//!
//! Small entity types implementing [`Record`] by hand.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::node::{CompareOp, Path};
use crate::record::Record;
use crate::spec::Specification;
use crate::value::Value;

/// An entity with two boolean flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flags {
    pub a: bool,
    pub b: bool,
}

impl Flags {
    pub fn new(a: bool, b: bool) -> Self {
        Self { a, b }
    }

    /// All four flag combinations.
    pub fn all() -> [Flags; 4] {
        [
            Flags::new(true, true),
            Flags::new(true, false),
            Flags::new(false, true),
            Flags::new(false, false),
        ]
    }
}

impl Record for Flags {
    fn member(&self, name: &str) -> Option<Value> {
        match name {
            "a" => Some(Value::Bool(self.a)),
            "b" => Some(Value::Bool(self.b)),
            _ => None,
        }
    }
}

/// `x.a = true`
pub fn is_a() -> Specification<Flags> {
    Specification::compare(Path::parse("a"), CompareOp::Eq, true)
}

/// `x.b = true`
pub fn is_b() -> Specification<Flags> {
    Specification::compare(Path::parse("b"), CompareOp::Eq, true)
}

/// An inventory item with numeric fields.
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

/// Six items covering every combination count of the three threshold
/// leaves `price >= 50`, `stock >= 10`, `rating >= 4.0`.
pub fn six_items() -> Vec<Item> {
    vec![
        Item::new(1, 60, 20, 4.5), // 3 hold
        Item::new(2, 60, 20, 3.0), // price, stock
        Item::new(3, 10, 20, 4.2), // stock, rating
        Item::new(4, 70, 1, 4.9),  // price, rating
        Item::new(5, 10, 1, 4.0),  // rating
        Item::new(6, 10, 2, 1.0),  // none
    ]
}

#[derive(Debug, Clone)]
pub struct Address {
    pub city: String,
}

impl Record for Address {
    fn member(&self, name: &str) -> Option<Value> {
        match name {
            "city" => Some(Value::from(self.city.as_str())),
            _ => None,
        }
    }
}

/// A person with an optional nested address and a method.
#[derive(Debug, Clone)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub address: Option<Address>,
}

impl Person {
    pub fn new(name: &str, age: i64, city: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            age,
            address: city.map(|c| Address {
                city: c.to_string(),
            }),
        }
    }
}

impl Record for Person {
    fn member(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(self.name.as_str())),
            "age" => Some(Value::I64(self.age)),
            "address" => Some(match &self.address {
                Some(a) => Value::record(a.clone()),
                None => Value::None,
            }),
            _ => None,
        }
    }

    fn call(&self, method: &str, args: &[Value]) -> Option<Value> {
        match (method, args) {
            ("older_than", [Value::I64(n)]) => Some(Value::Bool(self.age > *n)),
            ("initial", []) => Some(Value::from(self.name.get(..1).unwrap_or(""))),
            _ => None,
        }
    }
}

/// An entity whose flag can change behind a shared reference.
#[derive(Debug)]
pub struct Toggle {
    pub on: AtomicBool,
}

impl Toggle {
    pub fn shared(on: bool) -> Arc<Toggle> {
        Arc::new(Toggle {
            on: AtomicBool::new(on),
        })
    }

    pub fn set(&self, on: bool) {
        self.on.store(on, Ordering::SeqCst);
    }
}

impl Record for Toggle {
    fn member(&self, name: &str) -> Option<Value> {
        match name {
            "on" => Some(Value::Bool(self.on.load(Ordering::SeqCst))),
            _ => None,
        }
    }
}
