//! Two-flag entity.

use specforge_core::{Record, Value};

/// An entity with two boolean flags, `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags {
    pub a: bool,
    pub b: bool,
}

impl Flags {
    pub fn new(a: bool, b: bool) -> Self {
        Self { a, b }
    }

    /// All four combinations: (T,T), (T,F), (F,T), (F,F).
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
