//! SpecForge - composable, inspectable specifications in Rust
//!
//! Define named boolean predicates over your entity types, combine them
//! algebraically, and keep them as trees that can be evaluated, explained,
//! traced, compiled or handed to a query engine.
//!
//! # Example
//!
//! ```rust
//! use specforge::prelude::*;
//!
//! #[derive(Clone, Record)]
//! struct Order {
//!     total: i64,
//!     paid: bool,
//!     #[record(rename = "customerName")]
//!     customer: String,
//! }
//!
//! let large = prop("total").ge(100).named("large");
//! let unpaid = prop("paid").is_false();
//! let overdue = large.and(&unpaid);
//!
//! let order = Order { total: 250, paid: false, customer: "Ada".into() };
//! assert!(overdue.evaluate(&order).unwrap());
//! assert_eq!(overdue.explain(), "(x.total >= 100) AND (x.paid = false)");
//! ```

// Derive macro
pub use specforge_macros::Record;

// Core API
pub use specforge_core::{
    compare_values, compile, values_equal, CompareOp, Compiled, EntityTest, EvalError, Leaf,
    MemoStats, Memoized, Node, Path, Quantifier, Record, Scope, Segment, SpecError,
    Specification, Symbolic, Trace, TraceEntry, TraceMode, Value, ValueTest, Var,
};

// Configuration
pub use specforge_config::{ConfigError, SpecConfig, TraceSetting};

mod builder;
pub mod leaf;
pub mod query;

pub use builder::SpecBuilder;
pub use leaf::{prop, Property};

/// Console output. Requires the `console` feature.
#[cfg(feature = "console")]
pub use specforge_console as console;

/// Internal types for macro-generated code. Do not use directly.
#[doc(hidden)]
pub mod __internal {
    pub use specforge_core::{Record, Value};
}

pub mod prelude {
    pub use super::leaf::temporal::{date, datetime};
    pub use super::query::{count, filter, par_filter};
    pub use super::{prop, Property, SpecBuilder};
    pub use super::{
        CompareOp, EvalError, Memoized, Path, Quantifier, Record, SpecError, Specification,
        Trace, TraceMode, Value,
    };
}
