//! SpecForge Core - predicate trees and specifications
//!
//! This crate provides the core of SpecForge:
//! - Predicate trees bound to a single free variable ([`Node`], [`Var`])
//! - Variable substitution and the binary and N-ary combinators
//! - Direct evaluation, explanation and traced evaluation
//! - Closure compilation with the cached and memoized wrappers

pub mod compile;
pub mod error;
pub mod eval;
pub mod memo;
pub mod node;
pub mod record;
pub mod spec;
pub mod trace;
pub mod value;
pub mod var;

mod explain;
mod substitute;

#[cfg(test)]
mod test_utils;

pub use compile::{compile, Compiled};
pub use error::{EvalError, Result, SpecError};
pub use eval::Scope;
pub use memo::{MemoStats, Memoized};
pub use node::{CompareOp, EntityTest, Leaf, Node, Path, Segment, Symbolic, ValueTest};
pub use record::Record;
pub use spec::{Quantifier, Specification};
pub use trace::{Trace, TraceEntry, TraceMode};
pub use value::{compare_values, values_equal, Value};
pub use var::Var;
