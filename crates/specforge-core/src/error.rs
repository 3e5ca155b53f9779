//! Error types for SpecForge.
//!
//! Construction problems surface as [`SpecError`] when a specification is
//! built; [`EvalError`] is raised while testing an entity and propagates
//! unchanged through every combinator.

use thiserror::Error;

use crate::var::Var;

/// Error raised while constructing a specification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    /// An argument was outside the accepted domain (empty operand list,
    /// threshold larger than the operand count, empty builder).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The tree references a variable other than the one it is bound to.
    #[error("Unbound variable: tree is bound to `{expected}` but references `{found}`")]
    UnboundVariable { expected: Var, found: Var },
}

/// Error raised while evaluating a specification against an entity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The record does not expose a member with this name.
    #[error("unknown member `{member}`")]
    UnknownMember { member: String },

    /// The record does not expose a method with this name.
    #[error("unknown method `{method}`")]
    UnknownMethod { method: String },

    /// A member or method was reached through a missing value.
    #[error("cannot access `{member}` on a missing value")]
    NullAccess { member: String },

    /// A member or method was reached through a value that is not a record.
    #[error("cannot access `{member}` on {found}")]
    NotARecord { member: String, found: String },

    /// A boolean position produced a non-boolean value.
    #[error("expected a boolean, found {found}")]
    NotBoolean { found: String },

    /// Two values have no ordering relative to each other.
    #[error("cannot compare {left} with {right}")]
    Incomparable { left: String, right: String },

    /// Arithmetic over values that are not numbers.
    #[error("cannot add {left} and {right}")]
    Arithmetic { left: String, right: String },

    /// The free variable was used where a value is required.
    #[error("free variable `{0}` cannot be used as a value")]
    BareVariable(String),

    /// The tree references a variable the evaluation was not bound to.
    #[error("variable `{found}` is not bound (evaluating `{expected}`)")]
    ForeignVariable { expected: String, found: String },

    /// A leaf's own test failed.
    #[error("{leaf}: {message}")]
    Leaf { leaf: String, message: String },
}

impl EvalError {
    /// Creates a leaf failure, for use inside custom tests.
    pub fn leaf(leaf: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::Leaf {
            leaf: leaf.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for specification construction.
pub type Result<T> = std::result::Result<T, SpecError>;
