//! Specifications: named, composable predicates bound to one free variable.
//!
//! A [`Specification`] owns an immutable tree and the variable it is bound
//! to. Composition always builds a new specification over a freshly chosen
//! variable; the operands are copied onto it and never modified, so a
//! specification can take part in any number of compositions.
//!
//! # Example
//!
//! ```
//! use specforge_core::{CompareOp, Path, Record, Specification, Value};
//!
//! struct Flags { a: bool, b: bool }
//!
//! impl Record for Flags {
//!     fn member(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "a" => Some(Value::Bool(self.a)),
//!             "b" => Some(Value::Bool(self.b)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let a = Specification::<Flags>::compare(Path::parse("a"), CompareOp::Eq, true);
//! let b = Specification::<Flags>::compare(Path::parse("b"), CompareOp::Eq, true);
//!
//! let either = a.xor(&b);
//! assert!(either.evaluate(&Flags { a: true, b: false }).unwrap());
//! assert!(!either.evaluate(&Flags { a: true, b: true }).unwrap());
//! ```

mod binary;
mod nary;

#[cfg(test)]
mod tests;

pub use nary::Quantifier;

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::compile::{compile, Compiled};
use crate::error::{EvalError, Result, SpecError};
use crate::memo::Memoized;
use crate::node::{CompareOp, Node, Path, Symbolic};
use crate::record::Record;
use crate::trace::{Trace, TraceMode};
use crate::value::Value;
use crate::var::Var;

/// A composable predicate over entities of type `T`.
///
/// Cloning is cheap and preserves identity (see [`Specification::ptr_eq`]).
pub struct Specification<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    name: Option<Arc<str>>,
    symbolic: Symbolic<T>,
    body: Body<T>,
}

enum Body<T> {
    /// Evaluated by walking the tree.
    Tree,
    /// Counting aggregate: every operand is evaluated and the tally checked.
    Count {
        operands: Vec<Specification<T>>,
        quantifier: Quantifier,
    },
    /// Evaluated through a closure compiled on first use.
    Cached {
        source: Specification<T>,
        compiled: OnceLock<Compiled<T>>,
    },
}

impl<T: 'static> Specification<T> {
    fn with_body(var: Var, root: Node<T>, body: Body<T>) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: None,
                symbolic: Symbolic::new(var, root),
                body,
            }),
        }
    }

    /// Wraps a tree already known to be bound to `var` only.
    pub(crate) fn from_tree(var: Var, root: Node<T>) -> Self {
        Self::with_body(var, root, Body::Tree)
    }

    /// Creates a specification from a tree bound to `var`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::UnboundVariable`] if the tree references any
    /// other variable.
    pub fn from_node(var: Var, root: Node<T>) -> Result<Self> {
        if let Some(found) = root.free_vars().into_iter().find(|v| *v != var) {
            return Err(SpecError::UnboundVariable {
                expected: var,
                found,
            });
        }
        Ok(Self::from_tree(var, root))
    }

    /// Builds a tree over a fresh variable named `x`.
    pub fn build(build: impl FnOnce(&Var) -> Node<T>) -> Result<Self> {
        let var = Var::fresh("x");
        let root = build(&var);
        Self::from_node(var, root)
    }

    /// Leaf: `path op value`.
    pub fn compare(path: impl Into<Path>, op: CompareOp, value: impl Into<Value>) -> Self {
        let var = Var::fresh("x");
        let root = Node::compare(path.into().bind(&var), op, Node::Literal(value.into()));
        Self::from_tree(var, root)
    }

    /// Leaf: an opaque test over the value at `path`.
    pub fn test<F>(
        path: impl Into<Path>,
        operator: impl Into<Arc<str>>,
        operand: Option<Value>,
        test: F,
    ) -> Self
    where
        F: Fn(&Value) -> std::result::Result<bool, EvalError> + Send + Sync + 'static,
    {
        let var = Var::fresh("x");
        let root = Node::test(path.into().bind(&var), operator, operand, test);
        Self::from_tree(var, root)
    }

    /// Leaf: an infallible test over the whole entity.
    pub fn predicate<F>(label: impl Into<Arc<str>>, test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::try_predicate(label, move |e: &T| Ok(test(e)))
    }

    /// Leaf: a fallible test over the whole entity.
    pub fn try_predicate<F>(label: impl Into<Arc<str>>, test: F) -> Self
    where
        F: Fn(&T) -> std::result::Result<bool, EvalError> + Send + Sync + 'static,
    {
        let var = Var::fresh("x");
        let root = Node::custom(&var, label, test);
        Self::from_tree(var, root)
    }

    /// A constant specification. Its tree mentions no variable.
    pub fn always(value: bool) -> Self {
        Self::from_tree(Var::fresh("x"), Node::bool(value))
    }

    /// Returns a copy carrying a display name. The tree is shared.
    pub fn named(&self, name: impl Into<Arc<str>>) -> Self {
        let body = match &self.inner.body {
            Body::Tree => Body::Tree,
            Body::Count {
                operands,
                quantifier,
            } => Body::Count {
                operands: operands.clone(),
                quantifier: *quantifier,
            },
            Body::Cached { source, .. } => Body::Cached {
                source: source.clone(),
                compiled: OnceLock::new(),
            },
        };
        Self {
            inner: Arc::new(Inner {
                name: Some(name.into()),
                symbolic: self.inner.symbolic.clone(),
                body,
            }),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// The variable the tree is bound to.
    pub fn var(&self) -> &Var {
        &self.inner.symbolic.var
    }

    /// The tree itself.
    pub fn root(&self) -> &Node<T> {
        &self.inner.symbolic.body
    }

    /// The bound tree, for a query engine.
    pub fn to_symbolic(&self) -> Symbolic<T> {
        self.inner.symbolic.clone()
    }

    /// Renders the tree as text without evaluating it.
    pub fn explain(&self) -> String {
        self.inner.symbolic.body.explain()
    }

    /// True if both handles refer to the same specification instance.
    pub fn ptr_eq(a: &Specification<T>, b: &Specification<T>) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// The counting rule, for specifications built by `exactly`,
    /// `at_least` or `at_most`.
    pub fn quantifier(&self) -> Option<Quantifier> {
        match &self.inner.body {
            Body::Count { quantifier, .. } => Some(*quantifier),
            _ => None,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self.inner.body, Body::Cached { .. })
    }

    /// Wraps this specification so evaluation goes through a closure
    /// compiled once, on first use.
    ///
    /// Wrapping a cached specification returns the same instance.
    pub fn cached(&self) -> Self {
        if self.is_cached() {
            return self.clone();
        }
        let symbolic = &self.inner.symbolic;
        Self::with_body(
            symbolic.var.clone(),
            symbolic.body.clone(),
            Body::Cached {
                source: self.clone(),
                compiled: OnceLock::new(),
            },
        )
    }

    /// The specification a cached wrapper was created from.
    pub fn uncached(&self) -> &Self {
        match &self.inner.body {
            Body::Cached { source, .. } => source,
            _ => self,
        }
    }
}

impl<T: Record + 'static> Specification<T> {
    /// Tests an entity.
    ///
    /// Errors raised by leaves propagate unchanged.
    pub fn evaluate(&self, entity: &T) -> std::result::Result<bool, EvalError> {
        match &self.inner.body {
            Body::Tree => self.inner.symbolic.evaluate(entity),
            Body::Count {
                operands,
                quantifier,
            } => {
                let mut count = 0;
                for operand in operands {
                    if operand.evaluate(entity)? {
                        count += 1;
                    }
                }
                Ok(quantifier.accepts(count))
            }
            Body::Cached { compiled, .. } => self.materialize(compiled).call(entity),
        }
    }

    /// Evaluates while recording every condition, tracing both operands of
    /// each `And`/`Or`.
    ///
    /// Because no operand is skipped, a tree whose left operand guards the
    /// right one (`address is some AND address.city = ..`) can fail here
    /// where [`Specification::evaluate`] returns `false`.
    pub fn evaluate_with_trace(
        &self,
        entity: &T,
    ) -> std::result::Result<(bool, Trace), EvalError> {
        self.evaluate_with_trace_mode(entity, TraceMode::Exhaustive)
    }

    pub fn evaluate_with_trace_mode(
        &self,
        entity: &T,
        mode: TraceMode,
    ) -> std::result::Result<(bool, Trace), EvalError> {
        self.inner.symbolic.evaluate_with_trace(entity, mode)
    }

    /// Returns a directly callable predicate.
    ///
    /// For a cached specification this is the single materialized closure;
    /// otherwise a new one is compiled on every call.
    pub fn compiled(&self) -> Compiled<T> {
        match &self.inner.body {
            Body::Cached { compiled, .. } => self.materialize(compiled).clone(),
            _ => self.compile(),
        }
    }

    fn materialize<'a>(&self, lock: &'a OnceLock<Compiled<T>>) -> &'a Compiled<T> {
        lock.get_or_init(|| {
            let compiled = compile(&self.inner.symbolic);
            debug!(
                event = "materialize",
                nodes = compiled.node_count() as u64,
                spec = %self,
                "Compiled cached specification"
            );
            compiled
        })
    }

    /// Compiles the tree into a new closure.
    pub fn compile(&self) -> Compiled<T> {
        compile(&self.inner.symbolic)
    }

    /// Wraps this specification with a per-entity result cache.
    pub fn memoized(&self) -> Memoized<T> {
        Memoized::new(self.clone())
    }
}

impl<T> Clone for Specification<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Display for Specification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.name {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.inner.symbolic.body),
        }
    }
}

impl<T> fmt::Debug for Specification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.inner.body {
            Body::Tree => "tree",
            Body::Count { .. } => "count",
            Body::Cached { .. } => "cached",
        };
        f.debug_struct("Specification")
            .field("name", &self.inner.name)
            .field("kind", &kind)
            .field("var", &self.inner.symbolic.var)
            .field("tree", &self.inner.symbolic.body.explain())
            .finish()
    }
}
