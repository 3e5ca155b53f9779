//! Compilation of predicate trees into directly callable closures.
//!
//! The tree is walked once and each node becomes a boxed closure that
//! captures its already compiled children. Calling the result performs no
//! matching on node kinds and no lookups beyond the record accesses the
//! tree itself asks for.
//!
//! # Semantics
//!
//! Compiled predicates share their value semantics with the interpreter
//! (`eval`): same short-circuiting, same comparison rules, same errors.

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

use crate::error::EvalError;
use crate::eval::{
    add_values, apply_compare, call_on, expect_bool, foreign_var, member_of, root_call,
    root_member,
};
use crate::node::{Leaf, Node, Symbolic};
use crate::record::Record;
use crate::value::Value;
use crate::var::Var;

type BoolFn<T> = Box<dyn Fn(&T) -> Result<bool, EvalError> + Send + Sync>;
type ValueFn<T> = Box<dyn Fn(&T) -> Result<Value, EvalError> + Send + Sync>;

/// A compiled predicate.
///
/// Cheap to clone; clones share the same closure.
pub struct Compiled<T> {
    f: Arc<dyn Fn(&T) -> Result<bool, EvalError> + Send + Sync>,
    nodes: usize,
}

impl<T> Compiled<T> {
    /// Tests an entity.
    #[inline]
    pub fn call(&self, entity: &T) -> Result<bool, EvalError> {
        (self.f)(entity)
    }

    /// The underlying closure, for callers that want a plain `Fn`.
    pub fn as_fn(&self) -> &(dyn Fn(&T) -> Result<bool, EvalError> + Send + Sync) {
        &*self.f
    }

    /// Number of tree nodes the closure was compiled from.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    pub fn ptr_eq(a: &Compiled<T>, b: &Compiled<T>) -> bool {
        Arc::ptr_eq(&a.f, &b.f)
    }
}

impl<T> Clone for Compiled<T> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
            nodes: self.nodes,
        }
    }
}

impl<T> fmt::Debug for Compiled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiled")
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

/// Compiles a bound tree.
pub fn compile<T: Record + 'static>(symbolic: &Symbolic<T>) -> Compiled<T> {
    let compiler = Compiler {
        var: &symbolic.var,
    };
    Compiled {
        f: Arc::from(compiler.bool_fn(&symbolic.body)),
        nodes: symbolic.body.size(),
    }
}

struct Compiler<'a> {
    var: &'a Var,
}

impl Compiler<'_> {
    fn bool_fn<T: Record + 'static>(&self, node: &Node<T>) -> BoolFn<T> {
        match node {
            Node::And(l, r) => {
                let (l, r) = (self.bool_fn(l), self.bool_fn(r));
                Box::new(move |e: &T| Ok(l(e)? && r(e)?))
            }
            Node::Or(l, r) => {
                let (l, r) = (self.bool_fn(l), self.bool_fn(r));
                Box::new(move |e: &T| Ok(l(e)? || r(e)?))
            }
            Node::Not(inner) => {
                let inner = self.bool_fn(inner);
                Box::new(move |e: &T| Ok(!inner(e)?))
            }
            Node::Literal(Value::Bool(b)) => {
                let b = *b;
                Box::new(move |_: &T| Ok(b))
            }
            Node::Leaf(Leaf::Compare { left, op, right }) => {
                let (l, r, op) = (self.value_fn(left), self.value_fn(right), *op);
                Box::new(move |e: &T| apply_compare(op, &l(e)?, &r(e)?))
            }
            Node::Leaf(Leaf::Test { subject, test, .. }) => {
                let (subject, test) = (self.value_fn(subject), Arc::clone(test));
                Box::new(move |e: &T| test(&subject(e)?))
            }
            Node::Leaf(Leaf::Custom { var, test, .. }) => {
                if var != self.var {
                    let err = foreign_var(self.var, var);
                    return Box::new(move |_: &T| Err(err.clone()));
                }
                let test = Arc::clone(test);
                Box::new(move |e: &T| test(e))
            }
            other => {
                let value = self.value_fn(other);
                Box::new(move |e: &T| expect_bool(value(e)?))
            }
        }
    }

    fn value_fn<T: Record + 'static>(&self, node: &Node<T>) -> ValueFn<T> {
        match node {
            Node::Var(v) => {
                let err = if v == self.var {
                    EvalError::BareVariable(v.name().to_string())
                } else {
                    foreign_var(self.var, v)
                };
                Box::new(move |_: &T| Err(err.clone()))
            }
            Node::Literal(value) => {
                let value = value.clone();
                Box::new(move |_: &T| Ok(value.clone()))
            }
            Node::Member { target, name } => {
                let name = name.clone();
                match target.as_ref() {
                    Node::Var(v) if v == self.var => {
                        Box::new(move |e: &T| root_member(e, &name))
                    }
                    other => {
                        let target = self.value_fn(other);
                        Box::new(move |e: &T| member_of(&target(e)?, &name))
                    }
                }
            }
            Node::Call {
                target,
                method,
                args,
            } => {
                let method = method.clone();
                let args: Vec<ValueFn<T>> = args.iter().map(|a| self.value_fn(a)).collect();
                let eval_args = move |e: &T| -> Result<Vec<Value>, EvalError> {
                    args.iter().map(|a| a(e)).collect()
                };
                match target.as_ref() {
                    Node::Var(v) if v == self.var => {
                        Box::new(move |e: &T| root_call(e, &method, &eval_args(e)?))
                    }
                    other => {
                        let target = self.value_fn(other);
                        Box::new(move |e: &T| {
                            let args = eval_args(e)?;
                            call_on(&target(e)?, &method, &args)
                        })
                    }
                }
            }
            Node::Conditional {
                test,
                if_true,
                if_false,
            } => {
                let test = self.bool_fn(test);
                let (a, b) = (self.value_fn(if_true), self.value_fn(if_false));
                Box::new(move |e: &T| if test(e)? { a(e) } else { b(e) })
            }
            Node::Add(l, r) => {
                let (l, r) = (self.value_fn(l), self.value_fn(r));
                Box::new(move |e: &T| add_values(&l(e)?, &r(e)?))
            }
            Node::Leaf(_) | Node::And(..) | Node::Or(..) | Node::Not(_) => {
                let f = self.bool_fn(node);
                Box::new(move |e: &T| f(e).map(Value::Bool))
            }
        }
    }
}
