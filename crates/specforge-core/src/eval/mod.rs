//! Tree-walking evaluation.
//!
//! The helpers at the bottom of this module define value semantics
//! (member access, comparison, addition) and are shared with the closure
//! compiler so both paths agree on every edge case.

#[cfg(test)]
mod tests;

use std::cmp::Ordering;

use crate::error::EvalError;
use crate::node::{CompareOp, Leaf, Node, Symbolic};
use crate::record::Record;
use crate::value::{compare_values, values_equal, Value};
use crate::var::Var;

/// Context for evaluating one tree against one entity.
pub struct Scope<'a, T> {
    /// The variable the tree is bound to.
    pub var: &'a Var,
    /// The entity standing in for `var`.
    pub entity: &'a T,
}

impl<'a, T: Record> Scope<'a, T> {
    pub fn new(var: &'a Var, entity: &'a T) -> Self {
        Self { var, entity }
    }

    /// Evaluates a boolean position. `And`/`Or` short-circuit.
    pub fn eval_bool(&self, node: &Node<T>) -> Result<bool, EvalError> {
        match node {
            Node::And(l, r) => Ok(self.eval_bool(l)? && self.eval_bool(r)?),
            Node::Or(l, r) => Ok(self.eval_bool(l)? || self.eval_bool(r)?),
            Node::Not(inner) => Ok(!self.eval_bool(inner)?),
            Node::Leaf(leaf) => self.eval_leaf(leaf),
            other => expect_bool(self.eval_value(other)?),
        }
    }

    /// Evaluates a value position.
    pub fn eval_value(&self, node: &Node<T>) -> Result<Value, EvalError> {
        match node {
            Node::Var(v) => {
                self.check_var(v)?;
                Err(EvalError::BareVariable(v.name().to_string()))
            }

            Node::Literal(v) => Ok(v.clone()),

            Node::Member { target, name } => match target.as_ref() {
                Node::Var(v) => {
                    self.check_var(v)?;
                    root_member(self.entity, name)
                }
                other => member_of(&self.eval_value(other)?, name),
            },

            Node::Call {
                target,
                method,
                args,
            } => {
                let args = args
                    .iter()
                    .map(|a| self.eval_value(a))
                    .collect::<Result<Vec<_>, _>>()?;
                match target.as_ref() {
                    Node::Var(v) => {
                        self.check_var(v)?;
                        root_call(self.entity, method, &args)
                    }
                    other => call_on(&self.eval_value(other)?, method, &args),
                }
            }

            Node::Conditional {
                test,
                if_true,
                if_false,
            } => {
                if self.eval_bool(test)? {
                    self.eval_value(if_true)
                } else {
                    self.eval_value(if_false)
                }
            }

            Node::Add(l, r) => add_values(&self.eval_value(l)?, &self.eval_value(r)?),

            Node::Leaf(_) | Node::And(..) | Node::Or(..) | Node::Not(_) => {
                Ok(Value::Bool(self.eval_bool(node)?))
            }
        }
    }

    fn eval_leaf(&self, leaf: &Leaf<T>) -> Result<bool, EvalError> {
        match leaf {
            Leaf::Compare { left, op, right } => {
                let l = self.eval_value(left)?;
                let r = self.eval_value(right)?;
                apply_compare(*op, &l, &r)
            }
            Leaf::Test { subject, test, .. } => test(&self.eval_value(subject)?),
            Leaf::Custom { var, test, .. } => {
                self.check_var(var)?;
                test(self.entity)
            }
        }
    }

    fn check_var(&self, v: &Var) -> Result<(), EvalError> {
        if v == self.var {
            Ok(())
        } else {
            Err(foreign_var(self.var, v))
        }
    }
}

impl<T: Record> Node<T> {
    /// Evaluates this tree with `var` bound to `entity`.
    pub fn evaluate(&self, var: &Var, entity: &T) -> Result<bool, EvalError> {
        Scope::new(var, entity).eval_bool(self)
    }
}

impl<T: Record> Symbolic<T> {
    pub fn evaluate(&self, entity: &T) -> Result<bool, EvalError> {
        self.body.evaluate(&self.var, entity)
    }
}

// ---------------------------------------------------------------------------
// Value semantics shared with the compiler
// ---------------------------------------------------------------------------

pub(crate) fn foreign_var(expected: &Var, found: &Var) -> EvalError {
    EvalError::ForeignVariable {
        expected: format!("{expected:?}"),
        found: format!("{found:?}"),
    }
}

pub(crate) fn expect_bool(value: Value) -> Result<bool, EvalError> {
    value.as_bool().ok_or_else(|| EvalError::NotBoolean {
        found: value.describe(),
    })
}

pub(crate) fn root_member<R: Record + ?Sized>(entity: &R, name: &str) -> Result<Value, EvalError> {
    entity.member(name).ok_or_else(|| EvalError::UnknownMember {
        member: name.to_string(),
    })
}

pub(crate) fn root_call<R: Record + ?Sized>(
    entity: &R,
    method: &str,
    args: &[Value],
) -> Result<Value, EvalError> {
    entity
        .call(method, args)
        .ok_or_else(|| EvalError::UnknownMethod {
            method: method.to_string(),
        })
}

pub(crate) fn member_of(target: &Value, name: &str) -> Result<Value, EvalError> {
    match target {
        Value::Record(r) => root_member(r.as_ref(), name),
        Value::None => Err(EvalError::NullAccess {
            member: name.to_string(),
        }),
        other => Err(EvalError::NotARecord {
            member: name.to_string(),
            found: other.describe(),
        }),
    }
}

pub(crate) fn call_on(target: &Value, method: &str, args: &[Value]) -> Result<Value, EvalError> {
    match target {
        Value::Record(r) => root_call(r.as_ref(), method, args),
        Value::None => Err(EvalError::NullAccess {
            member: format!("{method}()"),
        }),
        other => Err(EvalError::NotARecord {
            member: format!("{method}()"),
            found: other.describe(),
        }),
    }
}

/// Equality never fails; an ordering involving a missing value or a NaN
/// is false; ordering values of unrelated kinds is an error.
pub(crate) fn apply_compare(op: CompareOp, l: &Value, r: &Value) -> Result<bool, EvalError> {
    let holds: fn(Ordering) -> bool = match op {
        CompareOp::Eq => return Ok(values_equal(l, r)),
        CompareOp::Ne => return Ok(!values_equal(l, r)),
        CompareOp::Lt => Ordering::is_lt,
        CompareOp::Le => Ordering::is_le,
        CompareOp::Gt => Ordering::is_gt,
        CompareOp::Ge => Ordering::is_ge,
    };
    if l.is_none() || r.is_none() {
        return Ok(false);
    }
    match compare_values(l, r) {
        Some(ordering) => Ok(holds(ordering)),
        None if l.as_f64().is_some() && r.as_f64().is_some() => Ok(false),
        None => Err(EvalError::Incomparable {
            left: l.describe(),
            right: r.describe(),
        }),
    }
}

pub(crate) fn add_values(l: &Value, r: &Value) -> Result<Value, EvalError> {
    let sum = match (l, r) {
        (Value::I64(a), Value::I64(b)) => a.checked_add(*b).map(Value::I64),
        (Value::F64(a), Value::F64(b)) => Some(Value::F64(a + b)),
        (Value::I64(a), Value::F64(b)) => Some(Value::F64(*a as f64 + b)),
        (Value::F64(a), Value::I64(b)) => Some(Value::F64(a + *b as f64)),
        _ => None,
    };
    sum.ok_or_else(|| EvalError::Arithmetic {
        left: l.describe(),
        right: r.describe(),
    })
}
