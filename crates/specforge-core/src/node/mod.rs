//! Predicate trees.
//!
//! A [`Node`] is an immutable expression tree whose only free variable is
//! the entity under test. Trees are plain values: combinators copy and
//! re-bind them, they never mutate an existing tree.

mod path;

#[cfg(test)]
mod tests;

pub use path::{Path, Segment};

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::EvalError;
use crate::value::Value;
use crate::var::Var;

/// Opaque test over a value read through an access path.
pub type ValueTest = Arc<dyn Fn(&Value) -> Result<bool, EvalError> + Send + Sync>;

/// Opaque test over the whole entity.
pub type EntityTest<T> = Arc<dyn Fn(&T) -> Result<bool, EvalError> + Send + Sync>;

/// A predicate tree node.
///
/// `Member` and `Call` chains form access paths rooted at a `Var`; `Leaf`
/// is the terminal boolean test; `Add` only appears in the arithmetic fold
/// built by the counting combinators.
pub enum Node<T> {
    /// The free variable (the entity itself).
    Var(Var),
    Literal(Value),
    Member {
        target: Box<Node<T>>,
        name: Arc<str>,
    },
    Call {
        target: Box<Node<T>>,
        method: Arc<str>,
        args: Vec<Node<T>>,
    },
    Leaf(Leaf<T>),
    And(Box<Node<T>>, Box<Node<T>>),
    Or(Box<Node<T>>, Box<Node<T>>),
    Not(Box<Node<T>>),
    Conditional {
        test: Box<Node<T>>,
        if_true: Box<Node<T>>,
        if_false: Box<Node<T>>,
    },
    Add(Box<Node<T>>, Box<Node<T>>),
}

/// Terminal tests.
pub enum Leaf<T> {
    /// Ordering or equality between two value-producing nodes.
    Compare {
        left: Box<Node<T>>,
        op: CompareOp,
        right: Box<Node<T>>,
    },
    /// An opaque value test. `operator` and `operand` are kept so the test
    /// can be rendered and translated by a query engine.
    Test {
        subject: Box<Node<T>>,
        operator: Arc<str>,
        operand: Option<Value>,
        test: ValueTest,
    },
    /// An opaque test over the entity bound to `var`.
    Custom {
        var: Var,
        label: Arc<str>,
        test: EntityTest<T>,
    },
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl<T> Node<T> {
    // Constructors for common nodes

    pub fn var(var: &Var) -> Self {
        Node::Var(var.clone())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Node::Literal(value.into())
    }

    pub fn bool(value: bool) -> Self {
        Node::Literal(Value::Bool(value))
    }

    pub fn int(value: i64) -> Self {
        Node::Literal(Value::I64(value))
    }

    pub fn member(target: Node<T>, name: impl Into<Arc<str>>) -> Self {
        Node::Member {
            target: Box::new(target),
            name: name.into(),
        }
    }

    pub fn call(target: Node<T>, method: impl Into<Arc<str>>, args: Vec<Node<T>>) -> Self {
        Node::Call {
            target: Box::new(target),
            method: method.into(),
            args,
        }
    }

    pub fn and(left: Node<T>, right: Node<T>) -> Self {
        Node::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Node<T>, right: Node<T>) -> Self {
        Node::Or(Box::new(left), Box::new(right))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Node<T>) -> Self {
        Node::Not(Box::new(operand))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(left: Node<T>, right: Node<T>) -> Self {
        Node::Add(Box::new(left), Box::new(right))
    }

    pub fn conditional(test: Node<T>, if_true: Node<T>, if_false: Node<T>) -> Self {
        Node::Conditional {
            test: Box::new(test),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
        }
    }

    pub fn compare(left: Node<T>, op: CompareOp, right: Node<T>) -> Self {
        Node::Leaf(Leaf::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn eq(left: Node<T>, right: Node<T>) -> Self {
        Self::compare(left, CompareOp::Eq, right)
    }

    pub fn ge(left: Node<T>, right: Node<T>) -> Self {
        Self::compare(left, CompareOp::Ge, right)
    }

    pub fn le(left: Node<T>, right: Node<T>) -> Self {
        Self::compare(left, CompareOp::Le, right)
    }

    pub fn test<F>(
        subject: Node<T>,
        operator: impl Into<Arc<str>>,
        operand: Option<Value>,
        test: F,
    ) -> Self
    where
        F: Fn(&Value) -> Result<bool, EvalError> + Send + Sync + 'static,
    {
        Node::Leaf(Leaf::Test {
            subject: Box::new(subject),
            operator: operator.into(),
            operand,
            test: Arc::new(test),
        })
    }

    pub fn custom<F>(var: &Var, label: impl Into<Arc<str>>, test: F) -> Self
    where
        F: Fn(&T) -> Result<bool, EvalError> + Send + Sync + 'static,
    {
        Node::Leaf(Leaf::Custom {
            var: var.clone(),
            label: label.into(),
            test: Arc::new(test),
        })
    }

    /// Direct children, left to right.
    pub fn children(&self) -> Vec<&Node<T>> {
        match self {
            Node::Var(_) | Node::Literal(_) => Vec::new(),
            Node::Member { target, .. } => vec![target.as_ref()],
            Node::Call { target, args, .. } => {
                let mut children = Vec::with_capacity(args.len() + 1);
                children.push(target.as_ref());
                children.extend(args.iter());
                children
            }
            Node::Leaf(leaf) => match leaf {
                Leaf::Compare { left, right, .. } => vec![left.as_ref(), right.as_ref()],
                Leaf::Test { subject, .. } => vec![subject.as_ref()],
                Leaf::Custom { .. } => Vec::new(),
            },
            Node::And(l, r) | Node::Or(l, r) | Node::Add(l, r) => vec![l.as_ref(), r.as_ref()],
            Node::Not(inner) => vec![inner.as_ref()],
            Node::Conditional {
                test,
                if_true,
                if_false,
            } => vec![test.as_ref(), if_true.as_ref(), if_false.as_ref()],
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children().into_iter().map(Node::size).sum::<usize>()
    }

    /// Every variable occurring anywhere in the tree.
    pub fn free_vars(&self) -> BTreeSet<Var> {
        let mut vars = BTreeSet::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars(&self, vars: &mut BTreeSet<Var>) {
        match self {
            Node::Var(v) => {
                vars.insert(v.clone());
            }
            Node::Leaf(Leaf::Custom { var, .. }) => {
                vars.insert(var.clone());
            }
            other => {
                for child in other.children() {
                    child.collect_vars(vars);
                }
            }
        }
    }

    /// True if the tree references `var` at least once.
    pub fn references(&self, var: &Var) -> bool {
        match self {
            Node::Var(v) => v == var,
            Node::Leaf(Leaf::Custom { var: v, .. }) => v == var,
            other => other.children().into_iter().any(|c| c.references(var)),
        }
    }

    /// Structural equality. Opaque tests compare by identity of their
    /// closures; variables compare by identity.
    pub fn structurally_eq(&self, other: &Node<T>) -> bool {
        match (self, other) {
            (Node::Var(a), Node::Var(b)) => a == b,
            (Node::Literal(a), Node::Literal(b)) => a == b && a.type_name() == b.type_name(),
            (
                Node::Member { target: t1, name: n1 },
                Node::Member { target: t2, name: n2 },
            ) => n1 == n2 && t1.structurally_eq(t2),
            (
                Node::Call {
                    target: t1,
                    method: m1,
                    args: a1,
                },
                Node::Call {
                    target: t2,
                    method: m2,
                    args: a2,
                },
            ) => {
                m1 == m2
                    && a1.len() == a2.len()
                    && t1.structurally_eq(t2)
                    && a1.iter().zip(a2).all(|(x, y)| x.structurally_eq(y))
            }
            (Node::Leaf(a), Node::Leaf(b)) => a.structurally_eq(b),
            (Node::And(l1, r1), Node::And(l2, r2))
            | (Node::Or(l1, r1), Node::Or(l2, r2))
            | (Node::Add(l1, r1), Node::Add(l2, r2)) => {
                l1.structurally_eq(l2) && r1.structurally_eq(r2)
            }
            (Node::Not(a), Node::Not(b)) => a.structurally_eq(b),
            (
                Node::Conditional {
                    test: t1,
                    if_true: a1,
                    if_false: b1,
                },
                Node::Conditional {
                    test: t2,
                    if_true: a2,
                    if_false: b2,
                },
            ) => t1.structurally_eq(t2) && a1.structurally_eq(a2) && b1.structurally_eq(b2),
            _ => false,
        }
    }
}

impl<T> Leaf<T> {
    fn structurally_eq(&self, other: &Leaf<T>) -> bool {
        match (self, other) {
            (
                Leaf::Compare {
                    left: l1,
                    op: o1,
                    right: r1,
                },
                Leaf::Compare {
                    left: l2,
                    op: o2,
                    right: r2,
                },
            ) => o1 == o2 && l1.structurally_eq(l2) && r1.structurally_eq(r2),
            (
                Leaf::Test {
                    subject: s1,
                    operator: op1,
                    operand: v1,
                    test: f1,
                },
                Leaf::Test {
                    subject: s2,
                    operator: op2,
                    operand: v2,
                    test: f2,
                },
            ) => op1 == op2 && v1 == v2 && Arc::ptr_eq(f1, f2) && s1.structurally_eq(s2),
            (
                Leaf::Custom {
                    var: x1,
                    label: n1,
                    test: f1,
                },
                Leaf::Custom {
                    var: x2,
                    label: n2,
                    test: f2,
                },
            ) => x1 == x2 && n1 == n2 && Arc::ptr_eq(f1, f2),
            _ => false,
        }
    }
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        match self {
            Node::Var(v) => Node::Var(v.clone()),
            Node::Literal(v) => Node::Literal(v.clone()),
            Node::Member { target, name } => Node::Member {
                target: target.clone(),
                name: name.clone(),
            },
            Node::Call {
                target,
                method,
                args,
            } => Node::Call {
                target: target.clone(),
                method: method.clone(),
                args: args.clone(),
            },
            Node::Leaf(leaf) => Node::Leaf(leaf.clone()),
            Node::And(l, r) => Node::And(l.clone(), r.clone()),
            Node::Or(l, r) => Node::Or(l.clone(), r.clone()),
            Node::Not(inner) => Node::Not(inner.clone()),
            Node::Conditional {
                test,
                if_true,
                if_false,
            } => Node::Conditional {
                test: test.clone(),
                if_true: if_true.clone(),
                if_false: if_false.clone(),
            },
            Node::Add(l, r) => Node::Add(l.clone(), r.clone()),
        }
    }
}

impl<T> Clone for Leaf<T> {
    fn clone(&self) -> Self {
        match self {
            Leaf::Compare { left, op, right } => Leaf::Compare {
                left: left.clone(),
                op: *op,
                right: right.clone(),
            },
            Leaf::Test {
                subject,
                operator,
                operand,
                test,
            } => Leaf::Test {
                subject: subject.clone(),
                operator: operator.clone(),
                operand: operand.clone(),
                test: Arc::clone(test),
            },
            Leaf::Custom { var, label, test } => Leaf::Custom {
                var: var.clone(),
                label: label.clone(),
                test: Arc::clone(test),
            },
        }
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Var(v) => f.debug_tuple("Var").field(v).finish(),
            Node::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Node::Member { target, name } => f
                .debug_struct("Member")
                .field("target", target)
                .field("name", name)
                .finish(),
            Node::Call {
                target,
                method,
                args,
            } => f
                .debug_struct("Call")
                .field("target", target)
                .field("method", method)
                .field("args", args)
                .finish(),
            Node::Leaf(leaf) => f.debug_tuple("Leaf").field(leaf).finish(),
            Node::And(l, r) => f.debug_tuple("And").field(l).field(r).finish(),
            Node::Or(l, r) => f.debug_tuple("Or").field(l).field(r).finish(),
            Node::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
            Node::Conditional {
                test,
                if_true,
                if_false,
            } => f
                .debug_struct("Conditional")
                .field("test", test)
                .field("if_true", if_true)
                .field("if_false", if_false)
                .finish(),
            Node::Add(l, r) => f.debug_tuple("Add").field(l).field(r).finish(),
        }
    }
}

impl<T> fmt::Debug for Leaf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Compare { left, op, right } => f
                .debug_struct("Compare")
                .field("left", left)
                .field("op", op)
                .field("right", right)
                .finish(),
            Leaf::Test {
                subject,
                operator,
                operand,
                ..
            } => f
                .debug_struct("Test")
                .field("subject", subject)
                .field("operator", operator)
                .field("operand", operand)
                .finish_non_exhaustive(),
            Leaf::Custom { var, label, .. } => f
                .debug_struct("Custom")
                .field("var", var)
                .field("label", label)
                .finish_non_exhaustive(),
        }
    }
}

/// A tree together with the variable it is bound to: the form handed to
/// query engines.
pub struct Symbolic<T> {
    pub var: Var,
    pub body: Node<T>,
}

impl<T> Symbolic<T> {
    pub fn new(var: Var, body: Node<T>) -> Self {
        Self { var, body }
    }

    /// Structural equality modulo the name of the bound variable.
    pub fn alpha_eq(&self, other: &Symbolic<T>) -> bool {
        if self.var == other.var {
            return self.body.structurally_eq(&other.body);
        }
        let rebound = other.body.substitute(&other.var, &self.var);
        self.body.structurally_eq(&rebound)
    }
}

impl<T> Clone for Symbolic<T> {
    fn clone(&self) -> Self {
        Self {
            var: self.var.clone(),
            body: self.body.clone(),
        }
    }
}

impl<T> fmt::Debug for Symbolic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbolic")
            .field("var", &self.var)
            .field("body", &self.body)
            .finish()
    }
}
