//! Human-readable rendering of predicate trees.
//!
//! Rendering is purely structural: nothing is evaluated.
//!
//! | Node | Rendering |
//! |------|-----------|
//! | `And` / `Or` | `(left) AND (right)` |
//! | `Not` | `NOT (operand)` |
//! | `Conditional` | `IF (test) THEN a ELSE b` |
//! | `Add` | `(IF (t) THEN 1 ELSE 0) + rest` |
//! | `Member` / `Call` | `x.address.city`, `x.older_than(30)` |
//! | `Leaf` | `x.age >= 18`, `x.name starts_with "A"`, `label(x)` |

use std::fmt;

use crate::node::{Leaf, Node};

impl<T> Node<T> {
    /// Renders the tree as text.
    pub fn explain(&self) -> String {
        self.to_string()
    }
}

impl<T> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Var(v) => write!(f, "{v}"),
            Node::Literal(v) => write!(f, "{v}"),
            Node::Member { target, name } => write!(f, "{target}.{name}"),
            Node::Call {
                target,
                method,
                args,
            } => {
                write!(f, "{target}.{method}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Node::Leaf(leaf) => write!(f, "{leaf}"),
            Node::And(l, r) => write!(f, "({l}) AND ({r})"),
            Node::Or(l, r) => write!(f, "({l}) OR ({r})"),
            Node::Not(inner) => write!(f, "NOT ({inner})"),
            Node::Conditional {
                test,
                if_true,
                if_false,
            } => write!(f, "IF ({test}) THEN {if_true} ELSE {if_false}"),
            Node::Add(l, r) => {
                write_term(f, l)?;
                f.write_str(" + ")?;
                write_term(f, r)
            }
        }
    }
}

/// Writes one operand of `+`, grouping conditionals.
fn write_term<T>(f: &mut fmt::Formatter<'_>, term: &Node<T>) -> fmt::Result {
    match term {
        Node::Conditional { .. } => write!(f, "({term})"),
        _ => write!(f, "{term}"),
    }
}

impl<T> fmt::Display for Leaf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Compare { left, op, right } => write!(f, "{left} {op} {right}"),
            Leaf::Test {
                subject,
                operator,
                operand,
                ..
            } => match operand {
                Some(operand) => write!(f, "{subject} {operator} {operand}"),
                None => write!(f, "{subject} {operator}"),
            },
            Leaf::Custom { var, label, .. } => write!(f, "{label}({var})"),
        }
    }
}
