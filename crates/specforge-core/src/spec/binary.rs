//! Binary combinators.
//!
//! Each combinator copies both operand trees onto one freshly chosen
//! variable and wraps them:
//!
//! | Combinator | Tree |
//! |---|---|
//! | `and` | `And(A, B)` |
//! | `or` | `Or(A, B)` |
//! | `not` | `Not(A)` |
//! | `and_not` | `And(A, Not(B))` |
//! | `xor` | `Or(And(A, Not(B)), And(Not(A), B))` |
//! | `implies` | `Or(Not(A), B)` |
//! | `iff` | `Or(And(A, B), And(Not(A), Not(B)))` |
//! | `nand` | `Not(And(A, B))` |
//! | `nor` | `Not(Or(A, B))` |

use std::ops::{BitAnd, BitOr, BitXor, Not};

use super::Specification;
use crate::node::Node;
use crate::var::Var;

impl<T: 'static> Specification<T> {
    /// Copies both trees onto a shared fresh variable.
    fn unify(&self, other: &Specification<T>) -> (Var, Node<T>, Node<T>) {
        let shared = Var::fresh(self.var().name());
        let a = self.root().substitute(self.var(), &shared);
        let b = other.root().substitute(other.var(), &shared);
        (shared, a, b)
    }

    pub fn and(&self, other: &Specification<T>) -> Self {
        let (x, a, b) = self.unify(other);
        Self::from_tree(x, Node::and(a, b))
    }

    pub fn or(&self, other: &Specification<T>) -> Self {
        let (x, a, b) = self.unify(other);
        Self::from_tree(x, Node::or(a, b))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Self {
        let shared = Var::fresh(self.var().name());
        let a = self.root().substitute(self.var(), &shared);
        Self::from_tree(shared, Node::not(a))
    }

    /// True when `self` holds and `other` does not.
    pub fn and_not(&self, other: &Specification<T>) -> Self {
        let (x, a, b) = self.unify(other);
        Self::from_tree(x, Node::and(a, Node::not(b)))
    }

    /// True when exactly one side holds.
    pub fn xor(&self, other: &Specification<T>) -> Self {
        let (x, a, b) = self.unify(other);
        let left = Node::and(a.clone(), Node::not(b.clone()));
        let right = Node::and(Node::not(a), b);
        Self::from_tree(x, Node::or(left, right))
    }

    /// False only when `self` holds and `other` does not.
    pub fn implies(&self, other: &Specification<T>) -> Self {
        let (x, a, b) = self.unify(other);
        Self::from_tree(x, Node::or(Node::not(a), b))
    }

    /// True when both sides agree.
    pub fn iff(&self, other: &Specification<T>) -> Self {
        let (x, a, b) = self.unify(other);
        let both = Node::and(a.clone(), b.clone());
        let neither = Node::and(Node::not(a), Node::not(b));
        Self::from_tree(x, Node::or(both, neither))
    }

    pub fn nand(&self, other: &Specification<T>) -> Self {
        let (x, a, b) = self.unify(other);
        Self::from_tree(x, Node::not(Node::and(a, b)))
    }

    pub fn nor(&self, other: &Specification<T>) -> Self {
        let (x, a, b) = self.unify(other);
        Self::from_tree(x, Node::not(Node::or(a, b)))
    }
}

// Operator syntax: `&a & &b`, `&a | &b`, `&a ^ &b`, `!&a`

impl<T: 'static> BitAnd for &Specification<T> {
    type Output = Specification<T>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl<T: 'static> BitAnd for Specification<T> {
    type Output = Specification<T>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(&rhs)
    }
}

impl<T: 'static> BitOr for &Specification<T> {
    type Output = Specification<T>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl<T: 'static> BitOr for Specification<T> {
    type Output = Specification<T>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(&rhs)
    }
}

impl<T: 'static> BitXor for &Specification<T> {
    type Output = Specification<T>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.xor(rhs)
    }
}

impl<T: 'static> BitXor for Specification<T> {
    type Output = Specification<T>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.xor(&rhs)
    }
}

impl<T: 'static> Not for &Specification<T> {
    type Output = Specification<T>;

    fn not(self) -> Self::Output {
        Specification::not(self)
    }
}

impl<T: 'static> Not for Specification<T> {
    type Output = Specification<T>;

    fn not(self) -> Self::Output {
        Specification::not(&self)
    }
}
