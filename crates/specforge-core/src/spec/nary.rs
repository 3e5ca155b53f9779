//! N-ary combinators.
//!
//! `all` and `any_of` join operands with `And`/`Or`; `none_of` negates
//! `any_of`. The counting variants sum `IF (operand) THEN 1 ELSE 0` terms
//! and compare the sum against the threshold, while their direct
//! evaluation tallies every operand eagerly.
//!
//! Operands are joined pairwise into a balanced tree, so its depth grows
//! with the logarithm of the operand count. Left-to-right order is kept.

use std::fmt;

use super::{Body, Specification};
use crate::error::{Result, SpecError};
use crate::node::{CompareOp, Node};
use crate::var::Var;

/// Counting rule of an `exactly`/`at_least`/`at_most` specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
}

impl Quantifier {
    pub fn threshold(self) -> usize {
        match self {
            Quantifier::Exactly(n) | Quantifier::AtLeast(n) | Quantifier::AtMost(n) => n,
        }
    }

    /// True if `count` satisfied operands meet the rule.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Quantifier::Exactly(n) => count == n,
            Quantifier::AtLeast(n) => count >= n,
            Quantifier::AtMost(n) => count <= n,
        }
    }

    /// Operator comparing the symbolic sum against the threshold.
    pub fn compare_op(self) -> CompareOp {
        match self {
            Quantifier::Exactly(_) => CompareOp::Eq,
            Quantifier::AtLeast(_) => CompareOp::Ge,
            Quantifier::AtMost(_) => CompareOp::Le,
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Exactly(n) => write!(f, "exactly {n}"),
            Quantifier::AtLeast(n) => write!(f, "at least {n}"),
            Quantifier::AtMost(n) => write!(f, "at most {n}"),
        }
    }
}

/// Collects operands, rejecting an empty sequence.
fn collect_operands<T>(
    combinator: &str,
    specs: impl IntoIterator<Item = Specification<T>>,
) -> Result<Vec<Specification<T>>> {
    let operands: Vec<_> = specs.into_iter().collect();
    if operands.is_empty() {
        return Err(SpecError::InvalidArgument(format!(
            "{combinator} requires at least one specification"
        )));
    }
    Ok(operands)
}

/// Joins adjacent pairs until one node is left.
fn balanced<T>(
    mut nodes: Vec<Node<T>>,
    join: fn(Node<T>, Node<T>) -> Node<T>,
) -> Option<Node<T>> {
    while nodes.len() > 1 {
        let mut next = Vec::with_capacity(nodes.len().div_ceil(2));
        let mut pending = nodes.into_iter();
        while let Some(left) = pending.next() {
            next.push(match pending.next() {
                Some(right) => join(left, right),
                None => left,
            });
        }
        nodes = next;
    }
    nodes.pop()
}

impl<T: 'static> Specification<T> {
    /// Copies every operand onto one fresh variable, named after the first.
    fn rebind_all(operands: &[Specification<T>]) -> (Var, Vec<Node<T>>) {
        let name = operands.first().map_or("x", |s| s.var().name());
        let shared = Var::fresh(name);
        let trees = operands
            .iter()
            .map(|s| s.root().substitute(s.var(), &shared))
            .collect();
        (shared, trees)
    }

    fn chain(
        combinator: &str,
        specs: impl IntoIterator<Item = Specification<T>>,
        join: fn(Node<T>, Node<T>) -> Node<T>,
    ) -> Result<Self> {
        let operands = collect_operands(combinator, specs)?;
        let (shared, trees) = Self::rebind_all(&operands);
        match balanced(trees, join) {
            Some(root) => Ok(Self::from_tree(shared, root)),
            None => Err(SpecError::InvalidArgument(format!(
                "{combinator} requires at least one specification"
            ))),
        }
    }

    /// True when every operand holds.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidArgument`] for an empty sequence.
    pub fn all(specs: impl IntoIterator<Item = Specification<T>>) -> Result<Self> {
        Self::chain("all", specs, Node::and)
    }

    /// True when at least one operand holds.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidArgument`] for an empty sequence.
    pub fn any_of(specs: impl IntoIterator<Item = Specification<T>>) -> Result<Self> {
        Self::chain("any_of", specs, Node::or)
    }

    /// True when no operand holds: `NOT (any_of(...))`.
    pub fn none_of(specs: impl IntoIterator<Item = Specification<T>>) -> Result<Self> {
        let any = Self::chain("none_of", specs, Node::or)?;
        Ok(Self::from_tree(any.var().clone(), Node::not(any.root().clone())))
    }

    /// True when exactly `n` operands hold.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidArgument`] for an empty sequence or when
    /// `n` exceeds the number of operands.
    pub fn exactly(n: usize, specs: impl IntoIterator<Item = Specification<T>>) -> Result<Self> {
        Self::counting(Quantifier::Exactly(n), specs)
    }

    /// True when at least `n` operands hold.
    pub fn at_least(n: usize, specs: impl IntoIterator<Item = Specification<T>>) -> Result<Self> {
        Self::counting(Quantifier::AtLeast(n), specs)
    }

    /// True when at most `n` operands hold.
    pub fn at_most(n: usize, specs: impl IntoIterator<Item = Specification<T>>) -> Result<Self> {
        Self::counting(Quantifier::AtMost(n), specs)
    }

    /// Builds `(IF (a) THEN 1 ELSE 0) + (IF (b) THEN 1 ELSE 0) + ... op n`.
    pub fn counting(
        quantifier: Quantifier,
        specs: impl IntoIterator<Item = Specification<T>>,
    ) -> Result<Self> {
        let operands = collect_operands("counting combinator", specs)?;
        let n = quantifier.threshold();
        if n > operands.len() {
            return Err(SpecError::InvalidArgument(format!(
                "{quantifier} is out of range for {} specifications",
                operands.len()
            )));
        }

        let (shared, trees) = Self::rebind_all(&operands);
        let terms = trees
            .into_iter()
            .map(|t| Node::conditional(t, Node::int(1), Node::int(0)))
            .collect();
        let sum = balanced(terms, Node::add)
            .ok_or_else(|| SpecError::InvalidArgument("no operands to count".to_string()))?;
        let threshold = i64::try_from(n)
            .map_err(|_| SpecError::InvalidArgument(format!("threshold {n} is too large")))?;
        let root = Node::compare(sum, quantifier.compare_op(), Node::int(threshold));

        Ok(Self::with_body(
            shared,
            root,
            Body::Count {
                operands,
                quantifier,
            },
        ))
    }
}
