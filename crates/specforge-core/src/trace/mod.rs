//! Evaluation with a per-condition pass/fail record.
//!
//! The boolean skeleton (`And`, `Or`, `Not`) is walked structurally; every
//! other node is evaluated as a unit and contributes exactly one
//! [`TraceEntry`]. `Not` adds no entry of its own.


use std::fmt;

use crate::error::EvalError;
use crate::eval::Scope;
use crate::node::{Node, Symbolic};
use crate::record::Record;

/// How `And`/`Or` operands are traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    /// Both operands are always evaluated and recorded, so the trace lists
    /// every condition regardless of the outcome.
    #[default]
    Exhaustive,
    /// The right operand is skipped (neither evaluated nor recorded) once
    /// the left operand decides the result, matching plain evaluation.
    ShortCircuit,
}

/// One evaluated condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub condition: String,
    pub passed: bool,
}

/// Ordered record produced by one traced evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn passed(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter().filter(|e| e.passed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter().filter(|e| !e.passed)
    }

    fn record(&mut self, condition: String, passed: bool) {
        self.entries.push(TraceEntry { condition, passed });
    }
}

impl IntoIterator for Trace {
    type Item = TraceEntry;
    type IntoIter = std::vec::IntoIter<TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            let mark = if entry.passed { "PASS" } else { "FAIL" };
            writeln!(f, "[{mark}] {}", entry.condition)?;
        }
        Ok(())
    }
}

impl<T: Record> Symbolic<T> {
    /// Evaluates the tree and records each condition's outcome.
    ///
    /// Leaf errors propagate unchanged; the partial trace is discarded.
    ///
    /// In [`TraceMode::Exhaustive`] the right operand of an `And`/`Or` runs
    /// even when the left one decides the result. A guard such as
    /// `address is some AND address.city = "Lyon"` therefore fails with
    /// [`EvalError::NullAccess`] here while plain evaluation returns
    /// `false`. Use [`TraceMode::ShortCircuit`] to trace guarded trees.
    pub fn evaluate_with_trace(
        &self,
        entity: &T,
        mode: TraceMode,
    ) -> Result<(bool, Trace), EvalError> {
        let scope = Scope::new(&self.var, entity);
        let mut trace = Trace::default();
        let result = trace_node(&scope, &self.body, mode, &mut trace)?;
        Ok((result, trace))
    }
}

fn trace_node<T: Record>(
    scope: &Scope<'_, T>,
    node: &Node<T>,
    mode: TraceMode,
    trace: &mut Trace,
) -> Result<bool, EvalError> {
    match node {
        Node::And(l, r) => {
            let left = trace_node(scope, l, mode, trace)?;
            if !left && mode == TraceMode::ShortCircuit {
                return Ok(false);
            }
            let right = trace_node(scope, r, mode, trace)?;
            Ok(left && right)
        }
        Node::Or(l, r) => {
            let left = trace_node(scope, l, mode, trace)?;
            if left && mode == TraceMode::ShortCircuit {
                return Ok(true);
            }
            let right = trace_node(scope, r, mode, trace)?;
            Ok(left || right)
        }
        Node::Not(inner) => Ok(!trace_node(scope, inner, mode, trace)?),
        other => {
            let passed = scope.eval_bool(other)?;
            trace.record(other.explain(), passed);
            Ok(passed)
        }
    }
}
