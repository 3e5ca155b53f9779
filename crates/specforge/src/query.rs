//! In-memory queries.
//!
//! Each query compiles the specification once (reusing the materialized
//! closure of a cached specification) and applies it to every item. An
//! evaluation error aborts the query. [`filter`] and [`count`] report the
//! first failing item in input order; [`par_filter`] reports whichever
//! failure a worker reaches first.

use std::time::Instant;

use rayon::prelude::*;
use specforge_core::{Compiled, EvalError, Record, Specification};
use tracing::debug;

fn log_query<T>(spec: &Specification<T>, items: usize, matched: usize, start: Instant, parallel: bool) {
    debug!(
        event = "query_end",
        items = items as u64,
        matched = matched as u64,
        duration_ms = start.elapsed().as_millis() as u64,
        parallel,
        spec = %spec,
        "Query complete"
    );
}

/// Items satisfying `spec`, in input order.
pub fn filter<'a, T: Record + 'static>(
    spec: &Specification<T>,
    items: &'a [T],
) -> Result<Vec<&'a T>, EvalError> {
    let start = Instant::now();
    let compiled = spec.compiled();

    let mut matched = Vec::new();
    for item in items {
        if compiled.call(item)? {
            matched.push(item);
        }
    }

    log_query(spec, items.len(), matched.len(), start, false);
    Ok(matched)
}

/// Like [`filter`], evaluating items in parallel with rayon. Input order
/// of the matches is preserved; when several items fail, any one of their
/// errors may be returned.
pub fn par_filter<'a, T: Record + Sync + 'static>(
    spec: &Specification<T>,
    items: &'a [T],
) -> Result<Vec<&'a T>, EvalError> {
    let start = Instant::now();
    let compiled: Compiled<T> = spec.compiled();

    let matched: Vec<&'a T> = items
        .par_iter()
        .filter_map(|item| match compiled.call(item) {
            Ok(true) => Some(Ok(item)),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<Result<_, EvalError>>()?;

    log_query(spec, items.len(), matched.len(), start, true);
    Ok(matched)
}

/// Number of items satisfying `spec`.
pub fn count<T: Record + 'static>(spec: &Specification<T>, items: &[T]) -> Result<usize, EvalError> {
    let compiled = spec.compiled();
    let mut n = 0;
    for item in items {
        if compiled.call(item)? {
            n += 1;
        }
    }
    Ok(n)
}
