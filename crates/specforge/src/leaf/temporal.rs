//! Temporal leaves over `Date` and `DateTime` values.
//!
//! Bounds are built with [`date`] and [`datetime`] from `chrono` values. A
//! `None` subject never matches; a subject of another kind than the bound
//! is an evaluation error.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use specforge_core::{compare_values, EvalError, Specification, Value};

use super::Property;

/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// A `Date` value.
///
/// ```
/// use chrono::NaiveDate;
/// use specforge::prelude::*;
///
/// let epoch = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
/// assert_eq!(date(epoch), Value::Date(1));
/// ```
pub fn date(day: NaiveDate) -> Value {
    Value::Date(day.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
}

/// A `DateTime` value with millisecond precision.
pub fn datetime<Tz: TimeZone>(instant: DateTime<Tz>) -> Value {
    Value::DateTime(instant.timestamp_millis())
}

fn ordering(operator: &str, subject: &Value, bound: &Value) -> Result<Option<Ordering>, EvalError> {
    if subject.is_none() {
        return Ok(None);
    }
    match compare_values(subject, bound) {
        Some(ord) => Ok(Some(ord)),
        None => Err(EvalError::leaf(
            operator,
            format!(
                "cannot order {} against {}",
                subject.type_name(),
                bound.type_name()
            ),
        )),
    }
}

impl Property {
    /// Strictly earlier than `bound`.
    pub fn before<T: 'static>(&self, bound: Value) -> Specification<T> {
        let limit = bound.clone();
        Specification::test(self.path.clone(), "before", Some(bound), move |v: &Value| {
            Ok(ordering("before", v, &limit)? == Some(Ordering::Less))
        })
    }

    /// Strictly later than `bound`.
    pub fn after<T: 'static>(&self, bound: Value) -> Specification<T> {
        let limit = bound.clone();
        Specification::test(self.path.clone(), "after", Some(bound), move |v: &Value| {
            Ok(ordering("after", v, &limit)? == Some(Ordering::Greater))
        })
    }

    /// Half-open range: `start <= path < end`.
    pub fn within<T: 'static>(&self, start: Value, end: Value) -> Specification<T> {
        let (lo, hi) = (start.clone(), end.clone());
        Specification::test(
            self.path.clone(),
            "within",
            Some(Value::List(vec![start, end])),
            move |v: &Value| {
                let from = ordering("within", v, &lo)?;
                let to = ordering("within", v, &hi)?;
                Ok(matches!(from, Some(Ordering::Greater | Ordering::Equal))
                    && to == Some(Ordering::Less))
            },
        )
    }
}
