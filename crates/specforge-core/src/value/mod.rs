//! Dynamic values produced by access paths.

mod compare;


pub use compare::{compare_values, values_equal};

use std::fmt;
use std::sync::Arc;

use crate::record::Record;

/// A value read from an entity through a member or method access.
///
/// Leaves compare these; the combinator engine only ever produces `Bool`
/// and `I64` (the counting fold).
#[derive(Clone)]
pub enum Value {
    /// Missing value (e.g. an unset optional field).
    None,
    Bool(bool),
    /// 64-bit signed integer.
    I64(i64),
    /// 64-bit floating point.
    F64(f64),
    String(Arc<str>),
    /// Date as days since Unix epoch.
    Date(i32),
    /// DateTime as Unix timestamp in milliseconds.
    DateTime(i64),
    List(Vec<Value>),
    /// A nested record reachable through further member access.
    Record(Arc<dyn Record>),
}

impl Value {
    /// Wraps a nested record.
    pub fn record<R: Record + 'static>(record: R) -> Self {
        Value::Record(Arc::new(record))
    }

    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Returns true if this value is None.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract an f64 value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            Value::I64(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Value::Record(r) => Some(r.as_ref()),
            _ => None,
        }
    }

    /// Short kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::I64(_) => "int",
            Value::F64(_) => "float",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Kind name plus rendered value, for diagnostics.
    pub(crate) fn describe(&self) -> String {
        match self {
            Value::None | Value::Record(_) => self.type_name().to_string(),
            other => format!("{} {}", other.type_name(), other),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_equal(self, other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::I64(v) => f.debug_tuple("I64").field(v).finish(),
            Value::F64(v) => f.debug_tuple("F64").field(v).finish(),
            Value::String(v) => f.debug_tuple("String").field(v).finish(),
            Value::Date(v) => f.debug_tuple("Date").field(v).finish(),
            Value::DateTime(v) => f.debug_tuple("DateTime").field(v).finish(),
            Value::List(v) => f.debug_tuple("List").field(v).finish(),
            Value::Record(_) => f.write_str("Record(..)"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("none"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v:?}"),
            Value::String(v) => write!(f, "{:?}", v.as_ref()),
            Value::Date(v) => write!(f, "date({v})"),
            Value::DateTime(v) => write!(f, "datetime({v})"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Record(_) => f.write_str("{record}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I64(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::I64(v.into())
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::I64(v.into())
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::I64(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F64(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v.into())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.as_str().into())
    }
}

impl From<Arc<str>> for Value {
    fn from(v: Arc<str>) -> Self {
        Value::String(v)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(v: Vec<V>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}
