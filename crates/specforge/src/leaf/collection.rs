//! Collection leaves over list values. Length checks also accept strings.

use specforge_core::{values_equal, Specification, Value};

use super::{type_mismatch, Property};

fn length(operator: &str, v: &Value) -> Result<usize, specforge_core::EvalError> {
    match v {
        Value::None => Ok(0),
        Value::List(items) => Ok(items.len()),
        Value::String(s) => Ok(s.chars().count()),
        other => Err(type_mismatch(operator, "list", other)),
    }
}

impl Property {
    /// The list at the path holds an element equal to `value`.
    pub fn contains<T: 'static>(&self, value: impl Into<Value>) -> Specification<T> {
        let value = value.into();
        let needle = value.clone();
        Specification::test(self.path.clone(), "contains", Some(value), move |v: &Value| {
            match v {
                Value::None => Ok(false),
                Value::List(items) => Ok(items.iter().any(|item| values_equal(item, &needle))),
                other => Err(type_mismatch("contains", "list", other)),
            }
        })
    }

    /// A `None` subject counts as empty.
    pub fn is_empty<T: 'static>(&self) -> Specification<T> {
        Specification::test(self.path.clone(), "is empty", None, |v: &Value| {
            Ok(length("is empty", v)? == 0)
        })
    }

    pub fn not_empty<T: 'static>(&self) -> Specification<T> {
        Specification::test(self.path.clone(), "is not empty", None, |v: &Value| {
            Ok(length("is not empty", v)? > 0)
        })
    }

    pub fn len_eq<T: 'static>(&self, len: usize) -> Specification<T> {
        Specification::test(
            self.path.clone(),
            "len =",
            Some(Value::from(len)),
            move |v: &Value| Ok(length("len =", v)? == len),
        )
    }
}
