//! Text leaves. A `None` subject never matches; any other non-string
//! subject is an evaluation error.

use std::sync::Arc;

use specforge_core::{EvalError, Specification, Value};

use super::{type_mismatch, Property};

impl Property {
    fn text_test<T: 'static>(
        &self,
        operator: &'static str,
        operand: Option<Value>,
        test: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Specification<T> {
        Specification::test(self.path.clone(), operator, operand, move |v: &Value| {
            match v {
                Value::None => Ok(false),
                Value::String(s) => Ok(test(s)),
                other => Err::<bool, EvalError>(type_mismatch(operator, "string", other)),
            }
        })
    }

    pub fn starts_with<T: 'static>(&self, prefix: impl Into<Arc<str>>) -> Specification<T> {
        let prefix: Arc<str> = prefix.into();
        let operand = Value::String(prefix.clone());
        self.text_test("starts_with", Some(operand), move |s| s.starts_with(&*prefix))
    }

    pub fn ends_with<T: 'static>(&self, suffix: impl Into<Arc<str>>) -> Specification<T> {
        let suffix: Arc<str> = suffix.into();
        let operand = Value::String(suffix.clone());
        self.text_test("ends_with", Some(operand), move |s| s.ends_with(&*suffix))
    }

    /// Substring match.
    pub fn contains_text<T: 'static>(&self, needle: impl Into<Arc<str>>) -> Specification<T> {
        let needle: Arc<str> = needle.into();
        let operand = Value::String(needle.clone());
        self.text_test("contains", Some(operand), move |s| s.contains(&*needle))
    }

    /// Equality ignoring Unicode case.
    pub fn eq_ignore_case<T: 'static>(&self, text: impl Into<Arc<str>>) -> Specification<T> {
        let text: Arc<str> = text.into();
        let operand = Value::String(text.clone());
        let folded = text.to_lowercase();
        self.text_test("eq_ignore_case", Some(operand), move |s| {
            s.to_lowercase() == folded
        })
    }

    /// Empty or whitespace only. A `None` subject counts as blank.
    pub fn is_blank<T: 'static>(&self) -> Specification<T> {
        Specification::test(self.path.clone(), "is blank", None, |v: &Value| match v {
            Value::None => Ok(true),
            Value::String(s) => Ok(s.trim().is_empty()),
            other => Err(type_mismatch("is blank", "string", other)),
        })
    }
}
