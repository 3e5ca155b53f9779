//! Leaf generators.
//!
//! [`prop`] starts from an access path and produces leaf specifications.
//! Every generator goes through the public construction contract
//! ([`Specification::compare`] or [`Specification::test`]), so the result
//! is an ordinary tree that composes, explains and compiles like any other.
//!
//! Text, collection and temporal generators live in their own modules and
//! extend [`Property`].

mod collection;
pub mod temporal;
mod text;

#[cfg(test)]
mod tests;

use specforge_core::{values_equal, CompareOp, Path, Specification, Value};

/// Starts a leaf on the value at `path`.
///
/// ```
/// use specforge::prop;
///
/// let age = prop("person.age");
/// assert_eq!(age.path().to_string(), "person.age");
/// ```
pub fn prop(path: impl Into<Path>) -> Property {
    Property { path: path.into() }
}

/// An access path waiting for a test.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    path: Path,
}

impl Property {
    /// The path the leaves will read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn compare<T: 'static>(&self, op: CompareOp, value: impl Into<Value>) -> Specification<T> {
        Specification::compare(self.path.clone(), op, value)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn eq<T: 'static>(&self, value: impl Into<Value>) -> Specification<T> {
        self.compare(CompareOp::Eq, value)
    }

    pub fn ne<T: 'static>(&self, value: impl Into<Value>) -> Specification<T> {
        self.compare(CompareOp::Ne, value)
    }

    pub fn lt<T: 'static>(&self, value: impl Into<Value>) -> Specification<T> {
        self.compare(CompareOp::Lt, value)
    }

    pub fn le<T: 'static>(&self, value: impl Into<Value>) -> Specification<T> {
        self.compare(CompareOp::Le, value)
    }

    pub fn gt<T: 'static>(&self, value: impl Into<Value>) -> Specification<T> {
        self.compare(CompareOp::Gt, value)
    }

    pub fn ge<T: 'static>(&self, value: impl Into<Value>) -> Specification<T> {
        self.compare(CompareOp::Ge, value)
    }

    /// Inclusive range: `(path >= low) AND (path <= high)`.
    pub fn between<T: 'static>(
        &self,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Specification<T> {
        self.ge(low).and(&self.le(high))
    }

    /// Equal to any of `values`.
    pub fn one_of<T: 'static, V: Into<Value>>(
        &self,
        values: impl IntoIterator<Item = V>,
    ) -> Specification<T> {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let candidates = values.clone();
        Specification::test(
            self.path.clone(),
            "in",
            Some(Value::List(values)),
            move |v: &Value| Ok(candidates.iter().any(|c| values_equal(v, c))),
        )
    }

    pub fn is_none<T: 'static>(&self) -> Specification<T> {
        Specification::test(self.path.clone(), "is none", None, |v: &Value| {
            Ok(v.is_none())
        })
    }

    pub fn is_some<T: 'static>(&self) -> Specification<T> {
        Specification::test(self.path.clone(), "is some", None, |v: &Value| {
            Ok(!v.is_none())
        })
    }

    pub fn is_true<T: 'static>(&self) -> Specification<T> {
        self.eq(true)
    }

    pub fn is_false<T: 'static>(&self) -> Specification<T> {
        self.eq(false)
    }
}

/// Fails a leaf whose subject has the wrong type.
fn type_mismatch(operator: &str, expected: &str, found: &Value) -> specforge_core::EvalError {
    specforge_core::EvalError::leaf(
        operator,
        format!("expected {expected}, found {}", found.type_name()),
    )
}
