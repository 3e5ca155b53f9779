//! The member-access capability entities expose to predicate trees.

use std::sync::Arc;

use crate::value::Value;

/// Explicit member access for entity types.
///
/// `Member` and `Call` nodes resolve through this trait instead of runtime
/// introspection. Returning `None` means the member or method does not
/// exist, which evaluation reports as an error. A missing *value* is
/// `Some(Value::None)`.
///
/// Usually derived with `#[derive(Record)]` from the `specforge` crate.
pub trait Record: Send + Sync {
    /// Reads the named member.
    fn member(&self, name: &str) -> Option<Value>;

    /// Invokes the named method with already evaluated arguments.
    fn call(&self, method: &str, args: &[Value]) -> Option<Value> {
        let _ = (method, args);
        None
    }
}

impl<R: Record + ?Sized> Record for Arc<R> {
    fn member(&self, name: &str) -> Option<Value> {
        (**self).member(name)
    }

    fn call(&self, method: &str, args: &[Value]) -> Option<Value> {
        (**self).call(method, args)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn member(&self, name: &str) -> Option<Value> {
        (**self).member(name)
    }

    fn call(&self, method: &str, args: &[Value]) -> Option<Value> {
        (**self).call(method, args)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn member(&self, name: &str) -> Option<Value> {
        (**self).member(name)
    }

    fn call(&self, method: &str, args: &[Value]) -> Option<Value> {
        (**self).call(method, args)
    }
}
