//! Fluent specification builder.

use specforge_core::{SpecError, Specification};

/// Chains specifications left to right.
///
/// ```
/// use specforge::{prop, SpecBuilder};
/// # struct Order;
/// # impl specforge::Record for Order {
/// #     fn member(&self, _: &str) -> Option<specforge::Value> { None }
/// # }
///
/// let include_drafts = false;
/// let spec = SpecBuilder::<Order>::new()
///     .and(prop("total").gt(0))
///     .when(!include_drafts, |b| b.and_not(prop("draft").is_true()))
///     .named("billable")
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.explain(), "(x.total > 0) AND (NOT (x.draft = true))");
/// ```
pub struct SpecBuilder<T> {
    current: Option<Specification<T>>,
    name: Option<String>,
}

impl<T: 'static> SpecBuilder<T> {
    pub fn new() -> Self {
        Self {
            current: None,
            name: None,
        }
    }

    /// Starts from an existing specification.
    pub fn from_spec(spec: Specification<T>) -> Self {
        Self {
            current: Some(spec),
            name: None,
        }
    }

    /// Conjunction with the accumulated specification. On an empty builder
    /// `spec` becomes the accumulated specification.
    pub fn and(mut self, spec: Specification<T>) -> Self {
        self.current = Some(match self.current.take() {
            Some(current) => current.and(&spec),
            None => spec,
        });
        self
    }

    pub fn or(mut self, spec: Specification<T>) -> Self {
        self.current = Some(match self.current.take() {
            Some(current) => current.or(&spec),
            None => spec,
        });
        self
    }

    /// Excludes entities matching `spec`.
    pub fn and_not(mut self, spec: Specification<T>) -> Self {
        self.current = Some(match self.current.take() {
            Some(current) => current.and_not(&spec),
            None => spec.not(),
        });
        self
    }

    /// Applies `f` only when `condition` holds.
    pub fn when(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
        if condition {
            f(self)
        } else {
            self
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// # Errors
    ///
    /// Returns [`SpecError::InvalidArgument`] if nothing was added.
    pub fn build(self) -> Result<Specification<T>, SpecError> {
        let spec = self.current.ok_or_else(|| {
            SpecError::InvalidArgument("builder has no specifications".to_string())
        })?;
        Ok(match self.name {
            Some(name) => spec.named(name),
            None => spec,
        })
    }
}

impl<T: 'static> Default for SpecBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
