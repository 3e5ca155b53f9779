//! Access-path descriptions.

use std::fmt;
use std::sync::Arc;

use super::Node;
use crate::value::Value;
use crate::var::Var;

/// One step of an access path.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Member(Arc<str>),
    Call { method: Arc<str>, args: Vec<Value> },
}

/// An access path description, independent of any variable.
///
/// Leaf factories keep the path they were built from and hand it back
/// through their own accessors; binding it to a variable produces the
/// `Member`/`Call` chain the tree stores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path: the entity itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a dotted path. Segments written `name(args)` become method
    /// calls whose arguments are literals: integers, floats, `true`,
    /// `false`, `none` or quoted strings. Any other argument is taken as
    /// an unquoted string.
    ///
    /// ```
    /// use specforge_core::{Path, Segment, Value};
    ///
    /// let path = Path::parse("address.city.len()");
    /// assert_eq!(path.segments().len(), 3);
    /// assert!(matches!(path.segments()[2], Segment::Call { .. }));
    ///
    /// let call = Path::parse("older_than(30)");
    /// assert_eq!(
    ///     call.segments(),
    ///     &[Segment::Call { method: "older_than".into(), args: vec![Value::I64(30)] }]
    /// );
    /// ```
    pub fn parse(dotted: &str) -> Self {
        let segments = split_outside(dotted, '.')
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_segment)
            .collect();
        Self { segments }
    }

    pub fn member(mut self, name: impl Into<Arc<str>>) -> Self {
        self.segments.push(Segment::Member(name.into()));
        self
    }

    pub fn call(mut self, method: impl Into<Arc<str>>, args: Vec<Value>) -> Self {
        self.segments.push(Segment::Call {
            method: method.into(),
            args,
        });
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Builds the access chain rooted at `var`.
    pub fn bind<T>(&self, var: &Var) -> Node<T> {
        self.segments
            .iter()
            .fold(Node::var(var), |target, segment| match segment {
                Segment::Member(name) => Node::member(target, name.clone()),
                Segment::Call { method, args } => Node::call(
                    target,
                    method.clone(),
                    args.iter().cloned().map(Node::Literal).collect(),
                ),
            })
    }
}

fn parse_segment(text: &str) -> Segment {
    let call = text
        .strip_suffix(')')
        .and_then(|head| head.split_once('('));
    match call {
        Some((method, args)) => Segment::Call {
            method: method.trim().into(),
            args: split_outside(args, ',')
                .into_iter()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(parse_literal)
                .collect(),
        },
        None => Segment::Member(text.into()),
    }
}

fn parse_literal(text: &str) -> Value {
    let quoted = ['"', '\'']
        .into_iter()
        .find_map(|q| text.strip_prefix(q)?.strip_suffix(q));
    if let Some(inner) = quoted {
        return Value::from(inner);
    }
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "none" => Value::None,
        _ => text
            .parse::<i64>()
            .map(Value::I64)
            .or_else(|_| text.parse::<f64>().map(Value::F64))
            .unwrap_or_else(|_| Value::from(text)),
    }
}

/// Splits on `sep` where it is outside parentheses and quotes.
fn split_outside(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, c) if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

impl From<&str> for Path {
    fn from(dotted: &str) -> Self {
        Path::parse(dotted)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Member(name) => f.write_str(name)?,
                Segment::Call { method, args } => {
                    write!(f, "{method}(")?;
                    for (j, arg) in args.iter().enumerate() {
                        if j > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(")")?;
                }
            }
        }
        Ok(())
    }
}
