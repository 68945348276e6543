//! Values exchanged with objects under test.

use std::fmt;

/// A synthesized argument or an observed return value.
///
/// `Empty` sorts before every integer, so a value universe collected into a
/// `BTreeSet` always lists the sentinel first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    /// Response of a removal on an empty collection.
    Empty,
    Int(i64),
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => write!(f, "empty"),
            Value::Int(n) => write!(f, "{}", n),
        }
    }
}

/// One executed step: operation name, arguments, returns.
///
/// An operation without an observable response has an empty `returns`
/// list; such steps are never substituted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvocationRecord {
    pub name: String,
    pub args: Vec<Value>,
    pub returns: Vec<Value>,
}

impl InvocationRecord {
    pub fn new(name: impl Into<String>, args: Vec<Value>, returns: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
            returns,
        }
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.returns.is_empty()
    }
}

impl fmt::Display for InvocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, join(&self.args))?;
        if !self.returns.is_empty() {
            write!(f, " => {}", join(&self.returns))?;
        }
        Ok(())
    }
}

/// Ordered invocation records from one execution of an operation sequence.
pub type ResultSequence = Vec<InvocationRecord>;

/// Comma-separated rendering used by every trace printer.
pub fn join(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
