//! Statically declared operation tables and the object provider contract.

use crate::error::{ObjectError, ObjectResult};
use crate::spec::ReferenceSpec;
use crate::value::Value;
use tracing::trace;

/// Names every object type exposes that are never explored as operations.
pub const BASELINE_OPERATIONS: &[&str] = &["new", "clone", "fmt", "eq", "hash", "drop", "spec"];

/// Suffix marking a paired-accessor setter (`size=` sets `size`).
pub const ASSIGNMENT_MARKER: char = '=';

/// Raw response of an operation before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// No observable response.
    Void,
    Value(Value),
    Values(Vec<Value>),
}

impl Response {
    /// Normalize to a return list: void is empty, a scalar is a singleton.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Response::Void => Vec::new(),
            Response::Value(v) => vec![v],
            Response::Values(vs) => vs,
        }
    }
}

impl From<Value> for Response {
    fn from(v: Value) -> Self {
        Response::Value(v)
    }
}

impl From<Option<Value>> for Response {
    fn from(v: Option<Value>) -> Self {
        v.map_or(Response::Void, Response::Value)
    }
}

/// Function invoked for one named operation.
pub type InvokeFn<T> = fn(&mut T, &[Value]) -> ObjectResult<Response>;

/// A named operation of fixed arity.
pub struct Operation<T> {
    pub name: &'static str,
    pub arity: usize,
    pub invoke: InvokeFn<T>,
}

impl<T> Operation<T> {
    pub const fn new(name: &'static str, arity: usize, invoke: InvokeFn<T>) -> Self {
        Self {
            name,
            arity,
            invoke,
        }
    }
}

impl<T> Clone for Operation<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Operation<T> {}

impl<T> std::fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// The explorable operations of one object type, in declaration order.
#[derive(Debug, Clone)]
pub struct OperationTable<T> {
    ops: Vec<Operation<T>>,
}

impl<T> OperationTable<T> {
    /// Build a table from every operation the type exposes.
    ///
    /// Baseline names are dropped, and so is any `m` for which the type also
    /// exposes `m` (marker stripped) + `=`: a getter and its setter are
    /// attribute accessors, not operations.
    pub fn new(exposed: Vec<Operation<T>>) -> Self {
        let names: Vec<&'static str> = exposed.iter().map(|op| op.name).collect();
        let ops = exposed
            .into_iter()
            .filter(|op| {
                if BASELINE_OPERATIONS.contains(&op.name) {
                    trace!(name = op.name, "skipping baseline operation");
                    return false;
                }
                let setter = format!(
                    "{}{}",
                    op.name.strip_suffix(ASSIGNMENT_MARKER).unwrap_or(op.name),
                    ASSIGNMENT_MARKER
                );
                if names.contains(&setter.as_str()) {
                    trace!(name = op.name, "skipping paired accessor");
                    return false;
                }
                true
            })
            .collect();
        Self { ops }
    }

    pub fn get(&self, name: &str) -> Option<&Operation<T>> {
        self.ops.iter().find(|op| op.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ops.iter().map(|op| op.name)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Invoke `name` on `target`, checking the declared arity first.
    pub fn invoke(
        &self,
        object: &str,
        target: &mut T,
        name: &str,
        args: &[Value],
    ) -> ObjectResult<Vec<Value>> {
        let op = self.get(name).ok_or_else(|| ObjectError::UnknownOperation {
            object: object.to_string(),
            name: name.to_string(),
        })?;
        if op.arity != args.len() {
            return Err(ObjectError::ArityMismatch {
                name: name.to_string(),
                expected: op.arity,
                found: args.len(),
            });
        }
        Ok((op.invoke)(target, args)?.into_values())
    }
}

/// Constructs instances of one concrete object type.
///
/// The operation table and the reference specification belong to the type,
/// not to an instance; `construct` must return a fresh instance that shares
/// no mutable state with earlier ones.
pub trait ObjectProvider {
    type Instance;

    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    fn operations(&self) -> &OperationTable<Self::Instance>;

    /// Sequential semantics the type is judged against.
    fn spec(&self) -> ReferenceSpec;

    fn construct(&self) -> Self::Instance;
}
