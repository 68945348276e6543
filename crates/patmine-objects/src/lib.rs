//! Objects under test for the patmine pattern miner.
//!
//! An object type is described once by an [`ObjectProvider`]: a statically
//! declared [`OperationTable`] (name, arity, invoke function), the
//! [`ReferenceSpec`] it is judged against, and a constructor for fresh
//! instances. The built-in [`Variant`]s are selected by [`ObjectCode`].

pub mod collection;
pub mod error;
pub mod operation;
pub mod registry;
pub mod spec;
pub mod value;

pub use collection::{Collection, Discipline};
pub use error::{ObjectError, ObjectResult};
pub use operation::{
    ObjectProvider, Operation, OperationTable, Response, ASSIGNMENT_MARKER, BASELINE_OPERATIONS,
};
pub use registry::{ObjectCode, UnknownObject, Variant};
pub use spec::{ReferenceSpec, SequentialModel};
pub use value::{join, InvocationRecord, ResultSequence, Value};
