//! Linearizability oracle.
//!
//! Decides whether a [`History`](patmine_history::History) can be explained
//! by some sequential execution of a [`ReferenceSpec`](patmine_objects::ReferenceSpec)
//! that respects the history's happens-before order.

pub mod linearizability;

pub use linearizability::{LinearizabilityOracle, OracleError, OracleResult, MAX_OPS};
