//! Operation histories for linearizability analysis.
//!
//! A [`History`] is a set of operations together with a happens-before
//! relation: `a < b` means `a` returned before `b` was invoked. Operations
//! not related either way are concurrent. An operation without returns is
//! pending (invoked, never returned).
//!
//! [`History::weaken`] shrinks a history while a predicate keeps holding,
//! which turns a violating history into a compact pattern.

pub mod history;

pub use history::{History, HistoryOp, OpId};
