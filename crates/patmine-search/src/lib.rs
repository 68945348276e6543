//! Search engine of the patmine pattern miner.
//!
//! - [`SequenceEnumerator`]: breadth-first, depth-bounded enumeration of
//!   operation sequences, each executed once on a fresh object.
//! - [`excluded_sequences`]: wrong result sequences derived from an actual
//!   one by substituting return values.
//! - [`Miner`]: filters excluded sequences through the linearizability
//!   oracle and weakens violating histories into patterns.

pub mod config;
pub mod enumerator;
pub mod error;
pub mod miner;
pub mod substitution;

pub use config::{SearchConfig, DEFAULT_DESTINATION};
pub use enumerator::{execute, Execution, SequenceEnumerator};
pub use error::{MineError, MineResult};
pub use miner::{DistinctPatterns, KeepAll, MineEvent, MineOutcome, Miner, PatternFilter};
pub use substitution::{excluded_sequences, substitutable_steps, value_universe, SENTINELS};
