//! Search configuration.

use std::path::PathBuf;

/// Default destination for mined patterns.
pub const DEFAULT_DESTINATION: &str = "examples/patterns/";

/// Configuration for one mining run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Where patterns are meant to be written. Carried for the command
    /// surface; no persisted pattern format exists yet.
    pub destination: PathBuf,
    /// Execution-count limit. Parsed and reported, not consulted.
    pub num_executions: usize,
    /// Thread count, used only to size object construction.
    pub num_threads: usize,
    /// Maximum length of an explored operation sequence.
    pub operation_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            destination: PathBuf::from(DEFAULT_DESTINATION),
            num_executions: 10,
            num_threads: 1,
            operation_limit: 4,
        }
    }
}
