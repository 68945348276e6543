//! Wing-Gong style linearizability search with memoization.

use ahash::{HashSet, HashSetExt};
use patmine_history::History;
use patmine_objects::{ReferenceSpec, SequentialModel};
use thiserror::Error;
use tracing::trace;

/// Largest history the oracle accepts; linearized prefixes are bitmasks.
pub const MAX_OPS: usize = 64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("reference {spec} has no operation '{name}/{arity}'")]
    UnknownOperation {
        spec: ReferenceSpec,
        name: String,
        arity: usize,
    },

    #[error("history has {ops} operations, at most {max} are supported", max = MAX_OPS)]
    TooManyOperations { ops: usize },
}

pub type OracleResult<T> = Result<T, OracleError>;

/// Judges histories of one object against its reference specification.
#[derive(Debug, Clone)]
pub struct LinearizabilityOracle {
    spec: ReferenceSpec,
    object: String,
    completion: bool,
}

/// Per-operation data the search needs, indexed by position in the history.
struct Entry<'h> {
    name: &'h str,
    args: &'h [patmine_objects::Value],
    returns: Option<&'h [patmine_objects::Value]>,
    /// Positions that must be linearized first.
    preds: u64,
}

impl LinearizabilityOracle {
    /// `object` names the implementation under test (for diagnostics).
    /// With `completion`, pending operations may take effect with whatever
    /// response suits the linearization, or not at all.
    pub fn new(spec: ReferenceSpec, object: impl Into<String>, completion: bool) -> Self {
        Self {
            spec,
            object: object.into(),
            completion,
        }
    }

    pub fn spec(&self) -> ReferenceSpec {
        self.spec
    }

    pub fn is_linearizable(&self, history: &History) -> OracleResult<bool> {
        let ops = history.ops();
        if ops.len() > MAX_OPS {
            return Err(OracleError::TooManyOperations { ops: ops.len() });
        }

        let position = |id: usize| ops.iter().position(|op| op.id == id);
        let mut entries = Vec::with_capacity(ops.len());
        for op in ops {
            if self.spec.model().step(&op.name, &op.args).is_none() {
                return Err(OracleError::UnknownOperation {
                    spec: self.spec,
                    name: op.name.clone(),
                    arity: op.args.len(),
                });
            }
            let preds = history
                .predecessors(op.id)
                .filter_map(position)
                .fold(0u64, |mask, i| mask | (1u64 << i));
            entries.push(Entry {
                name: &op.name,
                args: &op.args,
                returns: op.returns.as_deref(),
                preds,
            });
        }

        // Pending operations are optional; without completion they are dropped.
        let required = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.returns.is_some())
            .fold(0u64, |mask, (i, _)| mask | (1u64 << i));

        let found = self.search(&entries, required);
        trace!(
            object = %self.object,
            ops = entries.len(),
            linearizable = found,
            "checked history"
        );
        Ok(found)
    }

    fn search(&self, entries: &[Entry<'_>], required: u64) -> bool {
        let mut stack: Vec<(u64, SequentialModel)> = vec![(0, self.spec.model())];
        let mut seen: HashSet<(u64, SequentialModel)> = HashSet::new();

        while let Some((done, model)) = stack.pop() {
            if done & required == required {
                return true;
            }
            if !seen.insert((done, model.clone())) {
                continue;
            }
            for (i, entry) in entries.iter().enumerate() {
                let bit = 1u64 << i;
                if done & bit != 0 || entry.preds & !done != 0 {
                    continue;
                }
                if entry.returns.is_none() && !self.completion {
                    continue;
                }
                let mut next = model.clone();
                let Some(rets) = next.step(entry.name, entry.args) else {
                    continue;
                };
                if entry.returns.is_some_and(|expected| expected != rets.as_slice()) {
                    continue;
                }
                stack.push((done | bit, next));
            }
        }
        false
    }
}
