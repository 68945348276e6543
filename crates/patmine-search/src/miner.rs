//! The pattern mining driver.
//!
//! Per excluded sequence the pipeline is linear: build a history, ask the
//! oracle, then either discard it (linearizable) or weaken it and record the
//! result as a pattern.

use crate::config::SearchConfig;
use crate::enumerator::{Execution, SequenceEnumerator};
use crate::error::MineResult;
use crate::substitution::excluded_sequences;
use patmine_history::History;
use patmine_objects::{InvocationRecord, ObjectProvider};
use patmine_oracle::LinearizabilityOracle;
use tracing::{debug, info, trace};

/// Progress reported to the caller while mining.
#[derive(Debug, Clone, Copy)]
pub enum MineEvent<'a> {
    /// A sequence was executed.
    Sequence(&'a Execution),
    /// A history built from an excluded sequence, before judging it.
    Excluded(&'a History),
    /// The excluded history is linearizable and contributes nothing.
    Discarded(&'a History),
    /// The weakened form of a violating history.
    Weakened(&'a History),
    /// A weakened history the pattern filter did not admit.
    Rejected(&'a History),
}

/// Decides whether a new pattern joins the pattern list.
pub trait PatternFilter {
    fn admit(&self, candidate: &History, existing: &[History]) -> bool;
}

/// Admit every pattern. Comparable or identical patterns are all kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl PatternFilter for KeepAll {
    fn admit(&self, _candidate: &History, _existing: &[History]) -> bool {
        true
    }
}

/// Admit a pattern unless one with the same canonical form (equal up to
/// operation ids) is already recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistinctPatterns;

impl PatternFilter for DistinctPatterns {
    fn admit(&self, candidate: &History, existing: &[History]) -> bool {
        let key = candidate.canonical();
        !existing.iter().any(|p| p.canonical() == key)
    }
}

/// Result of a mining run.
#[derive(Debug, Clone, Default)]
pub struct MineOutcome {
    pub patterns: Vec<History>,
    /// Sequences executed.
    pub sequences: usize,
    /// Excluded sequences examined.
    pub excluded: usize,
    /// Excluded sequences that turned out linearizable.
    pub discarded: usize,
    /// Weakened histories refused by the pattern filter.
    pub rejected: usize,
}

pub struct Miner<'p, P: ObjectProvider> {
    provider: &'p P,
    config: SearchConfig,
    oracle: LinearizabilityOracle,
    filter: Box<dyn PatternFilter>,
}

impl<'p, P: ObjectProvider> Miner<'p, P> {
    /// The oracle judges against the provider's reference specification
    /// with completion enabled.
    pub fn new(provider: &'p P, config: SearchConfig) -> Self {
        let oracle = LinearizabilityOracle::new(provider.spec(), provider.name(), true);
        Self {
            provider,
            config,
            oracle,
            filter: Box::new(KeepAll),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl PatternFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn oracle(&self) -> &LinearizabilityOracle {
        &self.oracle
    }

    /// Explore every sequence up to the operation limit and mine patterns
    /// from its excluded sequences.
    pub fn run(&self, mut on_event: impl FnMut(MineEvent<'_>)) -> MineResult<MineOutcome> {
        info!(
            object = self.provider.name(),
            spec = %self.provider.spec(),
            operations = self.provider.operations().len(),
            limit = self.config.operation_limit,
            "mining patterns"
        );
        debug!(
            destination = %self.config.destination.display(),
            executions = self.config.num_executions,
            threads = self.config.num_threads,
            "configuration"
        );

        let mut outcome = MineOutcome::default();
        for execution in SequenceEnumerator::new(self.provider, self.config.operation_limit) {
            let execution = execution?;
            outcome.sequences += 1;
            on_event(MineEvent::Sequence(&execution));

            let excluded = excluded_sequences(&execution.result);
            trace!(
                len = execution.sequence.len(),
                excluded = excluded.len(),
                "substituted"
            );
            for seq in excluded {
                if seq == execution.result {
                    continue;
                }
                outcome.excluded += 1;
                let Some(pattern) = self.mine_excluded(&seq, &mut on_event)? else {
                    outcome.discarded += 1;
                    continue;
                };
                if self.filter.admit(&pattern, &outcome.patterns) {
                    outcome.patterns.push(pattern);
                } else {
                    outcome.rejected += 1;
                    on_event(MineEvent::Rejected(&pattern));
                }
            }
        }

        info!(
            sequences = outcome.sequences,
            excluded = outcome.excluded,
            discarded = outcome.discarded,
            patterns = outcome.patterns.len(),
            "mining complete"
        );
        Ok(outcome)
    }

    /// Build, test and (if violating) weaken one excluded sequence.
    /// Returns `None` when its history is linearizable.
    pub fn mine_excluded(
        &self,
        excluded: &[InvocationRecord],
        on_event: &mut impl FnMut(MineEvent<'_>),
    ) -> MineResult<Option<History>> {
        let history = History::from_sequence(excluded);
        on_event(MineEvent::Excluded(&history));

        if self.oracle.is_linearizable(&history)? {
            on_event(MineEvent::Discarded(&history));
            return Ok(None);
        }

        let weakened = history.weaken(|h| self.oracle.is_linearizable(h).map(|ok| !ok))?;
        on_event(MineEvent::Weakened(&weakened));
        Ok(Some(weakened))
    }
}
