//! Breadth-first enumeration of operation sequences.

use patmine_objects::{InvocationRecord, ObjectError, ObjectProvider, ObjectResult, ResultSequence, Value};
use std::collections::VecDeque;
use tracing::trace;

/// One explored sequence and what the object actually returned for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub sequence: Vec<&'static str>,
    pub result: ResultSequence,
}

/// Run `sequence` once against a fresh instance.
///
/// Arguments are drawn from a counter starting at 1 and shared by every
/// argument position of this execution, so all argument values differ.
pub fn execute<P: ObjectProvider>(
    provider: &P,
    sequence: &[&'static str],
) -> ObjectResult<ResultSequence> {
    let ops = provider.operations();
    let mut instance = provider.construct();
    let mut counter = 0i64;
    let mut result = Vec::with_capacity(sequence.len());

    for &name in sequence {
        let op = ops.get(name).ok_or_else(|| ObjectError::UnknownOperation {
            object: provider.name().to_string(),
            name: name.to_string(),
        })?;
        let args: Vec<Value> = (0..op.arity)
            .map(|_| {
                counter += 1;
                Value::Int(counter)
            })
            .collect();
        let returns = ops.invoke(provider.name(), &mut instance, name, &args)?;
        result.push(InvocationRecord::new(name, args, returns));
    }

    Ok(result)
}

/// Lazy stream of every sequence of at most `limit` operations, shortest
/// first, each paired with its actual result.
///
/// Exploration uses a FIFO work list seeded with the empty sequence, so stack
/// usage does not grow with `limit`. The stream ends after the first
/// invocation error.
pub struct SequenceEnumerator<'p, P: ObjectProvider> {
    provider: &'p P,
    limit: usize,
    queue: VecDeque<Vec<&'static str>>,
    failed: bool,
}

impl<'p, P: ObjectProvider> SequenceEnumerator<'p, P> {
    pub fn new(provider: &'p P, limit: usize) -> Self {
        Self {
            provider,
            limit,
            queue: VecDeque::from([Vec::new()]),
            failed: false,
        }
    }

    /// Sequences waiting to be executed.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl<P: ObjectProvider> Iterator for SequenceEnumerator<'_, P> {
    type Item = ObjectResult<Execution>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let sequence = self.queue.pop_front()?;
        trace!(len = sequence.len(), queue = self.queue.len(), "executing sequence");

        let result = match execute(self.provider, &sequence) {
            Ok(r) => r,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };

        if sequence.len() < self.limit {
            for name in self.provider.operations().names() {
                let mut extended = Vec::with_capacity(sequence.len() + 1);
                extended.extend_from_slice(&sequence);
                extended.push(name);
                self.queue.push_back(extended);
            }
        }

        Some(Ok(Execution { sequence, result }))
    }
}
