//! Negative examples by return-value substitution.
//!
//! From one actual result sequence, every non-void step has its returns
//! replaced by a single value from the value universe, independently per
//! step. This is a heuristic: wrong behaviors that only show up as
//! correlated changes across steps, or as multi-value returns, are not
//! generated.

use patmine_objects::{InvocationRecord, ResultSequence, Value};
use std::collections::BTreeSet;

/// Sentinels always present in the value universe.
pub const SENTINELS: [Value; 2] = [Value::Empty, Value::Int(0)];

/// Every argument and return value in `result`, plus the sentinels.
pub fn value_universe(result: &[InvocationRecord]) -> BTreeSet<Value> {
    result
        .iter()
        .flat_map(|rec| rec.args.iter().chain(rec.returns.iter()).copied())
        .chain(SENTINELS)
        .collect()
}

/// Number of non-void steps in `result`.
pub fn substitutable_steps(result: &[InvocationRecord]) -> usize {
    result.iter().filter(|rec| !rec.is_void()).count()
}

/// All substituted variants of `result` except `result` itself.
///
/// Void steps are copied unchanged. The output has `|V|^n` members, minus
/// one when `result` is itself reproducible (every non-void step returns a
/// single value), where `n` is [`substitutable_steps`] and `V` is the
/// [`value_universe`]. Order is deterministic.
pub fn excluded_sequences(result: &[InvocationRecord]) -> Vec<ResultSequence> {
    let universe = value_universe(result);
    let mut excluded: Vec<ResultSequence> = vec![Vec::with_capacity(result.len())];

    for rec in result {
        if rec.is_void() {
            for seq in &mut excluded {
                seq.push(rec.clone());
            }
            continue;
        }
        excluded = excluded
            .into_iter()
            .flat_map(|prefix| {
                universe.iter().map(move |&v| {
                    let mut seq = prefix.clone();
                    seq.push(InvocationRecord::new(rec.name.clone(), rec.args.clone(), vec![v]));
                    seq
                })
            })
            .collect();
    }

    excluded.retain(|seq| seq.as_slice() != result);
    excluded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(x: i64) -> InvocationRecord {
        InvocationRecord::new("push", vec![Value::Int(x)], vec![])
    }

    fn pop(v: Value) -> InvocationRecord {
        InvocationRecord::new("pop", vec![], vec![v])
    }

    #[test]
    fn test_universe_has_sentinels() {
        let u = value_universe(&[]);
        assert_eq!(u.into_iter().collect::<Vec<_>>(), vec![Value::Empty, Value::Int(0)]);

        let u = value_universe(&[push(3), pop(Value::Int(7))]);
        assert_eq!(
            u.into_iter().collect::<Vec<_>>(),
            vec![Value::Empty, Value::Int(0), Value::Int(3), Value::Int(7)]
        );
    }

    #[test]
    fn test_empty_result_has_no_excluded() {
        assert!(excluded_sequences(&[]).is_empty());
    }

    #[test]
    fn test_void_only_result_has_no_excluded() {
        assert!(excluded_sequences(&[push(1), push(2)]).is_empty());
    }

    #[test]
    fn test_wrong_pop_is_substituted() {
        let actual = vec![push(1), pop(Value::Int(2))];
        let excluded = excluded_sequences(&actual);
        // universe {empty, 0, 1, 2}, one non-void step
        assert_eq!(excluded.len(), 3);
        assert!(excluded.contains(&vec![push(1), pop(Value::Int(1))]));
        assert!(excluded.contains(&vec![push(1), pop(Value::Empty)]));
        assert!(excluded.contains(&vec![push(1), pop(Value::Int(0))]));
        assert!(!excluded.contains(&actual));
    }

    #[test]
    fn test_void_steps_are_copied() {
        let actual = vec![pop(Value::Empty), push(1), pop(Value::Int(1))];
        for seq in excluded_sequences(&actual) {
            assert_eq!(seq[1], push(1));
            assert_eq!(seq.len(), 3);
        }
    }

    #[test]
    fn test_multi_value_returns_are_never_reproduced() {
        let actual = vec![InvocationRecord::new(
            "pair",
            vec![],
            vec![Value::Int(1), Value::Int(2)],
        )];
        // universe {empty, 0, 1, 2}; the actual cannot be rebuilt from single values
        assert_eq!(excluded_sequences(&actual).len(), 4);
    }
}
