//! End-to-end mining over built-in and hand-written objects.

use patmine_history::History;
use patmine_objects::{
    InvocationRecord, ObjectCode, ObjectError, ObjectProvider, ObjectResult, Operation,
    OperationTable, ReferenceSpec, Response, Value, Variant,
};
use patmine_oracle::OracleError;
use patmine_search::{
    excluded_sequences, execute, DistinctPatterns, KeepAll, MineError, MineEvent, Miner,
    PatternFilter, SearchConfig, SequenceEnumerator,
};

/// A stack whose pop reports the current size plus one instead of an element.
#[derive(Default)]
struct SizeStack {
    items: Vec<Value>,
}

fn size_push(s: &mut SizeStack, args: &[Value]) -> ObjectResult<Response> {
    s.items.extend_from_slice(args);
    Ok(Response::Void)
}

fn size_pop(s: &mut SizeStack, _: &[Value]) -> ObjectResult<Response> {
    let reported = Value::Int(s.items.len() as i64 + 1);
    s.items.pop();
    Ok(reported.into())
}

struct SizeStackProvider {
    ops: OperationTable<SizeStack>,
}

impl SizeStackProvider {
    fn new() -> Self {
        Self {
            ops: OperationTable::new(vec![
                Operation::new("push", 1, size_push),
                Operation::new("pop", 0, size_pop),
            ]),
        }
    }
}

impl ObjectProvider for SizeStackProvider {
    type Instance = SizeStack;

    fn name(&self) -> &str {
        "size-stack"
    }

    fn operations(&self) -> &OperationTable<SizeStack> {
        &self.ops
    }

    fn spec(&self) -> ReferenceSpec {
        ReferenceSpec::Stack { capacity: None }
    }

    fn construct(&self) -> SizeStack {
        SizeStack::default()
    }
}

/// A stateless object with a hand-written table, judged as a stack.
struct StatelessProvider {
    name: &'static str,
    ops: OperationTable<()>,
}

impl ObjectProvider for StatelessProvider {
    type Instance = ();

    fn name(&self) -> &str {
        self.name
    }

    fn operations(&self) -> &OperationTable<()> {
        &self.ops
    }

    fn spec(&self) -> ReferenceSpec {
        ReferenceSpec::Stack { capacity: None }
    }

    fn construct(&self) {}
}

fn put(_: &mut (), _: &[Value]) -> ObjectResult<Response> {
    Ok(Response::Void)
}

fn take_fails(_: &mut (), _: &[Value]) -> ObjectResult<Response> {
    Err(ObjectError::Failed {
        name: "take".to_string(),
        message: "not supported".to_string(),
    })
}

fn peek(_: &mut (), _: &[Value]) -> ObjectResult<Response> {
    Ok(Value::Empty.into())
}

fn failing_provider() -> StatelessProvider {
    StatelessProvider {
        name: "failing",
        ops: OperationTable::new(vec![
            Operation::new("put", 1, put),
            Operation::new("take", 0, take_fails),
        ]),
    }
}

fn config(limit: usize) -> SearchConfig {
    SearchConfig {
        operation_limit: limit,
        ..SearchConfig::default()
    }
}

#[test]
fn wrong_pop_scenario() {
    let provider = SizeStackProvider::new();
    let actual = execute(&provider, &["push", "pop"]).unwrap();
    assert_eq!(
        actual,
        vec![
            InvocationRecord::new("push", vec![Value::Int(1)], vec![]),
            InvocationRecord::new("pop", vec![], vec![Value::Int(2)]),
        ]
    );

    let excluded = excluded_sequences(&actual);
    let correct = vec![
        InvocationRecord::new("push", vec![Value::Int(1)], vec![]),
        InvocationRecord::new("pop", vec![], vec![Value::Int(1)]),
    ];
    assert!(excluded.contains(&correct));
    assert!(!excluded.contains(&actual));

    // The substituted correct behavior is linearizable and is discarded.
    let miner = Miner::new(&provider, config(2));
    let mut discarded = 0;
    let mined = miner
        .mine_excluded(&correct, &mut |e| {
            if let MineEvent::Discarded(_) = e {
                discarded += 1;
            }
        })
        .unwrap();
    assert!(mined.is_none());
    assert_eq!(discarded, 1);
}

#[test]
fn zero_limit_mines_nothing() {
    let msq = Variant::new(ObjectCode::Msq, 1);
    let outcome = Miner::new(&msq, config(0)).run(|_| {}).unwrap();
    assert_eq!(outcome.sequences, 1);
    assert_eq!(outcome.excluded, 0);
    assert!(outcome.patterns.is_empty());
}

#[test]
fn patterns_are_violations() {
    let msq = Variant::new(ObjectCode::Msq, 1);
    let miner = Miner::new(&msq, config(2));
    let mut excluded = 0;
    let mut weakened = 0;
    let outcome = miner
        .run(|e| match e {
            MineEvent::Excluded(_) => excluded += 1,
            MineEvent::Weakened(_) => weakened += 1,
            _ => {}
        })
        .unwrap();

    assert_eq!(outcome.sequences, 7);
    assert_eq!(outcome.excluded, excluded);
    assert_eq!(outcome.patterns.len(), weakened);
    assert_eq!(outcome.discarded + outcome.patterns.len(), outcome.excluded);
    assert!(!outcome.patterns.is_empty());
    for p in &outcome.patterns {
        assert_eq!(miner.oracle().is_linearizable(p), Ok(false));
    }
}

#[test]
fn dequeue_of_uninserted_value_weakens_to_single_operation() {
    let msq = Variant::new(ObjectCode::Msq, 1);
    let miner = Miner::new(&msq, config(1));
    let bogus = vec![
        InvocationRecord::new("enqueue", vec![Value::Int(1)], vec![]),
        InvocationRecord::new("dequeue", vec![], vec![Value::Int(0)]),
    ];
    let pattern = miner.mine_excluded(&bogus, &mut |_| {}).unwrap().unwrap();
    let mut expected = History::new();
    expected.push_op("dequeue", vec![], Some(vec![Value::Int(0)]));
    assert_eq!(pattern.len(), 1);
    assert_eq!(pattern.ops()[0].name, expected.ops()[0].name);
    assert_eq!(pattern.ops()[0].returns, expected.ops()[0].returns);
}

#[test]
fn distinct_filter_drops_repeats() {
    let ts = Variant::new(ObjectCode::Ts, 1);
    let all = Miner::new(&ts, config(2)).run(|_| {}).unwrap();
    let distinct = Miner::new(&ts, config(2))
        .with_filter(DistinctPatterns)
        .run(|_| {})
        .unwrap();

    assert_eq!(distinct.patterns.len() + distinct.rejected, all.patterns.len());
    assert!(distinct.rejected > 0);

    let kept: Vec<History> = distinct.patterns.iter().map(History::canonical).collect();
    for (i, a) in kept.iter().enumerate() {
        for b in &kept[i + 1..] {
            assert_ne!(a, b);
        }
    }
    for p in &all.patterns {
        assert!(kept.contains(&p.canonical()));
    }
}

#[test]
fn distinct_filter_ignores_operation_ids() {
    let mut first = History::new();
    first.push_op("pop", vec![], Some(vec![Value::Int(0)]));

    // `pop() => 0` left over after weakening away a leading operation.
    let mut second = History::new();
    second.push_op("push", vec![Value::Int(1)], Some(vec![]));
    second.push_op("pop", vec![], Some(vec![Value::Int(0)]));
    let second = second.relaxations().remove(0);
    assert_eq!(second.ops()[0].id, 1);

    assert!(!DistinctPatterns.admit(&second, &[first.clone()]));
    assert!(DistinctPatterns.admit(&second, &[]));
    assert!(KeepAll.admit(&second, &[first]));
}

#[test]
fn invocation_failure_ends_enumeration() {
    let provider = failing_provider();
    let mut it = SequenceEnumerator::new(&provider, 2);
    assert!(it.next().unwrap().unwrap().sequence.is_empty());
    assert_eq!(it.next().unwrap().unwrap().sequence, vec!["put"]);
    assert!(matches!(
        it.next(),
        Some(Err(ObjectError::Failed { ref name, .. })) if name == "take"
    ));
    assert!(it.next().is_none());
    assert!(it.next().is_none());
}

#[test]
fn invocation_failure_is_fatal_to_mining() {
    let provider = failing_provider();
    let result = Miner::new(&provider, config(2)).run(|_| {});
    assert!(matches!(
        result,
        Err(MineError::Object(ObjectError::Failed { .. }))
    ));
}

#[test]
fn operation_unknown_to_reference_is_fatal_to_mining() {
    // `peek` is not a stack operation, so the first excluded history fails.
    let provider = StatelessProvider {
        name: "peeker",
        ops: OperationTable::new(vec![Operation::new("peek", 0, peek)]),
    };
    let result = Miner::new(&provider, config(1)).run(|_| {});
    assert!(matches!(
        result,
        Err(MineError::Oracle(OracleError::UnknownOperation { ref name, .. })) if name == "peek"
    ));
}
