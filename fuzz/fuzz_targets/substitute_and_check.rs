#![no_main]
use libfuzzer_sys::fuzz_target;
use patmine_history::History;
use patmine_objects::{InvocationRecord, ReferenceSpec, Value};
use patmine_oracle::LinearizabilityOracle;
use patmine_search::excluded_sequences;

// Each byte is one stack step: even = push, odd = pop returning (byte >> 1) % 4.
fuzz_target!(|data: &[u8]| {
    let steps = &data[..data.len().min(4)];
    let mut next = 0;
    let result: Vec<InvocationRecord> = steps
        .iter()
        .map(|&b| {
            if b % 2 == 0 {
                next += 1;
                InvocationRecord::new("push", vec![Value::Int(next)], vec![])
            } else {
                let v = match (b >> 1) % 4 {
                    0 => Value::Empty,
                    n => Value::Int(i64::from(n)),
                };
                InvocationRecord::new("pop", vec![], vec![v])
            }
        })
        .collect();

    let oracle = LinearizabilityOracle::new(ReferenceSpec::Stack { capacity: None }, "fuzz", true);
    for seq in excluded_sequences(&result) {
        assert_ne!(seq, result);
        let h = History::from_sequence(&seq);
        if let Ok(false) = oracle.is_linearizable(&h) {
            let w = h
                .weaken(|c| oracle.is_linearizable(c).map(|ok| !ok))
                .expect("stack operations are known");
            assert_eq!(oracle.is_linearizable(&w), Ok(false));
        }
    }
});
