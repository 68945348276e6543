//! Sequential reference specifications.

use crate::value::Value;
use std::collections::VecDeque;
use std::fmt;

/// Sequential semantics an object type must appear to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceSpec {
    /// FIFO queue: `enqueue(x)`, `dequeue() -> v | empty`.
    Queue { capacity: Option<usize> },
    /// LIFO stack: `push(x)`, `pop() -> v | empty`.
    Stack { capacity: Option<usize> },
    /// Double-ended queue: `insert_left/right(x)`, `remove_left/right() -> v | empty`.
    Deque,
}

impl ReferenceSpec {
    /// Initial state of the sequential model.
    pub fn model(self) -> SequentialModel {
        SequentialModel {
            spec: self,
            items: VecDeque::new(),
        }
    }

    /// Operation names the model understands.
    pub fn operation_names(self) -> &'static [&'static str] {
        match self {
            ReferenceSpec::Queue { .. } => &["enqueue", "dequeue"],
            ReferenceSpec::Stack { .. } => &["push", "pop"],
            ReferenceSpec::Deque => &["insert_left", "insert_right", "remove_left", "remove_right"],
        }
    }
}

impl fmt::Display for ReferenceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceSpec::Queue { capacity: None } => write!(f, "queue"),
            ReferenceSpec::Queue { capacity: Some(c) } => write!(f, "queue[{}]", c),
            ReferenceSpec::Stack { capacity: None } => write!(f, "stack"),
            ReferenceSpec::Stack { capacity: Some(c) } => write!(f, "stack[{}]", c),
            ReferenceSpec::Deque => write!(f, "deque"),
        }
    }
}

/// State of a sequential reference object. Cheap to clone and hashable so
/// the oracle can memoize visited (prefix, state) pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequentialModel {
    spec: ReferenceSpec,
    items: VecDeque<Value>,
}

impl SequentialModel {
    /// Apply one operation. Returns `None` when the spec has no such
    /// operation or the argument count is wrong.
    pub fn step(&mut self, name: &str, args: &[Value]) -> Option<Vec<Value>> {
        match (self.spec, name, args) {
            (ReferenceSpec::Queue { capacity }, "enqueue", [x])
            | (ReferenceSpec::Stack { capacity }, "push", [x]) => {
                if capacity.map_or(true, |c| self.items.len() < c) {
                    self.items.push_back(*x);
                }
                Some(Vec::new())
            }
            (ReferenceSpec::Queue { .. }, "dequeue", [])
            | (ReferenceSpec::Deque, "remove_left", []) => {
                Some(vec![self.items.pop_front().unwrap_or(Value::Empty)])
            }
            (ReferenceSpec::Stack { .. }, "pop", []) | (ReferenceSpec::Deque, "remove_right", []) => {
                Some(vec![self.items.pop_back().unwrap_or(Value::Empty)])
            }
            (ReferenceSpec::Deque, "insert_left", [x]) => {
                self.items.push_front(*x);
                Some(Vec::new())
            }
            (ReferenceSpec::Deque, "insert_right", [x]) => {
                self.items.push_back(*x);
                Some(Vec::new())
            }
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
