//! In-memory collections standing in for the concurrent objects under test.
//!
//! Each registered object is a [`Collection`] with a removal discipline.
//! Relaxed disciplines deterministically remove from within a window of the
//! `k` oldest (or newest) elements, so a single-threaded execution already
//! shows the out-of-order results a relaxed implementation may produce.

use crate::error::{ObjectError, ObjectResult};
use crate::operation::{Operation, OperationTable, Response};
use crate::value::Value;
use std::collections::VecDeque;

/// Which element a removal takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    Fifo,
    Lifo,
    /// Removals at both ends, selected by the operation.
    Deque,
    /// Remove from the `k` oldest elements, rotating through the window.
    RelaxedFifo { k: usize },
    /// Remove from the `k` newest elements, rotating through the window.
    RelaxedLifo { k: usize },
}

/// A collection instance. Fresh per explored sequence.
#[derive(Debug, Clone)]
pub struct Collection {
    discipline: Discipline,
    capacity: Option<usize>,
    items: VecDeque<Value>,
    cursor: usize,
}

impl Collection {
    pub fn new(discipline: Discipline, capacity: Option<usize>) -> Self {
        Self {
            discipline,
            capacity,
            items: VecDeque::new(),
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn is_full(&self) -> bool {
        self.capacity.is_some_and(|c| self.items.len() >= c)
    }

    fn insert_back(&mut self, v: Value) {
        if !self.is_full() {
            self.items.push_back(v);
        }
    }

    fn insert_front(&mut self, v: Value) {
        if !self.is_full() {
            self.items.push_front(v);
        }
    }

    fn remove_front(&mut self) -> Value {
        self.items.pop_front().unwrap_or(Value::Empty)
    }

    fn remove_back(&mut self) -> Value {
        self.items.pop_back().unwrap_or(Value::Empty)
    }

    /// Position within the relaxation window for the next removal.
    fn window_offset(&mut self, k: usize) -> usize {
        let window = k.max(1).min(self.items.len());
        let offset = self.cursor % window;
        self.cursor += 1;
        offset
    }

    /// Removal following the collection's discipline.
    fn remove(&mut self) -> Value {
        if self.items.is_empty() {
            return Value::Empty;
        }
        match self.discipline {
            Discipline::Fifo | Discipline::Deque => self.remove_front(),
            Discipline::Lifo => self.remove_back(),
            Discipline::RelaxedFifo { k } => {
                let idx = self.window_offset(k);
                self.items.remove(idx).unwrap_or(Value::Empty)
            }
            Discipline::RelaxedLifo { k } => {
                let idx = self.items.len() - 1 - self.window_offset(k);
                self.items.remove(idx).unwrap_or(Value::Empty)
            }
        }
    }
}

fn single(name: &str, args: &[Value]) -> ObjectResult<Value> {
    match args {
        [x] => Ok(*x),
        _ => Err(ObjectError::ArityMismatch {
            name: name.to_string(),
            expected: 1,
            found: args.len(),
        }),
    }
}

fn enqueue(c: &mut Collection, args: &[Value]) -> ObjectResult<Response> {
    c.insert_back(single("enqueue", args)?);
    Ok(Response::Void)
}

fn dequeue(c: &mut Collection, _: &[Value]) -> ObjectResult<Response> {
    Ok(c.remove().into())
}

fn push(c: &mut Collection, args: &[Value]) -> ObjectResult<Response> {
    c.insert_back(single("push", args)?);
    Ok(Response::Void)
}

fn pop(c: &mut Collection, _: &[Value]) -> ObjectResult<Response> {
    Ok(c.remove().into())
}

fn insert_left(c: &mut Collection, args: &[Value]) -> ObjectResult<Response> {
    c.insert_front(single("insert_left", args)?);
    Ok(Response::Void)
}

fn insert_right(c: &mut Collection, args: &[Value]) -> ObjectResult<Response> {
    c.insert_back(single("insert_right", args)?);
    Ok(Response::Void)
}

fn remove_left(c: &mut Collection, _: &[Value]) -> ObjectResult<Response> {
    Ok(c.remove_front().into())
}

fn remove_right(c: &mut Collection, _: &[Value]) -> ObjectResult<Response> {
    Ok(c.remove_back().into())
}

/// Operations of a queue-shaped collection.
pub fn queue_operations() -> OperationTable<Collection> {
    OperationTable::new(vec![
        Operation::new("enqueue", 1, enqueue),
        Operation::new("dequeue", 0, dequeue),
    ])
}

/// Operations of a stack-shaped collection.
pub fn stack_operations() -> OperationTable<Collection> {
    OperationTable::new(vec![
        Operation::new("push", 1, push),
        Operation::new("pop", 0, pop),
    ])
}

/// Operations of a double-ended collection.
pub fn deque_operations() -> OperationTable<Collection> {
    OperationTable::new(vec![
        Operation::new("insert_left", 1, insert_left),
        Operation::new("insert_right", 1, insert_right),
        Operation::new("remove_left", 0, remove_left),
        Operation::new("remove_right", 0, remove_right),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        c: &mut Collection,
        table: &OperationTable<Collection>,
        ops: Vec<(&str, Vec<Value>)>,
    ) -> Vec<Vec<Value>> {
        ops.iter()
            .map(|(name, args)| table.invoke("test", c, name, args).unwrap())
            .collect()
    }

    #[test]
    fn test_table_names() {
        assert_eq!(queue_operations().names().collect::<Vec<_>>(), vec!["enqueue", "dequeue"]);
        assert_eq!(stack_operations().names().collect::<Vec<_>>(), vec!["push", "pop"]);
        assert_eq!(
            deque_operations().names().collect::<Vec<_>>(),
            vec!["insert_left", "insert_right", "remove_left", "remove_right"]
        );
    }

    #[test]
    fn test_relaxed_fifo_rotates_through_window() {
        let table = queue_operations();
        let mut c = Collection::new(Discipline::RelaxedFifo { k: 2 }, None);
        let one = Value::Int(1);
        let two = Value::Int(2);
        let three = Value::Int(3);
        let rets = run(
            &mut c,
            &table,
            vec![
                ("enqueue", vec![one]),
                ("enqueue", vec![two]),
                ("enqueue", vec![three]),
                ("dequeue", vec![]),
                ("dequeue", vec![]),
                ("dequeue", vec![]),
                ("dequeue", vec![]),
            ],
        );
        assert_eq!(
            rets[3..],
            [vec![one], vec![three], vec![two], vec![Value::Empty]]
        );
    }

    #[test]
    fn test_relaxed_lifo_window() {
        let table = stack_operations();
        let mut c = Collection::new(Discipline::RelaxedLifo { k: 2 }, None);
        let rets = run(
            &mut c,
            &table,
            vec![
                ("push", vec![Value::Int(1)]),
                ("push", vec![Value::Int(2)]),
                ("pop", vec![]),
                ("pop", vec![]),
            ],
        );
        // First removal takes the newest, the second the newest remaining.
        assert_eq!(rets[2..], [vec![Value::Int(2)], vec![Value::Int(1)]]);
    }

    #[test]
    fn test_bounded_drops_inserts_when_full() {
        let table = queue_operations();
        let mut c = Collection::new(Discipline::Fifo, Some(1));
        run(&mut c, &table, vec![("enqueue", vec![Value::Int(1)]), ("enqueue", vec![Value::Int(2)])]);
        assert_eq!(c.len(), 1);
    }
}
