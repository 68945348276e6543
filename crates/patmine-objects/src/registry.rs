//! Built-in objects selectable by short code.

use crate::collection::{
    deque_operations, queue_operations, stack_operations, Collection, Discipline,
};
use crate::operation::{ObjectProvider, OperationTable};
use crate::spec::ReferenceSpec;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Short code naming one built-in object variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectCode {
    Bkq,
    Dq,
    Dtsq,
    Lbq,
    Msq,
    Fcq,
    Ks,
    Rdq,
    Sl,
    Ts,
    Tsd,
    Tsq,
    Tss,
    Ukq,
    Wfq11,
    Wfq12,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown object: {0}")]
pub struct UnknownObject(pub String);

impl ObjectCode {
    pub const ALL: [ObjectCode; 16] = [
        ObjectCode::Bkq,
        ObjectCode::Dq,
        ObjectCode::Dtsq,
        ObjectCode::Lbq,
        ObjectCode::Msq,
        ObjectCode::Fcq,
        ObjectCode::Ks,
        ObjectCode::Rdq,
        ObjectCode::Sl,
        ObjectCode::Ts,
        ObjectCode::Tsd,
        ObjectCode::Tsq,
        ObjectCode::Tss,
        ObjectCode::Ukq,
        ObjectCode::Wfq11,
        ObjectCode::Wfq12,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ObjectCode::Bkq => "bkq",
            ObjectCode::Dq => "dq",
            ObjectCode::Dtsq => "dtsq",
            ObjectCode::Lbq => "lbq",
            ObjectCode::Msq => "msq",
            ObjectCode::Fcq => "fcq",
            ObjectCode::Ks => "ks",
            ObjectCode::Rdq => "rdq",
            ObjectCode::Sl => "sl",
            ObjectCode::Ts => "ts",
            ObjectCode::Tsd => "tsd",
            ObjectCode::Tsq => "tsq",
            ObjectCode::Tss => "tss",
            ObjectCode::Ukq => "ukq",
            ObjectCode::Wfq11 => "wfq11",
            ObjectCode::Wfq12 => "wfq12",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ObjectCode::Bkq => "bounded k-FIFO queue",
            ObjectCode::Dq => "distributed queue",
            ObjectCode::Dtsq => "distributed timestamped queue",
            ObjectCode::Lbq => "lock-based queue",
            ObjectCode::Msq => "Michael-Scott queue",
            ObjectCode::Fcq => "flat-combining queue",
            ObjectCode::Ks => "k-stack",
            ObjectCode::Rdq => "random dequeue queue",
            ObjectCode::Sl => "segment list queue",
            ObjectCode::Ts => "Treiber stack",
            ObjectCode::Tsd => "timestamped deque",
            ObjectCode::Tsq => "timestamped queue",
            ObjectCode::Tss => "timestamped stack",
            ObjectCode::Ukq => "unbounded k-FIFO queue",
            ObjectCode::Wfq11 => "wait-free queue (2011)",
            ObjectCode::Wfq12 => "wait-free queue (2012)",
        }
    }

    /// Relaxation bound and capacity are derived from the thread count.
    fn layout(self, num_threads: usize) -> (Discipline, Option<usize>) {
        let k = num_threads + 1;
        match self {
            ObjectCode::Bkq => (Discipline::RelaxedFifo { k }, Some(2 * k)),
            ObjectCode::Dq | ObjectCode::Rdq | ObjectCode::Ukq => {
                (Discipline::RelaxedFifo { k }, None)
            }
            ObjectCode::Ks => (Discipline::RelaxedLifo { k }, None),
            ObjectCode::Ts | ObjectCode::Tss => (Discipline::Lifo, None),
            ObjectCode::Tsd => (Discipline::Deque, None),
            ObjectCode::Dtsq
            | ObjectCode::Lbq
            | ObjectCode::Msq
            | ObjectCode::Fcq
            | ObjectCode::Sl
            | ObjectCode::Tsq
            | ObjectCode::Wfq11
            | ObjectCode::Wfq12 => (Discipline::Fifo, None),
        }
    }
}

impl FromStr for ObjectCode {
    type Err = UnknownObject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectCode::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| UnknownObject(s.to_string()))
    }
}

impl fmt::Display for ObjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A registered object type: its operation table is built once here.
#[derive(Debug)]
pub struct Variant {
    code: ObjectCode,
    discipline: Discipline,
    capacity: Option<usize>,
    spec: ReferenceSpec,
    operations: OperationTable<Collection>,
}

impl Variant {
    /// Register `code`, sizing construction for `num_threads` threads.
    pub fn new(code: ObjectCode, num_threads: usize) -> Self {
        let (discipline, capacity) = code.layout(num_threads);
        let (spec, operations) = match discipline {
            Discipline::Deque => (ReferenceSpec::Deque, deque_operations()),
            Discipline::Lifo | Discipline::RelaxedLifo { .. } => {
                (ReferenceSpec::Stack { capacity }, stack_operations())
            }
            Discipline::Fifo | Discipline::RelaxedFifo { .. } => {
                (ReferenceSpec::Queue { capacity }, queue_operations())
            }
        };
        Self {
            code,
            discipline,
            capacity,
            spec,
            operations,
        }
    }

    pub fn code(&self) -> ObjectCode {
        self.code
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }
}

impl ObjectProvider for Variant {
    type Instance = Collection;

    fn name(&self) -> &str {
        self.code.code()
    }

    fn operations(&self) -> &OperationTable<Collection> {
        &self.operations
    }

    fn spec(&self) -> ReferenceSpec {
        self.spec
    }

    fn construct(&self) -> Collection {
        Collection::new(self.discipline, self.capacity)
    }
}
