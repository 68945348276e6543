//! History representation and weakening.

use patmine_objects::{join, InvocationRecord, Value};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, trace};

/// Identifier of an operation within one history. Stable under weakening.
pub type OpId = usize;

/// One operation: invocation plus (unless pending) its returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryOp {
    pub id: OpId,
    pub name: String,
    pub args: Vec<Value>,
    /// `None` for a pending operation. `Some(vec![])` is a completed
    /// operation without an observable response.
    pub returns: Option<Vec<Value>>,
}

impl HistoryOp {
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.returns.is_none()
    }
}

impl fmt::Display for HistoryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}({})", self.id, self.name, join(&self.args))?;
        match &self.returns {
            None => write!(f, " ..."),
            Some(rets) if rets.is_empty() => Ok(()),
            Some(rets) => write!(f, " => {}", join(rets)),
        }
    }
}

/// Operations plus a transitively closed happens-before relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct History {
    ops: Vec<HistoryOp>,
    order: BTreeSet<(OpId, OpId)>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequential history: every step completes before the next begins.
    #[must_use]
    pub fn from_sequence(seq: &[InvocationRecord]) -> Self {
        let mut h = Self::new();
        for (i, rec) in seq.iter().enumerate() {
            h.ops.push(HistoryOp {
                id: i,
                name: rec.name.clone(),
                args: rec.args.clone(),
                returns: Some(rec.returns.clone()),
            });
            for j in 0..i {
                h.order.insert((j, i));
            }
        }
        h
    }

    /// Append an operation, unordered with respect to the existing ones.
    pub fn push_op(
        &mut self,
        name: impl Into<String>,
        args: Vec<Value>,
        returns: Option<Vec<Value>>,
    ) -> OpId {
        let id = self.ops.iter().map(|op| op.id + 1).max().unwrap_or(0);
        self.ops.push(HistoryOp {
            id,
            name: name.into(),
            args,
            returns,
        });
        id
    }

    /// Record `before < after`, keeping the relation transitively closed.
    pub fn add_order(&mut self, before: OpId, after: OpId) {
        let mut lower: Vec<OpId> = self.predecessors(before).collect();
        lower.push(before);
        let mut upper: Vec<OpId> = self.successors(after).collect();
        upper.push(after);
        for &a in &lower {
            for &b in &upper {
                self.order.insert((a, b));
            }
        }
    }

    #[must_use]
    pub fn ops(&self) -> &[HistoryOp] {
        &self.ops
    }

    #[must_use]
    pub fn op(&self, id: OpId) -> Option<&HistoryOp> {
        self.ops.iter().find(|op| op.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of happens-before pairs (including transitive ones).
    #[must_use]
    pub fn order_len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn precedes(&self, a: OpId, b: OpId) -> bool {
        self.order.contains(&(a, b))
    }

    pub fn predecessors(&self, id: OpId) -> impl Iterator<Item = OpId> + '_ {
        self.order
            .iter()
            .filter(move |&&(_, b)| b == id)
            .map(|&(a, _)| a)
    }

    pub fn successors(&self, id: OpId) -> impl Iterator<Item = OpId> + '_ {
        self.order
            .range((id, OpId::MIN)..=(id, OpId::MAX))
            .map(|&(_, b)| b)
    }

    /// Pairs `a < b` with no `c` such that `a < c < b`.
    pub fn covering_edges(&self) -> impl Iterator<Item = (OpId, OpId)> + '_ {
        self.order.iter().copied().filter(move |&(a, b)| {
            !self
                .successors(a)
                .any(|c| c != b && self.precedes(c, b))
        })
    }

    /// The same history with ids renumbered `0..len` in operation order and
    /// the happens-before pairs remapped. Histories differing only in their
    /// ids have equal canonical forms.
    #[must_use]
    pub fn canonical(&self) -> History {
        let renumber = |id: OpId| self.ops.iter().position(|op| op.id == id);
        let ops = self
            .ops
            .iter()
            .enumerate()
            .map(|(i, op)| HistoryOp { id: i, ..op.clone() })
            .collect();
        let order = self
            .order
            .iter()
            .filter_map(|&(a, b)| Some((renumber(a)?, renumber(b)?)))
            .collect();
        History { ops, order }
    }

    /// Every one-step relaxation, in the order weakening tries them:
    /// drop an operation, drop a covering edge, then make a maximal
    /// operation pending.
    #[must_use]
    pub fn relaxations(&self) -> Vec<History> {
        let mut out = Vec::new();

        for op in &self.ops {
            let mut h = self.clone();
            h.ops.retain(|o| o.id != op.id);
            h.order.retain(|&(a, b)| a != op.id && b != op.id);
            out.push(h);
        }

        // Dropping a covering pair leaves the relation transitively closed.
        for edge in self.covering_edges() {
            let mut h = self.clone();
            h.order.remove(&edge);
            out.push(h);
        }

        for (i, op) in self.ops.iter().enumerate() {
            if op.is_pending() || self.successors(op.id).next().is_some() {
                continue;
            }
            let mut h = self.clone();
            h.ops[i].returns = None;
            out.push(h);
        }

        out
    }

    /// Greedy local weakening.
    ///
    /// Repeatedly replaces the history with its first relaxation satisfying
    /// `pred` until no relaxation does. Assuming `pred(self)` holds, the
    /// result satisfies `pred` and is minimal with respect to single
    /// relaxation steps. Every step removes an operation, an ordering pair,
    /// or a response, so the descent terminates.
    pub fn weaken<E>(
        &self,
        mut pred: impl FnMut(&History) -> Result<bool, E>,
    ) -> Result<History, E> {
        let mut current = self.clone();
        let mut steps = 0usize;
        'descent: loop {
            for candidate in current.relaxations() {
                if pred(&candidate)? {
                    trace!(ops = candidate.len(), order = candidate.order_len(), "relaxed");
                    current = candidate;
                    steps += 1;
                    continue 'descent;
                }
            }
            break;
        }
        debug!(
            steps,
            ops = current.len(),
            order = current.order_len(),
            "weakening converged"
        );
        Ok(current)
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            writeln!(f, "  {}", op)?;
        }
        let edges: Vec<String> = self
            .covering_edges()
            .map(|(a, b)| format!("{} < {}", a, b))
            .collect();
        if !edges.is_empty() {
            writeln!(f, "  order: {}", edges.join(", "))?;
        }
        Ok(())
    }
}
