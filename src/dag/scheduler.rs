// src/dag/scheduler.rs

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use tracing::{debug, warn};

use crate::dag::graph::TaskGraph;
use crate::dag::TaskId;
use crate::errors::Result;

/// Emission-ordered list of task identifiers produced by
/// [`topological_order`].
///
/// `Display` concatenates the identifiers with no separator, so the canonical
/// example prints as `CABDFE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule(Vec<TaskId>);

impl Schedule {
    pub fn ids(&self) -> &[TaskId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of `id` in the schedule.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|t| t == id)
    }

    pub fn into_vec(self) -> Vec<TaskId> {
        self.0
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in &self.0 {
            f.write_str(id)?;
        }
        Ok(())
    }
}

/// Order every task so that prerequisites come first, always emitting the
/// smallest available identifier next.
///
/// The graph is left untouched; outstanding prerequisite counts live in a
/// local vector. Fails with [`StepdagError::Cycle`] when tasks remain but
/// none can be released.
///
/// [`StepdagError::Cycle`]: crate::errors::StepdagError::Cycle
pub fn topological_order(graph: &TaskGraph) -> Result<Schedule> {
    let n = graph.len();

    let mut outstanding: Vec<usize> = (0..n).map(|idx| graph.prev_indices(idx).len()).collect();

    // Arena indices are ordered like identifiers, so a min-heap over indices
    // always yields the smallest available identifier.
    let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
        .filter(|&idx| outstanding[idx] == 0)
        .map(Reverse)
        .collect();

    let mut order = Vec::with_capacity(n);

    while let Some(Reverse(idx)) = ready.pop() {
        debug!(
            task = %graph.id_at(idx),
            position = order.len(),
            "scheduler: emitting task"
        );
        order.push(graph.id_at(idx).to_string());

        for &dep in graph.next_indices(idx) {
            outstanding[dep] -= 1;
            if outstanding[dep] == 0 {
                ready.push(Reverse(dep));
            }
        }
    }

    if order.len() < n {
        let blocked = (0..n).filter(|&idx| outstanding[idx] > 0);
        let err = graph.cycle_error(blocked);
        warn!(error = %err, "scheduler: no task available but graph not exhausted");
        return Err(err);
    }

    Ok(Schedule(order))
}
