// src/engine/state.rs

//! Per-task and per-worker state for the simulator.

/// Lifecycle of a task during one simulation.
///
/// Tasks only ever move forward through these states:
/// `Unavailable -> Available -> InProgress -> Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// At least one prerequisite has not completed yet.
    Unavailable,
    /// All prerequisites are complete and no worker has claimed the task.
    Available,
    /// Assigned to the given worker; its cost is counting down.
    InProgress { worker: usize },
    /// Finished and removed from the working graph.
    Complete,
}

impl TaskState {
    fn ordinal(self) -> u8 {
        match self {
            TaskState::Unavailable => 0,
            TaskState::Available => 1,
            TaskState::InProgress { .. } => 2,
            TaskState::Complete => 3,
        }
    }

    /// Move to `next`, asserting that the task never goes backwards.
    pub(crate) fn advance(&mut self, next: TaskState) {
        assert!(
            next.ordinal() > self.ordinal(),
            "invalid task state transition {self:?} -> {next:?}"
        );
        *self = next;
    }
}

/// Task claimed by a worker, with the ticks still needed to finish it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Job {
    pub task: usize,
    pub remaining: u64,
}

/// A worker slot. Idle when `job` is `None`.
#[derive(Debug, Clone, Default)]
pub(crate) struct Worker {
    pub job: Option<Job>,
}

impl Worker {
    pub fn is_idle(&self) -> bool {
        self.job.is_none()
    }
}
