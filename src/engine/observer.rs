// src/engine/observer.rs

//! Hooks for watching a simulation without changing it.
//!
//! The simulator calls [`SimulationObserver::on_step`] once per loop
//! iteration, right after idle workers have picked up available tasks and
//! before any work is applied. The final call shows every worker idle and
//! every task done.

use std::io::{self, Write};

use tracing::debug;

use crate::dag::TaskId;

/// State of the simulation at one step.
#[derive(Debug, Clone)]
pub struct StepSnapshot<'a> {
    /// Ticks completed so far.
    pub time: u64,
    /// Task held by each worker, by worker index.
    pub workers: Vec<Option<&'a str>>,
    /// Completed tasks in completion order.
    pub completed: &'a [TaskId],
}

pub trait SimulationObserver {
    /// Called once before the first step.
    fn on_start(&mut self, _workers: usize) {}

    fn on_step(&mut self, _snapshot: &StepSnapshot<'_>) {}
}

/// Ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {}

/// Emits one `debug` event per step.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SimulationObserver for TracingObserver {
    fn on_start(&mut self, workers: usize) {
        debug!(workers, "simulation: starting");
    }

    fn on_step(&mut self, snapshot: &StepSnapshot<'_>) {
        debug!(
            time = snapshot.time,
            workers = ?snapshot.workers,
            done = %snapshot.completed.concat(),
            "simulation: step"
        );
    }
}

/// Renders the classic per-second worker table:
///
/// ```text
/// Second  Worker 0  Worker 1  Done
///    0        C         .
///    3        A         F       C
/// ```
///
/// Idle workers show as `.`. Write errors are kept and surfaced by
/// [`TableObserver::finish`]; once one occurs nothing more is written.
#[derive(Debug)]
pub struct TableObserver<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TableObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and return the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{line}") {
            self.error = Some(err);
        }
    }
}

impl<W: Write> SimulationObserver for TableObserver<W> {
    fn on_start(&mut self, workers: usize) {
        let mut header = String::from("Second  ");
        for id in 0..workers {
            header.push_str(&format!("Worker {id}  "));
        }
        header.push_str("Done");
        self.write_line(&header);
    }

    fn on_step(&mut self, snapshot: &StepSnapshot<'_>) {
        let mut row = format!("{:4}    ", snapshot.time);
        for task in &snapshot.workers {
            row.push_str(&format!(" {:^8} ", task.unwrap_or(".")));
        }
        row.push_str(&snapshot.completed.concat());
        self.write_line(&row);
    }
}
