// src/engine/simulator.rs

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::dag::{TaskGraph, TaskId};
use crate::engine::cost::CostModel;
use crate::engine::observer::{NoopObserver, SimulationObserver, StepSnapshot};
use crate::engine::state::{Job, TaskState, Worker};
use crate::errors::{Result, StepdagError};

/// Outcome of a completed simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Number of work ticks applied before every task was complete.
    pub elapsed: u64,
    /// Tasks in the order they completed. Tasks finishing on the same tick
    /// appear in worker-index order.
    pub completion_order: Vec<TaskId>,
    /// Worker count the simulation ran with.
    pub workers: usize,
}

/// Structured result of a single simulation step.
///
/// Useful for tests that want to drive the clock by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationStep {
    /// Clock value when this step started.
    pub time: u64,
    /// `(worker, task)` pairs assigned at the start of this step.
    pub assigned: Vec<(usize, TaskId)>,
    /// Tasks that finished during this step's tick.
    pub completed: Vec<TaskId>,
    /// Whether this step found everything complete. No tick is applied on a
    /// finishing step.
    pub finished: bool,
}

/// Discrete-time simulation of a fixed worker pool draining a [`TaskGraph`].
///
/// Each step:
/// 1. idle workers, in index order, claim the smallest available tasks;
/// 2. if every task is complete the simulation stops;
/// 3. otherwise every busy worker spends one unit of its task's cost;
/// 4. tasks reaching zero complete, free their worker and release dependents;
/// 5. the clock advances by one tick.
///
/// The graph is borrowed immutably; all countdowns and counters belong to the
/// simulation, so one graph can back any number of runs.
#[derive(Debug)]
pub struct Simulation<'g> {
    graph: &'g TaskGraph,
    /// Total cost per task, resolved once at construction.
    costs: Vec<u64>,
    /// Prerequisites not yet complete, per task.
    outstanding: Vec<usize>,
    states: Vec<TaskState>,
    /// Available and unclaimed tasks, ordered by identifier.
    ready: BTreeSet<usize>,
    workers: Vec<Worker>,
    completed: Vec<TaskId>,
    time: u64,
    finished: bool,
}

impl<'g> Simulation<'g> {
    pub fn new(graph: &'g TaskGraph, workers: usize, cost: &CostModel) -> Result<Self> {
        if workers == 0 {
            return Err(StepdagError::InvalidWorkerCount(workers));
        }

        let costs = cost.resolve(graph)?;
        let n = graph.len();

        let outstanding: Vec<usize> = (0..n).map(|idx| graph.prev_indices(idx).len()).collect();
        let mut states = vec![TaskState::Unavailable; n];
        let mut ready = BTreeSet::new();

        for idx in 0..n {
            if outstanding[idx] == 0 {
                states[idx].advance(TaskState::Available);
                ready.insert(idx);
            }
        }

        debug!(
            tasks = n,
            workers,
            cost_model = ?cost.kind(),
            base_cost = cost.base_cost(),
            "simulation: costs resolved"
        );

        Ok(Self {
            graph,
            costs,
            outstanding,
            states,
            ready,
            workers: vec![Worker::default(); workers],
            completed: Vec::with_capacity(n),
            time: 0,
            finished: false,
        })
    }

    /// Ticks applied so far.
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current state of a task, or `None` if the task is unknown.
    pub fn state_of(&self, id: &str) -> Option<TaskState> {
        self.graph.index_of(id).map(|idx| self.states[idx])
    }

    /// Task currently held by each worker.
    pub fn worker_tasks(&self) -> Vec<Option<&str>> {
        self.workers
            .iter()
            .map(|w| w.job.map(|job| self.graph.id_at(job.task)))
            .collect()
    }

    /// Completed tasks so far, in completion order.
    pub fn completed(&self) -> &[TaskId] {
        &self.completed
    }

    /// Advance one step. Once finished, further calls return a finished step
    /// without changing anything.
    pub fn step(&mut self) -> Result<SimulationStep> {
        self.step_observed(&mut NoopObserver)
    }

    /// Run to completion without observation.
    pub fn run(self) -> Result<SimulationReport> {
        self.run_with(&mut NoopObserver)
    }

    /// Run to completion, reporting every step to `observer`.
    pub fn run_with(mut self, observer: &mut dyn SimulationObserver) -> Result<SimulationReport> {
        observer.on_start(self.workers.len());
        while !self.step_observed(observer)?.finished {}

        Ok(SimulationReport {
            elapsed: self.time,
            completion_order: self.completed,
            workers: self.workers.len(),
        })
    }

    fn step_observed(&mut self, observer: &mut dyn SimulationObserver) -> Result<SimulationStep> {
        let time = self.time;

        if self.finished {
            return Ok(SimulationStep {
                time,
                assigned: Vec::new(),
                completed: Vec::new(),
                finished: true,
            });
        }

        let assigned = self.assign_idle_workers();
        observer.on_step(&self.snapshot());

        if self.all_done() {
            self.finished = true;
            info!(
                elapsed = self.time,
                tasks = self.completed.len(),
                workers = self.workers.len(),
                "simulation: all tasks complete"
            );
            return Ok(SimulationStep {
                time,
                assigned,
                completed: Vec::new(),
                finished: true,
            });
        }

        if self.workers.iter().all(Worker::is_idle) {
            // Nothing running and nothing claimable: the rest are stuck
            // behind a cycle.
            let blocked = (0..self.states.len())
                .filter(|&idx| self.states[idx] != TaskState::Complete);
            let err = self.graph.cycle_error(blocked);
            warn!(time, error = %err, "simulation: no task available but graph not exhausted");
            return Err(err);
        }

        let completed = self.tick();

        Ok(SimulationStep {
            time,
            assigned,
            completed,
            finished: false,
        })
    }

    fn assign_idle_workers(&mut self) -> Vec<(usize, TaskId)> {
        let mut assigned = Vec::new();

        for (worker_id, worker) in self.workers.iter_mut().enumerate() {
            if !worker.is_idle() {
                continue;
            }
            let Some(task) = self.ready.pop_first() else {
                break;
            };

            self.states[task].advance(TaskState::InProgress { worker: worker_id });
            worker.job = Some(Job {
                task,
                remaining: self.costs[task],
            });

            let id = self.graph.id_at(task);
            debug!(
                time = self.time,
                worker = worker_id,
                task = %id,
                cost = self.costs[task],
                "simulation: task assigned"
            );
            assigned.push((worker_id, id.to_string()));
        }

        assigned
    }

    /// Apply one unit of work on every busy worker, then complete whatever
    /// reached zero and advance the clock.
    fn tick(&mut self) -> Vec<TaskId> {
        let mut finished_now = Vec::new();

        for (worker_id, worker) in self.workers.iter_mut().enumerate() {
            let Some(job) = worker.job.as_mut() else {
                continue;
            };
            let task = job.task;
            let Some(left) = job.remaining.checked_sub(1) else {
                panic!(
                    "invariant violated: task '{}' on worker {worker_id} decremented below zero",
                    self.graph.id_at(task)
                );
            };
            job.remaining = left;

            if left == 0 {
                worker.job = None;
                finished_now.push(task);
            }
        }

        let mut completed = Vec::with_capacity(finished_now.len());
        for task in finished_now {
            self.complete(task);
            completed.push(self.graph.id_at(task).to_string());
        }

        self.time += 1;
        completed
    }

    fn complete(&mut self, task: usize) {
        self.states[task].advance(TaskState::Complete);
        let id = self.graph.id_at(task);
        self.completed.push(id.to_string());
        debug!(time = self.time, task = %id, "simulation: task complete");

        for &dep in self.graph.next_indices(task) {
            self.outstanding[dep] -= 1;
            if self.outstanding[dep] == 0 {
                self.states[dep].advance(TaskState::Available);
                self.ready.insert(dep);
            }
        }
    }

    fn all_done(&self) -> bool {
        self.completed.len() == self.states.len() && self.workers.iter().all(Worker::is_idle)
    }

    fn snapshot(&self) -> StepSnapshot<'_> {
        StepSnapshot {
            time: self.time,
            workers: self.worker_tasks(),
            completed: &self.completed,
        }
    }
}

/// Simulate `graph` on `workers` workers and return the report.
pub fn simulate(graph: &TaskGraph, workers: usize, cost: &CostModel) -> Result<SimulationReport> {
    Simulation::new(graph, workers, cost)?.run()
}
