#![allow(dead_code)]

use stepdag::dag::{GraphBuilder, TaskGraph, TaskId};
use stepdag::engine::{SimulationObserver, StepSnapshot};

/// Constraint lines for the seven-edge walkthrough graph
/// (C->A, C->F, A->B, A->D, B->E, D->E, F->E).
pub const EXAMPLE_INPUT: &str = "\
Step C must be finished before step A can begin.
Step C must be finished before step F can begin.
Step A must be finished before step B can begin.
Step A must be finished before step D can begin.
Step B must be finished before step E can begin.
Step D must be finished before step E can begin.
Step F must be finished before step E can begin.
";

/// The walkthrough graph, parsed from [`EXAMPLE_INPUT`].
pub fn example_graph() -> TaskGraph {
    TaskGraph::parse(EXAMPLE_INPUT).expect("example input parses")
}

/// Builder for `TaskGraph` to simplify test setup.
pub struct GraphFixture {
    builder: GraphBuilder,
}

impl GraphFixture {
    pub fn new() -> Self {
        Self {
            builder: TaskGraph::builder(),
        }
    }

    /// `prerequisite` must finish before `dependent`.
    pub fn edge(mut self, prerequisite: &str, dependent: &str) -> Self {
        self.builder.add_edge(prerequisite, dependent);
        self
    }

    pub fn edges(mut self, edges: &[(&str, &str)]) -> Self {
        for (p, d) in edges {
            self.builder.add_edge(*p, *d);
        }
        self
    }

    /// Task with no edges of its own.
    pub fn task(mut self, id: &str) -> Self {
        self.builder.add_task(id);
        self
    }

    pub fn build(self) -> TaskGraph {
        self.builder.build()
    }
}

impl Default for GraphFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned copy of one [`StepSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStep {
    pub time: u64,
    pub workers: Vec<Option<TaskId>>,
    pub completed: Vec<TaskId>,
}

/// Observer that keeps every snapshot it sees.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub started_with: Option<usize>,
    pub steps: Vec<RecordedStep>,
}

impl SimulationObserver for RecordingObserver {
    fn on_start(&mut self, workers: usize) {
        self.started_with = Some(workers);
    }

    fn on_step(&mut self, snapshot: &StepSnapshot<'_>) {
        self.steps.push(RecordedStep {
            time: snapshot.time,
            workers: snapshot
                .workers
                .iter()
                .map(|w| w.map(str::to_string))
                .collect(),
            completed: snapshot.completed.to_vec(),
        });
    }
}
