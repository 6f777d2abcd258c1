// src/errors.rs

//! Crate-wide error type.
//!
//! Parse and cycle failures are ordinary, recoverable errors. A task's
//! remaining cost dropping below zero is not represented here: that is an
//! internal defect and the simulator panics instead of returning.

use thiserror::Error;

use crate::dag::TaskId;

#[derive(Error, Debug)]
pub enum StepdagError {
    #[error(
        "Parse error on line {line}: {text:?} does not match \
         `Step <X> must be finished before step <Y> can begin.`"
    )]
    Parse { line: usize, text: String },

    #[error(
        "Cycle detected in task graph: {} task(s) can never start, cycle runs through '{on_cycle}'",
        .blocked.len()
    )]
    Cycle {
        /// Tasks that were never released, ascending.
        blocked: Vec<TaskId>,
        /// One task lying on a dependency cycle.
        on_cycle: TaskId,
    },

    #[error("No cost defined for task: {0}")]
    UnknownCost(TaskId),

    #[error("Worker count must be >= 1 (got {0})")]
    InvalidWorkerCount(usize),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, StepdagError>;
