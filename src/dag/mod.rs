// src/dag/mod.rs

//! Task graph construction and single-order scheduling.
//!
//! - [`parse`] turns `Step X must be finished before step Y can begin.` lines
//!   into [`Constraint`]s.
//! - [`graph`] holds the immutable task graph built from those constraints.
//! - [`scheduler`] produces the deterministic one-at-a-time execution order.

pub mod graph;
pub mod parse;
pub mod scheduler;

/// Canonical task identifier type used throughout the crate.
pub type TaskId = String;

pub use graph::{GraphBuilder, TaskGraph};
pub use parse::{parse_constraint, parse_constraints, Constraint};
pub use scheduler::{topological_order, Schedule};
