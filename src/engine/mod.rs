// src/engine/mod.rs

//! Multi-worker simulation engine.
//!
//! - [`cost`] prices each task once, before the clock starts.
//! - [`state`] holds the task and worker state machines.
//! - [`simulator`] runs the discrete-time loop.
//! - [`observer`] lets callers watch each step (tracing, tables) without the
//!   simulator knowing how the output is presented.

pub mod cost;
pub mod observer;
pub mod simulator;
pub mod state;

pub use cost::CostModel;
pub use observer::{NoopObserver, SimulationObserver, StepSnapshot, TableObserver, TracingObserver};
pub use simulator::{simulate, Simulation, SimulationReport, SimulationStep};
pub use state::TaskState;
