// src/config/mod.rs

//! Configuration loading and validation for stepdag.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate value ranges and cost-table consistency (`validate.rs`).
//! - Merge file values with caller overrides into [`RunSettings`]
//!   (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigFile, CostSection, RawConfigFile, SimulationSection};
pub use settings::{RunSettings, SettingsOverrides};
