// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::dag::TaskId;
use crate::types::CostModelKind;

/// Worker count used when neither the config nor the caller sets one.
pub const DEFAULT_WORKERS: usize = 5;

/// Base cost used when neither the config nor the caller sets one.
pub const DEFAULT_BASE_COST: u32 = 60;

/// Configuration exactly as read from TOML, before validation.
///
/// ```toml
/// [simulation]
/// workers = 5
/// base_cost = 60
///
/// [cost]
/// model = "table"
///
/// [cost.table]
/// build = 3
/// test = 7
/// ```
///
/// All sections are optional and have defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub simulation: SimulationSection,

    #[serde(default)]
    pub cost: CostSection,
}

/// A validated configuration. Only obtainable through
/// `ConfigFile::try_from(RawConfigFile)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub simulation: SimulationSection,
    pub cost: CostSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(simulation: SimulationSection, cost: CostSection) -> Self {
        Self { simulation, cost }
    }
}

/// `[simulation]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    /// Number of concurrent workers. Must be >= 1.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Added to every task's intrinsic cost.
    #[serde(default = "default_base_cost")]
    pub base_cost: u32,
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_base_cost() -> u32 {
    DEFAULT_BASE_COST
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            base_cost: default_base_cost(),
        }
    }
}

/// `[cost]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostSection {
    /// `"alphabet"` (default), `"rank"` or `"table"`.
    #[serde(default)]
    pub model: CostModelKind,

    /// Per-task intrinsic costs, only meaningful with `model = "table"`.
    #[serde(default)]
    pub table: BTreeMap<TaskId, u32>,
}
