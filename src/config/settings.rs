// src/config/settings.rs

//! Effective run parameters.
//!
//! Priority for each value:
//! 1. explicit override (CLI flag or caller)
//! 2. value from the config file, if one was loaded
//! 3. built-in default

use std::collections::BTreeMap;

use crate::config::model::{ConfigFile, DEFAULT_BASE_COST, DEFAULT_WORKERS};
use crate::engine::CostModel;
use crate::errors::{Result, StepdagError};
use crate::types::CostModelKind;

/// Values the caller wants to force regardless of the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsOverrides {
    pub workers: Option<usize>,
    pub base_cost: Option<u32>,
    pub cost_model: Option<CostModelKind>,
}

/// Fully resolved parameters for one scheduling + simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub workers: usize,
    pub cost: CostModel,
}

impl RunSettings {
    pub fn resolve(cfg: Option<&ConfigFile>, overrides: SettingsOverrides) -> Result<Self> {
        let workers = overrides
            .workers
            .or(cfg.map(|c| c.simulation.workers))
            .unwrap_or(DEFAULT_WORKERS);
        if workers == 0 {
            return Err(StepdagError::InvalidWorkerCount(workers));
        }

        let base_cost = overrides
            .base_cost
            .or(cfg.map(|c| c.simulation.base_cost))
            .unwrap_or(DEFAULT_BASE_COST);

        let kind = overrides
            .cost_model
            .or(cfg.map(|c| c.cost.model))
            .unwrap_or_default();

        let empty = BTreeMap::new();
        let table = cfg.map(|c| &c.cost.table).unwrap_or(&empty);
        let cost = CostModel::from_kind(kind, table, base_cost)?;

        Ok(Self { workers, cost })
    }
}
