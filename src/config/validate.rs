// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StepdagError};
use crate::types::CostModelKind;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = StepdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.simulation, raw.cost))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_simulation(cfg)?;
    validate_cost_table(cfg)?;
    Ok(())
}

fn validate_simulation(cfg: &RawConfigFile) -> Result<()> {
    if cfg.simulation.workers == 0 {
        return Err(StepdagError::ConfigError(
            "[simulation].workers must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_cost_table(cfg: &RawConfigFile) -> Result<()> {
    let cost = &cfg.cost;

    match cost.model {
        CostModelKind::Table => {
            if cost.table.is_empty() {
                return Err(StepdagError::ConfigError(
                    "[cost].model = \"table\" requires a non-empty [cost.table]".to_string(),
                ));
            }
        }
        CostModelKind::Alphabet | CostModelKind::Rank => {
            if !cost.table.is_empty() {
                return Err(StepdagError::ConfigError(format!(
                    "[cost.table] is only used with model = \"table\" (model is {:?})",
                    cost.model
                )));
            }
        }
    }

    for (task, value) in cost.table.iter() {
        if *value == 0 {
            return Err(StepdagError::ConfigError(format!(
                "[cost.table].{task} must be >= 1 (got 0)"
            )));
        }
    }

    Ok(())
}
