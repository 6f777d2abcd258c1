// src/engine/cost.rs

//! Per-task cost functions.

use std::collections::BTreeMap;

use crate::dag::{TaskGraph, TaskId};
use crate::errors::{Result, StepdagError};
use crate::types::CostModelKind;

#[derive(Debug, Clone, PartialEq, Eq)]
enum CostFunction {
    Alphabet,
    Rank,
    Table(BTreeMap<TaskId, u32>),
}

/// Maps a task identifier to the number of ticks it occupies a worker.
///
/// Every model yields `intrinsic + base_cost`, and every intrinsic cost is at
/// least 1, so no task is free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostModel {
    function: CostFunction,
    base_cost: u32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::alphabet(0)
    }
}

impl CostModel {
    /// `A` costs 1, `B` costs 2, ... `Z` costs 26.
    pub fn alphabet(base_cost: u32) -> Self {
        Self {
            function: CostFunction::Alphabet,
            base_cost,
        }
    }

    /// Cost is the identifier's 1-based rank among all tasks in the graph.
    pub fn rank(base_cost: u32) -> Self {
        Self {
            function: CostFunction::Rank,
            base_cost,
        }
    }

    /// Explicit costs. Entries must be >= 1.
    pub fn table(costs: BTreeMap<TaskId, u32>, base_cost: u32) -> Result<Self> {
        if let Some((id, _)) = costs.iter().find(|(_, cost)| **cost == 0) {
            return Err(StepdagError::ConfigError(format!(
                "cost for task '{id}' must be >= 1 (got 0)"
            )));
        }
        Ok(Self {
            function: CostFunction::Table(costs),
            base_cost,
        })
    }

    /// Build a model from its configured kind. `table` is only consulted for
    /// [`CostModelKind::Table`].
    pub fn from_kind(
        kind: CostModelKind,
        table: &BTreeMap<TaskId, u32>,
        base_cost: u32,
    ) -> Result<Self> {
        match kind {
            CostModelKind::Alphabet => Ok(Self::alphabet(base_cost)),
            CostModelKind::Rank => Ok(Self::rank(base_cost)),
            CostModelKind::Table => {
                if table.is_empty() {
                    return Err(StepdagError::ConfigError(
                        "cost model `table` needs a non-empty [cost.table] section".to_string(),
                    ));
                }
                Self::table(table.clone(), base_cost)
            }
        }
    }

    pub fn kind(&self) -> CostModelKind {
        match self.function {
            CostFunction::Alphabet => CostModelKind::Alphabet,
            CostFunction::Rank => CostModelKind::Rank,
            CostFunction::Table(_) => CostModelKind::Table,
        }
    }

    pub fn base_cost(&self) -> u32 {
        self.base_cost
    }

    /// Total cost of `id` within `graph` (intrinsic cost plus base offset).
    pub fn cost_of(&self, graph: &TaskGraph, id: &str) -> Result<u64> {
        let intrinsic = match &self.function {
            CostFunction::Alphabet => alphabet_cost(id),
            CostFunction::Rank => graph.index_of(id).map(|idx| idx as u64 + 1),
            CostFunction::Table(costs) => costs.get(id).map(|&c| u64::from(c)),
        };

        intrinsic
            .map(|c| c + u64::from(self.base_cost))
            .ok_or_else(|| StepdagError::UnknownCost(id.to_string()))
    }

    /// Price every task in arena order. Fails on the first task the model
    /// cannot price.
    pub(crate) fn resolve(&self, graph: &TaskGraph) -> Result<Vec<u64>> {
        graph.task_ids().map(|id| self.cost_of(graph, id)).collect()
    }
}

fn alphabet_cost(id: &str) -> Option<u64> {
    match id.as_bytes() {
        &[b] if b.is_ascii_uppercase() => Some(u64::from(b - b'A') + 1),
        _ => None,
    }
}
