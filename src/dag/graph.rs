// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::dag::parse::{parse_constraints, Constraint};
use crate::dag::TaskId;
use crate::errors::{Result, StepdagError};

/// Internal node structure: stores immediate prerequisites and dependents as
/// arena indices.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskNode {
    id: TaskId,
    /// Tasks that must complete before this one can start ("prev").
    prev: BTreeSet<usize>,
    /// Tasks waiting on this one ("next").
    next: BTreeSet<usize>,
}

/// Immutable task graph keyed by task identifier.
///
/// Nodes live in an arena sorted by identifier, so comparing two arena
/// indices is the same as comparing the identifiers they name. Schedulers
/// rely on that to keep their ready-queues ordered without touching strings.
///
/// The graph never changes after [`GraphBuilder::build`]; every consumer
/// keeps its own per-run counters instead of editing edges in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskGraph {
    nodes: Vec<TaskNode>,
    index: HashMap<TaskId, usize>,
}

impl TaskGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Build a graph from `(prerequisite, dependent)` pairs.
    ///
    /// Every identifier on either side gets a node; repeated pairs collapse.
    pub fn from_constraints<I>(constraints: I) -> Self
    where
        I: IntoIterator<Item = Constraint>,
    {
        let mut builder = GraphBuilder::default();
        for c in constraints {
            builder.add_edge(c.prerequisite, c.dependent);
        }
        builder.build()
    }

    /// Parse constraint lines and build the graph in one go.
    pub fn parse(input: &str) -> Result<Self> {
        let constraints = parse_constraints(input)?;
        Ok(Self::from_constraints(constraints))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All task identifiers, ascending.
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Immediate prerequisites of a task, ascending. Unknown tasks have none.
    pub fn prerequisites_of(&self, id: &str) -> Vec<&str> {
        match self.index_of(id) {
            Some(idx) => self.ids_of(&self.nodes[idx].prev),
            None => Vec::new(),
        }
    }

    /// Immediate dependents of a task, ascending. Unknown tasks have none.
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        match self.index_of(id) {
            Some(idx) => self.ids_of(&self.nodes[idx].next),
            None => Vec::new(),
        }
    }

    /// Tasks with no prerequisites, ascending.
    pub fn roots(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.prev.is_empty())
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Return the identifier of some task lying on a dependency cycle, or
    /// `None` if the graph is acyclic.
    pub fn find_cycle(&self) -> Option<&str> {
        // Edge direction: prerequisite -> dependent.
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
        for idx in 0..self.nodes.len() {
            graph.add_node(idx);
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            for &dep in &node.next {
                graph.add_edge(idx, dep, ());
            }
        }

        match toposort(&graph, None) {
            Ok(_order) => None,
            Err(cycle) => Some(self.nodes[cycle.node_id()].id.as_str()),
        }
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn id_at(&self, idx: usize) -> &str {
        &self.nodes[idx].id
    }

    pub(crate) fn prev_indices(&self, idx: usize) -> &BTreeSet<usize> {
        &self.nodes[idx].prev
    }

    pub(crate) fn next_indices(&self, idx: usize) -> &BTreeSet<usize> {
        &self.nodes[idx].next
    }

    /// Build the error reported when scheduling stalls with `blocked` tasks
    /// still waiting on prerequisites.
    pub(crate) fn cycle_error(&self, blocked: impl IntoIterator<Item = usize>) -> StepdagError {
        let blocked: Vec<TaskId> = blocked
            .into_iter()
            .map(|idx| self.nodes[idx].id.clone())
            .collect();

        let on_cycle = self
            .find_cycle()
            .map(str::to_string)
            .or_else(|| blocked.first().cloned())
            .unwrap_or_default();

        StepdagError::Cycle { blocked, on_cycle }
    }

    fn ids_of(&self, set: &BTreeSet<usize>) -> Vec<&str> {
        set.iter().map(|&idx| self.nodes[idx].id.as_str()).collect()
    }
}

/// Incremental builder for [`TaskGraph`].
///
/// Edges are kept by identifier until [`build`](GraphBuilder::build), which
/// sorts the identifiers and lays out the arena.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    /// identifier -> (prev, next)
    tasks: BTreeMap<TaskId, (BTreeSet<TaskId>, BTreeSet<TaskId>)>,
}

impl GraphBuilder {
    /// Register a task with no edges. A no-op if it already exists.
    pub fn add_task(&mut self, id: impl Into<TaskId>) -> &mut Self {
        self.tasks.entry(id.into()).or_default();
        self
    }

    /// Record that `prerequisite` must finish before `dependent` begins.
    pub fn add_edge(
        &mut self,
        prerequisite: impl Into<TaskId>,
        dependent: impl Into<TaskId>,
    ) -> &mut Self {
        let prerequisite = prerequisite.into();
        let dependent = dependent.into();

        self.tasks
            .entry(prerequisite.clone())
            .or_default()
            .1
            .insert(dependent.clone());
        self.tasks
            .entry(dependent)
            .or_default()
            .0
            .insert(prerequisite);
        self
    }

    pub fn build(&self) -> TaskGraph {
        let index: HashMap<TaskId, usize> = self
            .tasks
            .keys()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();

        let to_indices =
            |ids: &BTreeSet<TaskId>| -> BTreeSet<usize> { ids.iter().map(|id| index[id]).collect() };

        let nodes = self
            .tasks
            .iter()
            .map(|(id, (prev, next))| TaskNode {
                id: id.clone(),
                prev: to_indices(prev),
                next: to_indices(next),
            })
            .collect();

        TaskGraph { nodes, index }
    }
}
