// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod types;

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, RunSettings};
use crate::dag::{topological_order, Schedule, TaskGraph};
use crate::engine::{
    Simulation, SimulationObserver, SimulationReport, TableObserver, TracingObserver,
};

/// Both answers for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    /// Single-worker order with smallest-identifier tie-break.
    pub schedule: Schedule,
    /// Multi-worker simulation result.
    pub report: SimulationReport,
}

/// Compute the schedule and run the simulation, logging each step at debug
/// level.
pub fn solve(graph: &TaskGraph, settings: &RunSettings) -> errors::Result<Answers> {
    solve_with(graph, settings, &mut TracingObserver)
}

/// Like [`solve`], reporting simulation steps to `observer`.
pub fn solve_with(
    graph: &TaskGraph,
    settings: &RunSettings,
    observer: &mut dyn SimulationObserver,
) -> errors::Result<Answers> {
    let schedule = topological_order(graph)?;
    let report = Simulation::new(graph, settings.workers, &settings.cost)?.run_with(observer)?;
    Ok(Answers { schedule, report })
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and override resolution
/// - input reading and graph construction
/// - scheduling and simulation
/// - printing the answers to stdout
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = args
        .config
        .as_deref()
        .map(|path| load_and_validate(path))
        .transpose()?;
    let settings = RunSettings::resolve(cfg.as_ref(), args.overrides())?;

    let input = read_input(args.input.as_deref())?;
    let graph = TaskGraph::parse(&input)?;
    info!(
        tasks = graph.len(),
        roots = ?graph.roots(),
        workers = settings.workers,
        "parsed task graph"
    );

    if args.dry_run {
        print_dry_run(&graph, &settings);
        return Ok(());
    }

    let answers = if args.table {
        let mut table = TableObserver::new(io::stderr().lock());
        let answers = solve_with(&graph, &settings, &mut table)?;
        table.finish().context("failed to write worker table")?;
        answers
    } else {
        solve(&graph, &settings)?
    };

    println!("{}", answers.schedule);
    println!("{}", answers.report.elapsed);
    Ok(())
}

/// Read the whole input from `path`, or from stdin for `None` / `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read input {}", p.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read input from stdin")?;
            Ok(buf)
        }
    }
}

/// Simple dry-run output: print tasks, prerequisites and resolved costs.
fn print_dry_run(graph: &TaskGraph, settings: &RunSettings) {
    println!("stepdag dry-run");
    println!("  workers = {}", settings.workers);
    println!("  cost_model = {:?}", settings.cost.kind());
    println!("  base_cost = {}", settings.cost.base_cost());
    println!();

    println!("tasks ({}):", graph.len());
    for id in graph.task_ids() {
        println!("  - {id}");
        match settings.cost.cost_of(graph, id) {
            Ok(cost) => println!("      cost: {cost}"),
            Err(_) => println!("      cost: <undefined>"),
        }
        let prereqs = graph.prerequisites_of(id);
        if !prereqs.is_empty() {
            println!("      after: {:?}", prereqs);
        }
    }

    debug!("dry-run complete (nothing scheduled)");
}
