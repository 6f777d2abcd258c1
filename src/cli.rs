// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::SettingsOverrides;
use crate::types::CostModelKind;

/// Command-line arguments for `stepdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stepdag",
    version,
    about = "Order dependent steps and simulate a worker pool finishing them.",
    long_about = None
)]
pub struct CliArgs {
    /// File with one `Step X must be finished before step Y can begin.` per
    /// line. Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Optional TOML config file with `[simulation]` and `[cost]` sections.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of concurrent workers (overrides the config file).
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Cost added to every task (overrides the config file).
    #[arg(long, value_name = "N")]
    pub base_cost: Option<u32>,

    /// How intrinsic task costs are derived (overrides the config file).
    #[arg(long, value_enum, value_name = "MODEL")]
    pub cost_model: Option<CostModelKind>,

    /// Print the per-second worker table to stderr while simulating.
    #[arg(long)]
    pub table: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STEPDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse the input, print tasks with their prerequisites and costs, and
    /// stop before scheduling.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            workers: self.workers,
            base_cost: self.base_cost,
            cost_model: self.cost_model,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
