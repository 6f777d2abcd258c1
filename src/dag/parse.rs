// src/dag/parse.rs

//! Line parser for dependency constraints.
//!
//! Accepted shape (surrounding whitespace is ignored):
//!
//! ```text
//! Step C must be finished before step A can begin.
//! ```
//!
//! Identifiers are any run of non-whitespace characters, so `Step build must
//! be finished before step test can begin.` is accepted as well.

use std::sync::LazyLock;

use regex::Regex;

use crate::dag::TaskId;
use crate::errors::{Result, StepdagError};

static CONSTRAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Step (\S+) must be finished before step (\S+) can begin\.$")
        .expect("constraint pattern is a valid regex")
});

/// One `(prerequisite, dependent)` pair read from the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    /// Task that must finish first.
    pub prerequisite: TaskId,
    /// Task that may only begin once `prerequisite` is done.
    pub dependent: TaskId,
}

impl Constraint {
    pub fn new(prerequisite: impl Into<TaskId>, dependent: impl Into<TaskId>) -> Self {
        Self {
            prerequisite: prerequisite.into(),
            dependent: dependent.into(),
        }
    }
}

/// Parse a single constraint line. `line_no` is 1-based and only used for
/// error reporting.
pub fn parse_constraint(line_no: usize, line: &str) -> Result<Constraint> {
    let trimmed = line.trim();
    let caps = CONSTRAINT_RE
        .captures(trimmed)
        .ok_or_else(|| StepdagError::Parse {
            line: line_no,
            text: trimmed.to_string(),
        })?;

    Ok(Constraint::new(&caps[1], &caps[2]))
}

/// Parse every non-blank line of `input`, stopping at the first malformed one.
pub fn parse_constraints(input: &str) -> Result<Vec<Constraint>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_constraint(idx + 1, line))
        .collect()
}
