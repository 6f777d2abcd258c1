use clap::ValueEnum;
use serde::Deserialize;

/// Which cost function prices each task before the per-task base offset is
/// added.
///
/// - `Alphabet`: `A` = 1 through `Z` = 26. Only single uppercase letters can
///   be priced.
/// - `Rank`: 1-based position of the identifier in ascending order over the
///   whole graph. Works for any identifier.
/// - `Table`: explicit per-task costs from the `[cost.table]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CostModelKind {
    #[default]
    Alphabet,
    Rank,
    Table,
}
