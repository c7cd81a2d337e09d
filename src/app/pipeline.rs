//! The SLCSP pipeline shared by the binary and the integration tests.
//!
//! load -> resolve candidate sets -> classify per zip -> left-join onto targets
//!
//! Only loading can fail. Once the tables are typed, `compute` is pure and
//! deterministic: the same inputs always yield the same rows.

use log::info;

use crate::domain::{RunConfig, SlcspRow};
use crate::error::AppError;
use crate::io::ingest::{InputStats, InputTables, load_inputs};
use crate::report::{OutcomeCounts, tally_outcomes};
use crate::slcsp::{ResolverStats, assemble, build_candidate_sets, select_rates};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub inputs: InputStats,
    pub resolver: ResolverStats,
    pub counts: OutcomeCounts,
    /// One row per requested zip code, in target order.
    pub rows: Vec<SlcspRow>,
}

/// Load the three input tables named by `config` and resolve them.
pub fn run_slcsp(config: &RunConfig) -> Result<RunOutput, AppError> {
    let tables = load_inputs(config)?;
    Ok(compute(&tables))
}

/// Resolve already-loaded tables.
pub fn compute(tables: &InputTables) -> RunOutput {
    let candidates = build_candidate_sets(&tables.links, &tables.plans);
    let selections = select_rates(&candidates);
    let rows = assemble(&tables.targets, &selections);
    let counts = tally_outcomes(&rows);

    info!(
        "resolved {} target zip codes: {} determined, {} undetermined",
        counts.total(),
        counts.determined,
        counts.undetermined()
    );

    RunOutput {
        inputs: tables.stats(),
        resolver: candidates.stats,
        counts,
        rows,
    }
}
