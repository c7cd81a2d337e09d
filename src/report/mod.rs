//! Reporting utilities: outcome tallies and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{SlcspOutcome, SlcspRow, UndeterminedReason};

/// How the requested rows were resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub determined: usize,
    pub missing_zip: usize,
    pub ambiguous_rate_area: usize,
    pub no_second_rate: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.determined + self.undetermined()
    }

    pub fn undetermined(&self) -> usize {
        self.missing_zip + self.ambiguous_rate_area + self.no_second_rate
    }

    pub fn for_reason(&self, reason: UndeterminedReason) -> usize {
        match reason {
            UndeterminedReason::MissingZip => self.missing_zip,
            UndeterminedReason::AmbiguousRateArea => self.ambiguous_rate_area,
            UndeterminedReason::NoSecondRate => self.no_second_rate,
        }
    }
}

/// Count outcomes over the assembled output rows.
pub fn tally_outcomes(rows: &[SlcspRow]) -> OutcomeCounts {
    let mut counts = OutcomeCounts::default();
    for row in rows {
        match row.outcome {
            SlcspOutcome::Determined(_) => counts.determined += 1,
            SlcspOutcome::Undetermined(UndeterminedReason::MissingZip) => counts.missing_zip += 1,
            SlcspOutcome::Undetermined(UndeterminedReason::AmbiguousRateArea) => counts.ambiguous_rate_area += 1,
            SlcspOutcome::Undetermined(UndeterminedReason::NoSecondRate) => counts.no_second_rate += 1,
        }
    }
    counts
}
