//! Shared domain types.
//!
//! These types are kept small and immutable once loaded so they can be:
//!
//! - joined and grouped in-memory by the resolver
//! - classified independently per zip code by the selector
//! - rendered as a table or exported to CSV/JSON

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use clap::ValueEnum;

/// The only metal level that participates in SLCSP resolution.
pub const SILVER: &str = "Silver";

/// A jurisdiction-specific pricing zone, e.g. `NY 1`.
///
/// Only ever used as a join key between the zip table and the plan table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RatingArea {
    pub state: String,
    pub area: u32,
}

impl RatingArea {
    pub fn new(state: impl Into<String>, area: u32) -> Self {
        Self {
            state: state.into(),
            area,
        }
    }
}

impl fmt::Display for RatingArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.state, self.area)
    }
}

/// A monthly premium amount.
///
/// Always finite and non-negative. Two rates with the same numeric value are the
/// same rate: equality, ordering and hashing all agree, which is what lets the
/// resolver deduplicate `(area, rate)` pairs before ranking.
#[derive(Debug, Clone, Copy)]
pub struct Rate(f64);

impl Rate {
    /// Returns `None` for negative or non-finite amounts.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value >= 0.0 {
            // Folds -0.0 into 0.0 so the bit pattern used for hashing is canonical.
            Some(Self(value + 0.0))
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Rate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rate {}

impl PartialOrd for Rate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Rate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// One row of the zip table: a zip code lies (at least partly) in a rating area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipAreaLink {
    pub zipcode: String,
    pub area: RatingArea,
}

/// One row of the plan table.
///
/// `plan_id` and `name` are carried for diagnostics only; they play no role in
/// the join.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub plan_id: String,
    pub name: Option<String>,
    pub area: RatingArea,
    pub metal_level: String,
    pub rate: Rate,
}

impl Plan {
    pub fn is_silver(&self) -> bool {
        self.metal_level == SILVER
    }
}

/// Why a zip code has no SLCSP.
///
/// The output table does not distinguish these; they only feed the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UndeterminedReason {
    /// No silver plan is reachable from the zip code (unknown zip, or no silver
    /// plans in any of its rating areas).
    MissingZip,
    /// Silver candidates span more than one rating area.
    AmbiguousRateArea,
    /// A single rating area, but only one distinct silver rate.
    NoSecondRate,
}

impl UndeterminedReason {
    pub const ALL: [UndeterminedReason; 3] = [
        UndeterminedReason::MissingZip,
        UndeterminedReason::AmbiguousRateArea,
        UndeterminedReason::NoSecondRate,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            UndeterminedReason::MissingZip => "no silver candidates",
            UndeterminedReason::AmbiguousRateArea => "multiple rating areas",
            UndeterminedReason::NoSecondRate => "single silver rate",
        }
    }
}

/// Classification result for one zip code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlcspOutcome {
    Determined(Rate),
    Undetermined(UndeterminedReason),
}

impl SlcspOutcome {
    pub fn rate(&self) -> Option<Rate> {
        match self {
            SlcspOutcome::Determined(rate) => Some(*rate),
            SlcspOutcome::Undetermined(_) => None,
        }
    }
}

/// One output row: a requested zip code and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlcspRow {
    pub zipcode: String,
    pub outcome: SlcspOutcome,
}

impl SlcspRow {
    pub fn rate(&self) -> Option<Rate> {
        self.outcome.rate()
    }
}

/// How the result table is rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Right-aligned text columns.
    Table,
    /// `zipcode,rate` CSV.
    Csv,
}

/// Resolved run configuration (independent of clap).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub slcsp_path: PathBuf,
    pub zips_path: PathBuf,
    pub plans_path: PathBuf,
    pub format: OutputFormat,
    pub summary: bool,
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn rate_rejects_negative_and_non_finite() {
        assert!(Rate::new(-0.01).is_none());
        assert!(Rate::new(f64::NAN).is_none());
        assert!(Rate::new(f64::INFINITY).is_none());
        assert!(Rate::new(0.0).is_some());
    }

    #[test]
    fn equal_rates_hash_once() {
        let mut set = HashSet::new();
        set.insert(Rate::new(150.0).unwrap());
        set.insert(Rate::new(150.00).unwrap());
        set.insert(Rate::new(-0.0).unwrap());
        set.insert(Rate::new(0.0).unwrap());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn rates_order_numerically() {
        let mut rates: Vec<Rate> = [200.0, 150.0, 199.99]
            .into_iter()
            .filter_map(Rate::new)
            .collect();
        rates.sort();
        let values: Vec<f64> = rates.iter().map(|r| r.value()).collect();
        assert_eq!(values, vec![150.0, 199.99, 200.0]);
    }

    #[test]
    fn rating_area_display_joins_state_and_number() {
        assert_eq!(RatingArea::new("CA", 5).to_string(), "CA 5");
        assert_ne!(RatingArea::new("NY", 1), RatingArea::new("NY", 2));
    }

    #[test]
    fn only_exact_silver_is_silver() {
        let mut plan = Plan {
            plan_id: "74449NR9870320".to_string(),
            name: None,
            area: RatingArea::new("GA", 7),
            metal_level: "Silver".to_string(),
            rate: Rate::new(298.62).unwrap(),
        };
        assert!(plan.is_silver());
        plan.metal_level = "Gold".to_string();
        assert!(!plan.is_silver());
    }
}
