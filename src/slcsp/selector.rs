//! SLCSP selection: candidate set -> defined rate or explicit "undetermined".
//!
//! Classification is a single function returning a tagged outcome, so the
//! determinable and undetermined groups are disjoint and exhaustive:
//!
//! | rating areas | distinct rates | outcome                      |
//! |--------------|----------------|------------------------------|
//! | 0            | -              | `Undetermined(MissingZip)`   |
//! | > 1          | any            | `Undetermined(AmbiguousRateArea)` |
//! | 1            | 1              | `Undetermined(NoSecondRate)` |
//! | 1            | > 1            | `Determined(2nd smallest)`   |

use std::collections::BTreeMap;

use log::{debug, warn};
use rayon::prelude::*;

use crate::domain::{SlcspOutcome, SlcspRow, UndeterminedReason};
use crate::slcsp::resolver::CandidateSets;
use crate::slcsp::CandidateSet;

/// Classify one zip code's candidate set.
pub fn classify(set: &CandidateSet) -> SlcspOutcome {
    match set.area_count() {
        0 => SlcspOutcome::Undetermined(UndeterminedReason::MissingZip),
        1 => {
            let rates = set.distinct_rates();
            match rates.get(1) {
                Some(second) => SlcspOutcome::Determined(*second),
                None => SlcspOutcome::Undetermined(UndeterminedReason::NoSecondRate),
            }
        }
        _ => SlcspOutcome::Undetermined(UndeterminedReason::AmbiguousRateArea),
    }
}

/// Classify every zip code that has candidates.
///
/// Zip codes are independent, so this runs in parallel; the ordered map makes
/// the merged result identical to a sequential pass.
pub fn select_rates(candidates: &CandidateSets) -> BTreeMap<String, SlcspOutcome> {
    let selections: BTreeMap<String, SlcspOutcome> = candidates
        .sets
        .par_iter()
        .map(|(zip, set)| (zip.clone(), classify(set)))
        .collect();

    let determined = selections
        .values()
        .filter(|o| matches!(o, SlcspOutcome::Determined(_)))
        .count();
    debug!(
        "selector: {} of {} candidate zip codes determined",
        determined,
        selections.len()
    );

    selections
}

/// Left-join the requested zip codes against the selections.
///
/// Every requested row is kept, in order, duplicates included. A zip code with
/// no selection is reported as `MissingZip`.
pub fn assemble(targets: &[String], selections: &BTreeMap<String, SlcspOutcome>) -> Vec<SlcspRow> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    let rows: Vec<SlcspRow> = targets
        .iter()
        .map(|zip| {
            *seen.entry(zip.as_str()).or_default() += 1;
            let outcome = selections
                .get(zip)
                .copied()
                .unwrap_or(SlcspOutcome::Undetermined(UndeterminedReason::MissingZip));
            SlcspRow {
                zipcode: zip.clone(),
                outcome,
            }
        })
        .collect();

    let repeated = seen.values().filter(|n| **n > 1).count();
    if repeated > 0 {
        warn!("target list repeats {repeated} zip code(s); each occurrence is reported");
    }

    rows
}
