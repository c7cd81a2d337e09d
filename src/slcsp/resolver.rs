//! Rate-area resolution: zip code -> distinct `(rating area, silver rate)` pairs.
//!
//! Two indexes are built and composed:
//!
//! - rating area -> silver rates (from the plan table)
//! - zip code -> rating areas (from the zip table, walked row by row)
//!
//! Every joined `(zip, area, rate)` row lands in a per-zip ordered set, so the
//! deduplication on the full triple happens as part of the join. Ranking later
//! only ever sees distinct values.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;

use crate::domain::{Plan, Rate, RatingArea, ZipAreaLink};

/// Distinct silver `(area, rate)` pairs reachable from one zip code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    pub zipcode: String,
    pub pairs: BTreeSet<(RatingArea, Rate)>,
}

impl CandidateSet {
    pub fn new(zipcode: impl Into<String>) -> Self {
        Self {
            zipcode: zipcode.into(),
            pairs: BTreeSet::new(),
        }
    }

    /// Number of distinct rating areas touched by the silver candidates.
    pub fn area_count(&self) -> usize {
        // Pairs are ordered by area first, so equal areas are adjacent.
        let mut count = 0;
        let mut last: Option<&RatingArea> = None;
        for (area, _) in &self.pairs {
            if last != Some(area) {
                count += 1;
                last = Some(area);
            }
        }
        count
    }

    /// Distinct rates across all touched areas, ascending.
    pub fn distinct_rates(&self) -> Vec<Rate> {
        let rates: BTreeSet<Rate> = self.pairs.iter().map(|(_, rate)| *rate).collect();
        rates.into_iter().collect()
    }

    /// Number of distinct rates touched.
    pub fn rate_count(&self) -> usize {
        self.distinct_rates().len()
    }
}

/// Join statistics, reported in the run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Plans with metal level `Silver`.
    pub silver_plans: usize,
    /// Distinct rating areas offering at least one silver plan.
    pub silver_areas: usize,
    /// `(zip, area, rate)` rows produced by the join, duplicates included.
    pub joined_rows: usize,
    /// Rows left after deduplicating on `(zip, area, rate)`.
    pub deduplicated_rows: usize,
    /// Zip codes with at least one silver candidate.
    pub zipcodes: usize,
}

/// Resolver output: candidate sets keyed by zip code.
#[derive(Debug, Clone, Default)]
pub struct CandidateSets {
    pub sets: BTreeMap<String, CandidateSet>,
    pub stats: ResolverStats,
}

impl CandidateSets {
    pub fn get(&self, zipcode: &str) -> Option<&CandidateSet> {
        self.sets.get(zipcode)
    }
}

/// Join zip links against silver plans on the rating area and deduplicate.
///
/// Zip codes whose areas carry no silver plan never appear in the output.
pub fn build_candidate_sets(links: &[ZipAreaLink], plans: &[Plan]) -> CandidateSets {
    let mut rates_by_area: HashMap<&RatingArea, Vec<Rate>> = HashMap::new();
    let mut silver_plans = 0usize;
    for plan in plans.iter().filter(|p| p.is_silver()) {
        silver_plans += 1;
        rates_by_area.entry(&plan.area).or_default().push(plan.rate);
    }

    let mut sets: BTreeMap<String, CandidateSet> = BTreeMap::new();
    let mut joined_rows = 0usize;
    for link in links {
        let Some(rates) = rates_by_area.get(&link.area) else {
            continue;
        };
        let set = sets
            .entry(link.zipcode.clone())
            .or_insert_with(|| CandidateSet::new(link.zipcode.clone()));
        for rate in rates {
            joined_rows += 1;
            set.pairs.insert((link.area.clone(), *rate));
        }
    }

    let deduplicated_rows = sets.values().map(|s| s.pairs.len()).sum();
    let stats = ResolverStats {
        silver_plans,
        silver_areas: rates_by_area.len(),
        joined_rows,
        deduplicated_rows,
        zipcodes: sets.len(),
    };

    debug!(
        "resolver: {} silver plans in {} areas, {} joined rows, {} after dedup, {} zip codes",
        stats.silver_plans, stats.silver_areas, stats.joined_rows, stats.deduplicated_rows, stats.zipcodes
    );

    CandidateSets { sets, stats }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn link(zip: &str, state: &str, area: u32) -> ZipAreaLink {
        ZipAreaLink {
            zipcode: zip.to_string(),
            area: RatingArea::new(state, area),
        }
    }

    pub(crate) fn plan(id: &str, state: &str, area: u32, metal: &str, rate: f64) -> Plan {
        Plan {
            plan_id: id.to_string(),
            name: None,
            area: RatingArea::new(state, area),
            metal_level: metal.to_string(),
            rate: Rate::new(rate).unwrap(),
        }
    }

    #[test]
    fn duplicate_rates_in_one_area_collapse() {
        let links = vec![link("11111", "NY", 1)];
        let plans = vec![
            plan("A", "NY", 1, "Silver", 200.0),
            plan("B", "NY", 1, "Silver", 150.0),
            plan("C", "NY", 1, "Silver", 150.0),
        ];

        let out = build_candidate_sets(&links, &plans);
        let set = out.get("11111").unwrap();
        assert_eq!(set.area_count(), 1);
        assert_eq!(set.rate_count(), 2);
        assert_eq!(out.stats.joined_rows, 3);
        assert_eq!(out.stats.deduplicated_rows, 2);
    }

    #[test]
    fn repeated_zip_rows_do_not_duplicate_candidates() {
        // Same zip listed once per county, both in the same rating area.
        let links = vec![link("36749", "AL", 11), link("36749", "AL", 11)];
        let plans = vec![plan("A", "AL", 11, "Silver", 245.2)];

        let out = build_candidate_sets(&links, &plans);
        let set = out.get("36749").unwrap();
        assert_eq!(set.pairs.len(), 1);
        assert_eq!(out.stats.joined_rows, 2);
    }

    #[test]
    fn non_silver_plans_are_ignored() {
        let links = vec![link("33333", "CA", 5)];
        let plans = vec![
            plan("A", "CA", 5, "Silver", 180.0),
            plan("B", "CA", 5, "Gold", 120.0),
            plan("C", "CA", 5, "Bronze", 90.0),
        ];

        let out = build_candidate_sets(&links, &plans);
        assert_eq!(out.stats.silver_plans, 1);
        assert_eq!(out.get("33333").unwrap().distinct_rates(), vec![Rate::new(180.0).unwrap()]);
    }

    #[test]
    fn same_rate_in_two_areas_counts_both_areas_once_rate() {
        let links = vec![link("22222", "NY", 1), link("22222", "NY", 2)];
        let plans = vec![plan("A", "NY", 1, "Silver", 100.0), plan("B", "NY", 2, "Silver", 100.0)];

        let set = build_candidate_sets(&links, &plans).sets.remove("22222").unwrap();
        assert_eq!(set.area_count(), 2);
        assert_eq!(set.rate_count(), 1);
    }

    #[test]
    fn areas_without_silver_plans_are_not_touched() {
        let links = vec![link("55555", "TX", 3), link("55555", "TX", 4), link("66666", "TX", 4)];
        let plans = vec![
            plan("A", "TX", 3, "Silver", 210.0),
            plan("B", "TX", 3, "Silver", 220.0),
            plan("C", "TX", 4, "Gold", 300.0),
        ];

        let out = build_candidate_sets(&links, &plans);
        assert_eq!(out.get("55555").unwrap().area_count(), 1);
        assert!(out.get("66666").is_none());
        assert_eq!(out.stats.zipcodes, 1);
    }
}
