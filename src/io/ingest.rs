//! CSV ingest for the three input tables.
//!
//! This module turns the zip table, the plan table and the target list into
//! typed records the resolver can join.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Fail fast** on the first malformed row, naming file and line
//! - **Separation of concerns**: no joining or ranking here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{info, warn};

use crate::domain::{Plan, Rate, RatingArea, RunConfig, SILVER, ZipAreaLink};
use crate::error::AppError;

type HeaderMap = HashMap<String, usize>;

const ZIP_COLUMNS: [&str; 3] = ["zipcode", "state", "rate_area"];
const PLAN_COLUMNS: [&str; 5] = ["plan_id", "state", "metal_level", "rate", "rate_area"];
const TARGET_COLUMNS: [&str; 1] = ["zipcode"];

/// Row counts per input table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputStats {
    pub zip_rows: usize,
    pub plan_rows: usize,
    pub target_rows: usize,
}

/// All three tables, loaded and typed.
#[derive(Debug, Clone, Default)]
pub struct InputTables {
    pub links: Vec<ZipAreaLink>,
    pub plans: Vec<Plan>,
    /// Requested zip codes in input order. Any incoming `rate` column is dropped.
    pub targets: Vec<String>,
}

impl InputTables {
    pub fn stats(&self) -> InputStats {
        InputStats {
            zip_rows: self.links.len(),
            plan_rows: self.plans.len(),
            target_rows: self.targets.len(),
        }
    }
}

/// Load every input named by the run config.
pub fn load_inputs(config: &RunConfig) -> Result<InputTables, AppError> {
    let links = load_zip_links(&config.zips_path)?;
    let plans = load_plans(&config.plans_path)?;
    let targets = load_targets(&config.slcsp_path)?;

    let tables = InputTables { links, plans, targets };
    let stats = tables.stats();
    info!(
        "loaded {} zip rows, {} plan rows, {} target zip codes",
        stats.zip_rows, stats.plan_rows, stats.target_rows
    );
    Ok(tables)
}

pub fn load_zip_links(path: &Path) -> Result<Vec<ZipAreaLink>, AppError> {
    read_zip_links(open(path)?, &path.display().to_string())
}

pub fn load_plans(path: &Path) -> Result<Vec<Plan>, AppError> {
    read_plans(open(path)?, &path.display().to_string())
}

pub fn load_targets(path: &Path) -> Result<Vec<String>, AppError> {
    read_targets(open(path)?, &path.display().to_string())
}

/// Parse a zip table (`zipcode,state,county_code,name,rate_area`).
pub fn read_zip_links<R: Read>(reader: R, source: &str) -> Result<Vec<ZipAreaLink>, AppError> {
    read_table(reader, source, &ZIP_COLUMNS, |record, headers| {
        Ok(ZipAreaLink {
            zipcode: get_required(record, headers, "zipcode")?.to_string(),
            area: parse_area(record, headers)?,
        })
    })
}

/// Parse a plan table (`plan_id,state,metal_level,rate,rate_area`).
pub fn read_plans<R: Read>(reader: R, source: &str) -> Result<Vec<Plan>, AppError> {
    let plans = read_table(reader, source, &PLAN_COLUMNS, |record, headers| {
        Ok(Plan {
            plan_id: get_required(record, headers, "plan_id")?.to_string(),
            name: get_optional(record, headers, "name").map(str::to_string),
            area: parse_area(record, headers)?,
            metal_level: get_required(record, headers, "metal_level")?.to_string(),
            rate: parse_rate(get_required(record, headers, "rate")?)?,
        })
    })?;

    let near_silver = plans
        .iter()
        .filter(|p| !p.is_silver() && p.metal_level.eq_ignore_ascii_case(SILVER))
        .count();
    if near_silver > 0 {
        warn!("{source}: {near_silver} plan(s) have metal level differing from `{SILVER}` only by case; they are not treated as silver");
    }

    Ok(plans)
}

/// Parse a target list (`zipcode,rate`). The `rate` column is ignored.
pub fn read_targets<R: Read>(reader: R, source: &str) -> Result<Vec<String>, AppError> {
    read_table(reader, source, &TARGET_COLUMNS, |record, headers| {
        Ok(get_required(record, headers, "zipcode")?.to_string())
    })
}

fn open(path: &Path) -> Result<File, AppError> {
    File::open(path).map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))
}

fn read_table<R, T, F>(reader: R, source: &str, required: &[&str], parse: F) -> Result<Vec<T>, AppError>
where
    R: Read,
    F: Fn(&StringRecord, &HeaderMap) -> Result<T, String>,
{
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("{source}: failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for name in required {
        if !header_map.contains_key(*name) {
            return Err(AppError::input(format!("{source}: missing required column `{name}`")));
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line; CSV lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| AppError::input(format!("{source}:{line}: CSV parse error: {e}")))?;
        let row = parse(&record, &header_map).map_err(|e| AppError::input(format!("{source}:{line}: {e}")))?;
        rows.push(row);
    }

    Ok(rows)
}

fn build_header_map(headers: &StringRecord) -> HeaderMap {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_area(record: &StringRecord, headers: &HeaderMap) -> Result<RatingArea, String> {
    let state = get_required(record, headers, "state")?;
    let raw = get_required(record, headers, "rate_area")?;
    let area = raw
        .parse::<u32>()
        .map_err(|_| format!("Invalid `rate_area` '{raw}' (expected a non-negative integer)."))?;
    Ok(RatingArea::new(state, area))
}

fn parse_rate(raw: &str) -> Result<Rate, String> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("Invalid `rate` '{raw}' (expected a decimal amount)."))?;
    Rate::new(value).ok_or_else(|| format!("Invalid `rate` '{raw}' (must be finite and >= 0)."))
}

fn get_required<'a>(record: &'a StringRecord, headers: &HeaderMap, name: &str) -> Result<&'a str, String> {
    let idx = headers
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(record: &'a StringRecord, headers: &HeaderMap, name: &str) -> Option<&'a str> {
    let idx = headers.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}
