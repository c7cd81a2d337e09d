//! Formatted terminal output.
//!
//! We keep formatting code in one place so the resolver/selector stay free of
//! presentation concerns and output changes are localized.

use crate::domain::{OutputFormat, Rate, SlcspRow, UndeterminedReason};
use crate::error::AppError;
use crate::io::ingest::InputStats;
use crate::report::OutcomeCounts;
use crate::slcsp::ResolverStats;

/// Render a rate with two decimals; undetermined rates render blank.
pub fn fmt_rate(rate: Option<Rate>) -> String {
    rate.map(|r| r.to_string()).unwrap_or_default()
}

/// Render the result table in the requested format.
pub fn render(rows: &[SlcspRow], format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Table => Ok(format_table(rows)),
        OutputFormat::Csv => format_csv(rows),
    }
}

/// Right-aligned `zipcode  rate` columns.
pub fn format_table(rows: &[SlcspRow]) -> String {
    let rates: Vec<String> = rows.iter().map(|r| fmt_rate(r.rate())).collect();
    let zip_width = rows
        .iter()
        .map(|r| r.zipcode.chars().count())
        .fold("zipcode".len(), usize::max);
    let rate_width = rates.iter().map(|r| r.len()).fold("rate".len(), usize::max);

    let mut out = String::new();
    out.push_str(&format!("{:>zip_width$} {:>rate_width$}\n", "zipcode", "rate"));
    for (row, rate) in rows.iter().zip(&rates) {
        out.push_str(format!("{:>zip_width$} {:>rate_width$}", row.zipcode, rate).trim_end());
        out.push('\n');
    }
    out
}

/// `zipcode,rate` CSV with a header row.
pub fn format_csv(rows: &[SlcspRow]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["zipcode", "rate"])
        .map_err(|e| AppError::output(format!("Failed to render CSV header: {e}")))?;
    for row in rows {
        writer
            .write_record([row.zipcode.as_str(), fmt_rate(row.rate()).as_str()])
            .map_err(|e| AppError::output(format!("Failed to render CSV row: {e}")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::output(format!("Failed to render CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::output(format!("Rendered CSV is not UTF-8: {e}")))
}

/// Format the run summary (input sizes + join stats + outcome breakdown).
pub fn format_run_summary(inputs: &InputStats, resolver: &ResolverStats, counts: &OutcomeCounts) -> String {
    let mut out = String::new();

    out.push_str("=== slcsp - Second Lowest Cost Silver Plan ===\n");
    out.push_str(&format!(
        "Inputs: zips={} | plans={} | targets={}\n",
        inputs.zip_rows, inputs.plan_rows, inputs.target_rows
    ));
    out.push_str(&format!(
        "Silver: plans={} | rating areas={}\n",
        resolver.silver_plans, resolver.silver_areas
    ));
    out.push_str(&format!(
        "Join: rows={} | distinct (zip, area, rate)={} | zip codes={}\n",
        resolver.joined_rows, resolver.deduplicated_rows, resolver.zipcodes
    ));

    out.push_str("\nOutcomes:\n");
    out.push_str(&format!("  {:<22} {:>6}\n", "determined", counts.determined));
    for reason in UndeterminedReason::ALL {
        out.push_str(&format!("  {:<22} {:>6}\n", reason.display_name(), counts.for_reason(reason)));
    }
    out.push('\n');

    out
}
