//! Export the result table to a file.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts. The file extension picks the format: `.json` writes a JSON array,
//! anything else writes CSV.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::SlcspRow;
use crate::error::AppError;
use crate::report::fmt_rate;

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    zipcode: &'a str,
    rate: Option<f64>,
}

/// Write results to `path`, choosing CSV or JSON by extension.
pub fn write_results(path: &Path, rows: &[SlcspRow]) -> Result<(), AppError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        write_results_json(path, rows)
    } else {
        write_results_csv(path, rows)
    }
}

/// Write `zipcode,rate` rows; undetermined rates are left blank.
pub fn write_results_csv(path: &Path, rows: &[SlcspRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::output(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["zipcode", "rate"])
        .map_err(|e| AppError::output(format!("Failed to write export CSV header: {e}")))?;
    for row in rows {
        writer
            .write_record([row.zipcode.as_str(), fmt_rate(row.rate()).as_str()])
            .map_err(|e| AppError::output(format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::output(format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}

/// Write a JSON array of `{ "zipcode", "rate" }`; undetermined rates are `null`.
pub fn write_results_json(path: &Path, rows: &[SlcspRow]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let out: Vec<JsonRow<'_>> = rows
        .iter()
        .map(|row| JsonRow {
            zipcode: &row.zipcode,
            rate: row.rate().map(|r| r.value()),
        })
        .collect();

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::output(format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rate, SlcspOutcome, UndeterminedReason};

    fn rows() -> Vec<SlcspRow> {
        vec![
            SlcspRow {
                zipcode: "11111".to_string(),
                outcome: SlcspOutcome::Determined(Rate::new(200.0).unwrap()),
            },
            SlcspRow {
                zipcode: "44444".to_string(),
                outcome: SlcspOutcome::Undetermined(UndeterminedReason::MissingZip),
            },
        ]
    }

    #[test]
    fn csv_export_leaves_undetermined_blank() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_results(&path, &rows()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "zipcode,rate\n11111,200.00\n44444,\n");
    }

    #[test]
    fn json_export_uses_null_for_undetermined() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.JSON");
        write_results(&path, &rows()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["zipcode"], "11111");
        assert_eq!(value[0]["rate"], 200.0);
        assert!(value[1]["rate"].is_null());
    }

    #[test]
    fn unwritable_path_is_an_output_error() {
        let err = write_results(Path::new("/nonexistent/dir/out.csv"), &rows()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
