//! JSON run report.
//!
//! The CSV cannot tell "brand sent nothing" from "every fetch failed"; the
//! report written next to it can. One entry per brand-year records the
//! outcome, link and parse counts, and every discarded URL.
//!
//! ```text
//! output_dir/
//! ├── Newsletters_from_2019_to_2020.csv
//! └── Newsletters_from_2019_to_2020.report.json
//! ```

use crate::error::PersistError;
use crate::models::RunReport;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

pub fn report_file_name(year_low: i32, year_high: i32) -> String {
    format!("Newsletters_from_{year_low}_to_{year_high}.report.json")
}

/// Encode the report as pretty-printed JSON.
pub fn encode_report(report: &RunReport) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write an encoded run report into `output_dir`.
///
/// # Arguments
///
/// * `encoded` - Output of [`encode_report`]
/// * `output_dir` - Existing directory to write into
/// * `year_low`, `year_high` - Requested year range, used for the file name
///
/// # Returns
///
/// The path of the written `Newsletters_from_{low}_to_{high}.report.json`.
///
/// # Errors
///
/// [`PersistError::Io`] if the file cannot be written.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_report(
    encoded: &str,
    output_dir: &Path,
    year_low: i32,
    year_high: i32,
) -> Result<PathBuf, PersistError> {
    let path = output_dir.join(report_file_name(year_low, year_high));
    fs::write(&path, encoded).await.map_err(|source| PersistError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), "Wrote run report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BrandOutcome, BrandYearReport};

    #[tokio::test]
    async fn test_write_report() {
        let tmp = tempfile::tempdir().unwrap();
        let report = RunReport {
            generated_at: "2026-10-19T00:00:00+00:00".to_string(),
            year_low: 2019,
            year_high: 2020,
            total_rows: 1,
            brand_years: vec![BrandYearReport {
                brand_name: "Acme".to_string(),
                year: "2019".to_string(),
                outcome: BrandOutcome::ListingFailed,
                links_found: 0,
                newsletters_parsed: 0,
                discarded_urls: vec![],
            }],
        };

        let encoded = encode_report(&report).unwrap();
        let path = write_report(&encoded, tmp.path(), report.year_low, report.year_high)
            .await
            .unwrap();
        assert!(path.ends_with("Newsletters_from_2019_to_2020.report.json"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["brand_years"][0]["outcome"], "listing_failed");
        assert_eq!(value["total_rows"], 1);
    }
}
