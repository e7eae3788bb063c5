//! CSV output of the final newsletter table.
//!
//! The file is named after the requested year range,
//! `Newsletters_from_{low}_to_{high}.csv`, and is written once per run.
//! Missing values are empty fields; the header is always present.

use crate::error::PersistError;
use crate::models::{FinalTable, NewsletterRow};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Output columns, in order.
pub const COLUMNS: [&str; 7] = [
    "title",
    "txt_content",
    "time_sent",
    "url",
    "brand_name",
    "is_fast_fashion",
    "year",
];

pub fn output_file_name(year_low: i32, year_high: i32) -> String {
    format!("Newsletters_from_{year_low}_to_{year_high}.csv")
}

/// Serialize rows as CSV into `writer`.
pub fn write_rows<W: io::Write>(rows: &[NewsletterRow], writer: W) -> Result<(), PersistError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Encode the whole table as CSV bytes, header first.
pub fn encode_table(table: &FinalTable) -> Result<Vec<u8>, PersistError> {
    let mut buf = Vec::new();
    write_rows(&table.rows, &mut buf)?;
    Ok(buf)
}

/// Write an encoded newsletter table into `output_dir`.
///
/// # Arguments
///
/// * `encoded` - Output of [`encode_table`]
/// * `output_dir` - Existing directory to write into
/// * `year_low`, `year_high` - Requested year range, used for the file name
///
/// # Returns
///
/// The path of the written `Newsletters_from_{low}_to_{high}.csv`. An
/// existing file of that name is replaced.
///
/// # Errors
///
/// [`PersistError::Io`] if the file cannot be written.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_final_table(
    encoded: &[u8],
    output_dir: &Path,
    year_low: i32,
    year_high: i32,
) -> Result<PathBuf, PersistError> {
    let path = output_dir.join(output_file_name(year_low, year_high));
    fs::write(&path, encoded).await.map_err(|source| PersistError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), bytes = encoded.len(), "Wrote newsletter table");
    Ok(path)
}
