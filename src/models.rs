//! Data models for brands, scraped newsletters and output rows.
//!
//! - [`BrandRecord`]: one line of the input roster
//! - [`NewsletterRecord`]: what the parser pulls out of one newsletter page
//! - [`BrandTable`]: one brand's newsletters for one year, plus how it went
//! - [`NewsletterRow`]: one line of the output CSV
//! - [`RunReport`]: per brand-year outcome summary written next to the CSV

use serde::{Deserialize, Deserializer, Serialize};

/// Value stored in `sent_time` when the `<time>` element is not in the
/// expected format.
pub const SENT_TIME_SENTINEL: &str = "NaN";

/// A brand from the roster file.
///
/// Column names match the roster CSV header (`BrandName,Url,isFastFashion`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrandRecord {
    /// Brand name, unique within a roster.
    #[serde(rename = "BrandName")]
    pub name: String,
    /// Archive base URL, e.g. `https://milled.com/Zara`.
    #[serde(rename = "Url")]
    pub archive_url: String,
    /// Static fast-fashion classification.
    #[serde(rename = "isFastFashion", deserialize_with = "deserialize_flag")]
    pub is_fast_fashion: bool,
}

/// Accepts the boolean spellings spreadsheets tend to export.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid isFastFashion value {other:?}"
        ))),
    }
}

/// Metadata extracted from one newsletter page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterRecord {
    /// Text of the first `<h1>`.
    pub title: Option<String>,
    /// Text of the first `<h2>`.
    pub text_content: Option<String>,
    /// Displayed text of the first `<time>`, or [`SENT_TIME_SENTINEL`].
    pub sent_time: Option<String>,
    /// The URL the page was fetched from.
    pub source_url: String,
}

/// How a brand-year ended up in the output.
///
/// The CSV shows the last three identically (a single sentinel row); the run
/// report keeps them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandOutcome {
    /// At least one newsletter was parsed.
    Collected,
    /// The listing page had no newsletter links.
    NoCampaigns,
    /// Links were found but every newsletter failed to fetch or parse.
    AllFailed,
    /// The listing page itself could not be read.
    ListingFailed,
}

/// One brand's newsletters for a single year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandTable {
    pub brand_name: String,
    pub is_fast_fashion: bool,
    pub outcome: BrandOutcome,
    /// Number of newsletter links the listing page yielded.
    pub links_found: usize,
    /// Successfully parsed newsletters, in listing order.
    pub newsletters: Vec<NewsletterRecord>,
    /// URLs that were dropped because fetching or parsing failed.
    pub discarded: Vec<String>,
}

impl BrandTable {
    /// A table holding only the sentinel row.
    pub fn empty(brand_name: &str, is_fast_fashion: bool, outcome: BrandOutcome) -> Self {
        Self {
            brand_name: brand_name.to_string(),
            is_fast_fashion,
            outcome,
            links_found: 0,
            newsletters: Vec::new(),
            discarded: Vec::new(),
        }
    }

    /// Whether this table is represented by a single all-empty row.
    pub fn is_sentinel(&self) -> bool {
        self.newsletters.is_empty()
    }

    /// Output rows for `year`: one per newsletter, or one sentinel row.
    pub fn rows(&self, year: &str) -> Vec<NewsletterRow> {
        if self.is_sentinel() {
            return vec![NewsletterRow {
                title: None,
                txt_content: None,
                time_sent: None,
                url: None,
                brand_name: self.brand_name.clone(),
                is_fast_fashion: self.is_fast_fashion,
                year: year.to_string(),
            }];
        }

        self.newsletters
            .iter()
            .map(|n| NewsletterRow {
                title: n.title.clone(),
                txt_content: n.text_content.clone(),
                time_sent: n.sent_time.clone(),
                url: Some(n.source_url.clone()),
                brand_name: self.brand_name.clone(),
                is_fast_fashion: self.is_fast_fashion,
                year: year.to_string(),
            })
            .collect()
    }
}

/// One row of the output CSV. Field order is column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsletterRow {
    pub title: Option<String>,
    pub txt_content: Option<String>,
    pub time_sent: Option<String>,
    pub url: Option<String>,
    pub brand_name: String,
    pub is_fast_fashion: bool,
    pub year: String,
}

/// All rows of a run, years ascending, brands in roster order within a year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalTable {
    pub rows: Vec<NewsletterRow>,
}

/// Summary of one brand-year for the run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandYearReport {
    pub brand_name: String,
    pub year: String,
    pub outcome: BrandOutcome,
    pub links_found: usize,
    pub newsletters_parsed: usize,
    pub discarded_urls: Vec<String>,
}

impl BrandYearReport {
    pub fn from_table(table: &BrandTable, year: &str) -> Self {
        Self {
            brand_name: table.brand_name.clone(),
            year: year.to_string(),
            outcome: table.outcome,
            links_found: table.links_found,
            newsletters_parsed: table.newsletters.len(),
            discarded_urls: table.discarded.clone(),
        }
    }
}

/// Operator-facing account of a run, serialized as JSON next to the CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// When the report was produced, RFC 3339.
    pub generated_at: String,
    pub year_low: i32,
    pub year_high: i32,
    pub total_rows: usize,
    pub brand_years: Vec<BrandYearReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newsletter(url: &str) -> NewsletterRecord {
        NewsletterRecord {
            title: Some("Sale!".to_string()),
            text_content: Some("20% off".to_string()),
            sent_time: Some(SENT_TIME_SENTINEL.to_string()),
            source_url: url.to_string(),
        }
    }

    #[test]
    fn test_sentinel_row_keeps_brand_fields() {
        let table = BrandTable::empty("Acme", true, BrandOutcome::NoCampaigns);
        let rows = table.rows("2020");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.title, None);
        assert_eq!(row.txt_content, None);
        assert_eq!(row.time_sent, None);
        assert_eq!(row.url, None);
        assert_eq!(row.brand_name, "Acme");
        assert!(row.is_fast_fashion);
        assert_eq!(row.year, "2020");
    }

    #[test]
    fn test_rows_follow_newsletter_order() {
        let mut table = BrandTable::empty("Acme", false, BrandOutcome::Collected);
        table.newsletters = vec![newsletter("http://x/1"), newsletter("http://x/2")];
        let urls: Vec<_> = table
            .rows("2021")
            .into_iter()
            .map(|r| r.url.unwrap())
            .collect();
        assert_eq!(urls, vec!["http://x/1", "http://x/2"]);
    }

    #[test]
    fn test_brand_record_flag_spellings() {
        let data = "BrandName,Url,isFastFashion\nA,http://x/A,True\nB,http://x/B,0\nC,http://x/C, yes \n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let flags: Vec<bool> = reader
            .deserialize::<BrandRecord>()
            .map(|r| r.unwrap().is_fast_fashion)
            .collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn test_brand_record_rejects_unknown_flag() {
        let data = "BrandName,Url,isFastFashion\nA,http://x/A,maybe\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        assert!(reader.deserialize::<BrandRecord>().next().unwrap().is_err());
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        let json = serde_json::to_string(&BrandOutcome::ListingFailed).unwrap();
        assert_eq!(json, "\"listing_failed\"");
    }

    #[test]
    fn test_report_from_table() {
        let mut table = BrandTable::empty("Acme", true, BrandOutcome::AllFailed);
        table.links_found = 2;
        table.discarded = vec!["http://x/1".to_string(), "http://x/2".to_string()];
        let report = BrandYearReport::from_table(&table, "2019");
        assert_eq!(report.outcome, BrandOutcome::AllFailed);
        assert_eq!(report.links_found, 2);
        assert_eq!(report.newsletters_parsed, 0);
        assert_eq!(report.discarded_urls.len(), 2);
    }
}
