//! Run orchestration across brands and years.
//!
//! For each year in the requested range:
//! 1. **Indexing**: collect every brand's newsletter links, at most
//!    `workers` listing requests in flight.
//! 2. **Aggregation**: parse each brand's newsletters, brands one after the
//!    other in roster order.
//! 3. **Assembly**: append the brand rows, tagged with the year.
//!
//! Once every year is done the table and the run report are written to the
//! output directory.

use crate::aggregate::aggregate;
use crate::error::{CollectError, RunError};
use crate::fetch::PageSource;
use crate::models::{BrandOutcome, BrandTable, BrandYearReport, FinalTable, RunReport};
use crate::outputs::{csv, json};
use crate::roster::Roster;
use crate::scrapers::archive::collect_links;
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

/// Default number of concurrent listing requests.
pub const DEFAULT_WORKERS: usize = 12;

/// Settings fixed for the lifetime of an [`Orchestrator`].
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory the table and report are written into.
    pub output_dir: PathBuf,
    /// Maximum concurrent listing requests; values below 1 are treated as 1.
    pub workers: usize,
}

/// What a run produced and where it was written.
#[derive(Debug)]
pub struct RunOutput {
    pub table: FinalTable,
    pub report: RunReport,
    pub table_path: PathBuf,
    /// `None` when the report could not be written.
    pub report_path: Option<PathBuf>,
}

/// Drives link collection, aggregation and persistence for a roster.
#[derive(Debug)]
pub struct Orchestrator<S> {
    source: S,
    roster: Roster,
    config: RunConfig,
}

impl<S: PageSource> Orchestrator<S> {
    pub fn new(source: S, roster: Roster, config: RunConfig) -> Self {
        Self {
            source,
            roster,
            config,
        }
    }

    /// Scrape every brand for every year in `[year_low, year_high]` and
    /// persist the result.
    #[instrument(level = "info", skip(self), fields(brands = self.roster.len()))]
    pub async fn run(&self, year_low: i32, year_high: i32) -> Result<RunOutput, RunError> {
        if year_low > year_high {
            return Err(RunError::InvalidYearRange {
                low: year_low,
                high: year_high,
            });
        }
        if self.roster.is_empty() {
            warn!("Roster is empty; output will only contain a header");
        }

        let mut table = FinalTable::default();
        let mut brand_years = Vec::new();

        for year in year_low..=year_high {
            let year = year.to_string();
            info!(%year, "Starting year");

            let tables = self.scrape_year(&year).await;
            for brand_table in &tables {
                table.rows.extend(brand_table.rows(&year));
                brand_years.push(BrandYearReport::from_table(brand_table, &year));
            }

            info!(%year, rows = table.rows.len(), "Finished year");
        }

        let report = RunReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            year_low,
            year_high,
            total_rows: table.rows.len(),
            brand_years,
        };

        let table_csv = csv::encode_table(&table)?;
        let report_json = json::encode_report(&report)?;

        let output_dir = &self.config.output_dir;
        let table_path = csv::write_final_table(&table_csv, output_dir, year_low, year_high).await?;
        info!(rows = table.rows.len(), path = %table_path.display(), "Persisted newsletter table");

        // The table is the product; a missing report only costs diagnostics.
        let report_path = match json::write_report(&report_json, output_dir, year_low, year_high).await {
            Ok(path) => Some(path),
            Err(e) => {
                error!(error = %e, "Failed to write run report; table was written");
                None
            }
        };

        Ok(RunOutput {
            table,
            report,
            table_path,
            report_path,
        })
    }

    /// One [`BrandTable`] per brand for `year`, in roster order.
    async fn scrape_year(&self, year: &str) -> Vec<BrandTable> {
        let links = self.collect_year_links(year).await;
        info!(%year, "Got all the links");

        let mut tables = Vec::with_capacity(links.len());
        for (brand, links) in self.roster.brands().iter().zip(links) {
            let table = match links {
                Ok(urls) => aggregate(&self.source, &brand.name, &urls, brand.is_fast_fashion).await,
                Err(_) => BrandTable::empty(&brand.name, brand.is_fast_fashion, BrandOutcome::ListingFailed),
            };
            tables.push(table);
        }
        tables
    }

    /// Listing results for every brand, aligned with roster order.
    ///
    /// A brand whose listing fails is logged and reported as such; it never
    /// stops the other brands.
    async fn collect_year_links(&self, year: &str) -> Vec<Result<Vec<String>, CollectError>> {
        let workers = self.config.workers.max(1);
        let source = &self.source;

        stream::iter(self.roster.brands())
            .map(|brand| async move {
                let result = collect_links(source, &brand.archive_url, year).await;
                if let Err(e) = &result {
                    error!(brand = %brand.name, %year, error = %e, "Listing failed; brand-year recorded as empty");
                }
                result
            })
            .buffered(workers)
            .collect()
            .await
    }
}
