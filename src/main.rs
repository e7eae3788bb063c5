//! # Milled Newsletters
//!
//! Scrapes the marketing-newsletter archives of a fixed roster of retail
//! brands, extracts each newsletter's title, preview text, send time and URL,
//! tags every brand as fast-fashion or not, and writes everything to one CSV
//! for later analysis.
//!
//! ## Usage
//!
//! ```sh
//! milled_newsletters 2019 2021 -r Data/BrandListFiltered.csv -o Data
//! ```
//!
//! ## Architecture
//!
//! For each year in the range:
//! 1. **Indexing**: read every brand's year listing, a bounded number at a time
//! 2. **Parsing**: fetch each newsletter, brand by brand, one page at a time
//! 3. **Assembly**: append rows in roster order
//!
//! After the last year the table (`Newsletters_from_{low}_to_{high}.csv`) and
//! a JSON run report are written to the output directory.

use chrono::{Datelike, Local};
use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod error;
mod fetch;
mod models;
mod orchestrator;
mod outputs;
mod roster;
mod scrapers;
mod utils;

use cli::Cli;
use fetch::HttpFetcher;
use models::BrandOutcome;
use orchestrator::{Orchestrator, RunConfig};
use roster::Roster;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("milled_newsletters starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let current_year = Local::now().year();
    if args.year_high > current_year {
        warn!(
            year_high = args.year_high,
            current_year, "Year range extends past the current year; those listings will be empty"
        );
    }

    // Fail before any network traffic if the results could not be saved
    ensure_writable_dir(&args.output_dir).await?;

    let roster = Roster::load(&args.roster)?;
    let fetcher = HttpFetcher::new(&args.user_agent)?;
    let config = RunConfig {
        output_dir: args.output_dir.clone(),
        workers: args.workers,
    };
    info!(workers = config.workers, user_agent = %args.user_agent, "Fetcher ready");

    let output = Orchestrator::new(fetcher, roster, config)
        .run(args.year_low, args.year_high)
        .await?;

    let count = |outcome: BrandOutcome| {
        output
            .report
            .brand_years
            .iter()
            .filter(|b| b.outcome == outcome)
            .count()
    };
    let discarded: usize = output
        .report
        .brand_years
        .iter()
        .map(|b| b.discarded_urls.len())
        .sum();

    let elapsed = start_time.elapsed();
    info!(
        rows = output.table.rows.len(),
        collected = count(BrandOutcome::Collected),
        no_campaigns = count(BrandOutcome::NoCampaigns),
        all_failed = count(BrandOutcome::AllFailed),
        listing_failed = count(BrandOutcome::ListingFailed),
        discarded_newsletters = discarded,
        table = %output.table_path.display(),
        report = ?output.report_path,
        secs = elapsed.as_secs(),
        "Execution complete"
    );

    Ok(())
}
