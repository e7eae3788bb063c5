//! Command-line interface definitions.
//!
//! Every option can also be provided through an environment variable.

use crate::fetch::BROWSER_USER_AGENT;
use crate::orchestrator::DEFAULT_WORKERS;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for a scraping run.
///
/// # Examples
///
/// ```sh
/// # One year, default roster and output directory
/// milled_newsletters 2020 2020
///
/// # Several years with a custom roster and fewer concurrent listing requests
/// milled_newsletters 2015 2022 -r brands.csv -o out -w 4
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// First year to scrape (inclusive)
    pub year_low: i32,

    /// Last year to scrape (inclusive)
    pub year_high: i32,

    /// Brand roster CSV with columns BrandName, Url, isFastFashion
    #[arg(short, long, env = "NEWSLETTER_ROSTER", default_value = "Data/BrandListFiltered.csv")]
    pub roster: PathBuf,

    /// Directory the newsletter table and run report are written into
    #[arg(short, long, env = "NEWSLETTER_OUTPUT_DIR", default_value = "Data")]
    pub output_dir: PathBuf,

    /// Number of concurrent listing-page requests
    #[arg(short, long, env = "NEWSLETTER_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// User-Agent header sent with every request
    #[arg(long, env = "NEWSLETTER_USER_AGENT", default_value = BROWSER_USER_AGENT)]
    pub user_agent: String,
}
