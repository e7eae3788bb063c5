//! Per-brand aggregation of parsed newsletters.

use crate::fetch::PageSource;
use crate::models::{BrandOutcome, BrandTable};
use crate::scrapers::newsletter::parse_newsletter;
use tracing::{info, instrument, warn};

/// Parse every newsletter URL of one brand, one at a time, in input order.
///
/// # Arguments
///
/// * `source` - Where pages are fetched from
/// * `brand_name` - Name copied onto every row
/// * `urls` - Newsletter URLs from the brand's listing page
/// * `is_fast_fashion` - Roster flag copied onto every row
///
/// # Returns
///
/// A [`BrandTable`] holding the successfully parsed newsletters in input
/// order. Failed URLs are logged and recorded in [`BrandTable::discarded`].
/// When no newsletter survives, the table renders as a single sentinel row
/// and its outcome is [`BrandOutcome::NoCampaigns`] (no links) or
/// [`BrandOutcome::AllFailed`] (every link failed).
#[instrument(level = "info", skip(source, urls), fields(links = urls.len()))]
pub async fn aggregate<S: PageSource>(
    source: &S,
    brand_name: &str,
    urls: &[String],
    is_fast_fashion: bool,
) -> BrandTable {
    let mut table = BrandTable::empty(brand_name, is_fast_fashion, BrandOutcome::NoCampaigns);
    table.links_found = urls.len();

    for url in urls {
        match parse_newsletter(source, url).await {
            Ok(record) => table.newsletters.push(record),
            Err(e) => {
                warn!(%url, error = %e, "Discarding newsletter");
                table.discarded.push(url.clone());
            }
        }
    }

    table.outcome = match (urls.is_empty(), table.newsletters.is_empty()) {
        (true, _) => BrandOutcome::NoCampaigns,
        (false, true) => BrandOutcome::AllFailed,
        (false, false) => BrandOutcome::Collected,
    };

    info!(
        parsed = table.newsletters.len(),
        discarded = table.discarded.len(),
        outcome = ?table.outcome,
        "Aggregated brand"
    );
    table
}
