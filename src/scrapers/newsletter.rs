//! Newsletter page scraper.
//!
//! Campaign pages share one layout: the subject line is the first `<h1>`, the
//! preview text the first `<h2>`, and the send time the first `<time>`. The
//! send time is only trusted when the element declares the expected
//! `data-format`; otherwise it is recorded as `"NaN"`.

use crate::error::{MarkupShapeError, ParseError};
use crate::fetch::PageSource;
use crate::models::{NewsletterRecord, SENT_TIME_SENTINEL};
use crate::utils::{element_string, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

/// `data-format` a `<time>` element must carry for its text to be used.
pub const EXPECTED_TIME_FORMAT: &str = "%B %e, %Y %l:%M%P";

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static TEXT_CONTENT: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static SENT_TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());

fn first<'a>(
    document: &'a Html,
    selector: &Selector,
    element: &'static str,
    url: &str,
) -> Result<ElementRef<'a>, MarkupShapeError> {
    document.select(selector).next().ok_or_else(|| MarkupShapeError {
        url: url.to_string(),
        element,
    })
}

/// Extract a [`NewsletterRecord`] from an already fetched page.
pub fn extract_newsletter(html: &str, url: &str) -> Result<NewsletterRecord, MarkupShapeError> {
    let document = Html::parse_document(html);

    let title = first(&document, &TITLE, "h1", url)?;
    let text_content = first(&document, &TEXT_CONTENT, "h2", url)?;
    let time = first(&document, &SENT_TIME, "time", url)?;

    let sent_time = match time.value().attr("data-format") {
        Some(EXPECTED_TIME_FORMAT) => element_string(time),
        _ => Some(SENT_TIME_SENTINEL.to_string()),
    };

    Ok(NewsletterRecord {
        title: element_string(title),
        text_content: element_string(text_content),
        sent_time,
        source_url: url.to_string(),
    })
}

/// Fetch and parse one newsletter.
///
/// # Arguments
///
/// * `source` - Where pages are fetched from
/// * `url` - Absolute URL of the newsletter page
///
/// # Returns
///
/// A [`NewsletterRecord`] whose `source_url` is `url`. `sent_time` is
/// `"NaN"` when the `<time>` element's `data-format` is not
/// [`EXPECTED_TIME_FORMAT`].
///
/// # Errors
///
/// - [`ParseError::Fetch`] if the page cannot be fetched
/// - [`ParseError::Markup`] if the page lacks an `<h1>`, `<h2>` or `<time>`
///
/// Either error only drops this newsletter; the caller moves on to the next
/// URL.
#[instrument(level = "debug", skip(source))]
pub async fn parse_newsletter<S: PageSource>(
    source: &S,
    url: &str,
) -> Result<NewsletterRecord, ParseError> {
    let page = source.fetch(url).await?;
    let html = String::from_utf8_lossy(&page);
    let record = extract_newsletter(&html, url)?;

    debug!(
        title = %truncate_for_log(record.title.as_deref().unwrap_or_default(), 80),
        sent_time = ?record.sent_time,
        "Parsed newsletter"
    );
    Ok(record)
}
