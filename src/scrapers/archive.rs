//! Archive listing scraper.
//!
//! A brand's archive is paged by year: `{archive_base_url}/{year}` lists every
//! campaign sent that year as `<a class="line-clamp-3" href="/Brand/slug">`.
//! Links are root-relative and are resolved against the archive's origin.

use crate::error::CollectError;
use crate::fetch::PageSource;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

/// Class carried by newsletter links on a year listing page.
pub const ARCHIVE_LINK_CLASS: &str = "line-clamp-3";

static ARCHIVE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&format!("a.{ARCHIVE_LINK_CLASS}")).unwrap());

/// URL of the listing page for one year.
pub fn year_listing_url(archive_base_url: &str, year: &str) -> String {
    format!("{}/{}", archive_base_url.trim_end_matches('/'), year)
}

/// Root origin (`scheme://host[:port]/`) of an archive URL.
pub fn site_origin(archive_base_url: &str) -> Result<Url, CollectError> {
    let invalid = |source| CollectError::InvalidUrl {
        url: archive_base_url.to_string(),
        source,
    };
    let parsed = Url::parse(archive_base_url).map_err(invalid)?;
    Url::parse(&parsed.origin().ascii_serialization()).map_err(invalid)
}

/// Absolute newsletter URLs found on a listing page, in page order.
///
/// Each `href` is resolved with WHATWG URL joining rather than plain string
/// concatenation: dot segments are collapsed and characters such as spaces
/// are percent-encoded. Anchors without an `href`, or whose `href` cannot be
/// joined onto `origin`, are skipped.
pub fn extract_links(html: &str, origin: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    for element in document.select(&ARCHIVE_LINK) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        match origin.join(href) {
            Ok(resolved) => links.push(resolved.to_string()),
            Err(e) => debug!(%href, error = %e, "Skipping unresolvable link"),
        }
    }
    links
}

/// Collect every newsletter URL a brand published in `year`.
///
/// Fetches `{archive_base_url}/{year}` and extracts every
/// `a.line-clamp-3` link, resolved against the archive's origin.
///
/// # Arguments
///
/// * `source` - Where pages are fetched from
/// * `archive_base_url` - The brand's archive, e.g. `https://milled.com/Zara`
/// * `year` - Year of the listing page, e.g. `"2020"`
///
/// # Returns
///
/// Absolute newsletter URLs in listing order. A listing without matching
/// anchors (no campaigns that year, or a year the site still serves an
/// empty page for) is an empty list, not an error.
///
/// # Errors
///
/// - [`CollectError::InvalidUrl`] if `archive_base_url` does not parse
/// - [`CollectError::Fetch`] if the listing page cannot be fetched
#[instrument(level = "info", skip(source))]
pub async fn collect_links<S: PageSource>(
    source: &S,
    archive_base_url: &str,
    year: &str,
) -> Result<Vec<String>, CollectError> {
    let origin = site_origin(archive_base_url)?;
    let listing_url = year_listing_url(archive_base_url, year);

    let page = source.fetch(&listing_url).await?;
    let html = String::from_utf8_lossy(&page);
    let links = extract_links(&html, &origin);

    info!(count = links.len(), url = %listing_url, "Indexed newsletter URLs");
    debug!(urls = ?links, "Newsletter URLs");
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::fake::StaticPages;

    const LISTING: &str = r#"
        <html><body>
          <a class="line-clamp-3" href="/Acme/spring-sale-abc">Spring sale</a>
          <a class="text-sm line-clamp-3" href="/Acme/new-in-def">New in</a>
          <a class="line-clamp-2" href="/Acme/not-a-campaign">Nope</a>
          <a class="line-clamp-3">No href</a>
          <a href="/Acme/plain">Plain</a>
        </body></html>
    "#;

    #[test]
    fn test_year_listing_url() {
        assert_eq!(year_listing_url("https://milled.com/Zara", "2020"), "https://milled.com/Zara/2020");
        assert_eq!(year_listing_url("https://milled.com/Zara/", "2020"), "https://milled.com/Zara/2020");
    }

    #[test]
    fn test_site_origin_drops_path() {
        let origin = site_origin("https://milled.com/wearPACT").unwrap();
        assert_eq!(origin.as_str(), "https://milled.com/");
    }

    #[test]
    fn test_site_origin_keeps_port() {
        let origin = site_origin("http://127.0.0.1:8080/Acme").unwrap();
        assert_eq!(origin.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_site_origin_rejects_garbage() {
        assert!(matches!(
            site_origin("not a url"),
            Err(CollectError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_extract_links_matches_class_token_and_skips_missing_href() {
        let origin = Url::parse("https://milled.com/").unwrap();
        let links = extract_links(LISTING, &origin);
        assert_eq!(
            links,
            vec![
                "https://milled.com/Acme/spring-sale-abc",
                "https://milled.com/Acme/new-in-def",
            ]
        );
    }

    #[test]
    fn test_extract_links_normalizes_hrefs() {
        let origin = Url::parse("https://milled.com/").unwrap();
        let html = r#"
            <a class="line-clamp-3" href="/Acme/../Other/x">dots</a>
            <a class="line-clamp-3" href="/Acme/a b">space</a>
            <a class="line-clamp-3" href="https://cdn.example.com/Acme/y">absolute</a>
        "#;
        assert_eq!(
            extract_links(html, &origin),
            vec![
                "https://milled.com/Other/x",
                "https://milled.com/Acme/a%20b",
                "https://cdn.example.com/Acme/y",
            ]
        );
    }

    #[tokio::test]
    async fn test_collect_links_fetches_year_page() {
        let pages = StaticPages::new().with_page("http://x/Acme/2020", LISTING);
        let links = collect_links(&pages, "http://x/Acme", "2020").await.unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0], "http://x/Acme/spring-sale-abc");
        assert_eq!(pages.requested(), vec!["http://x/Acme/2020".to_string()]);
    }

    #[tokio::test]
    async fn test_collect_links_no_anchors_is_empty() {
        let pages = StaticPages::new().with_page("http://x/Acme/1999", "<html><body><p>Nothing here</p></body></html>");
        let links = collect_links(&pages, "http://x/Acme", "1999").await.unwrap();
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_collect_links_fetch_failure_is_error() {
        let pages = StaticPages::new();
        let err = collect_links(&pages, "http://x/Acme", "2020").await.unwrap_err();
        assert!(matches!(err, CollectError::Fetch(FetchError::Status { .. })));
    }
}
