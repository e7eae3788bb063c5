//! Error types shared across the scraping pipeline.
//!
//! Failures are split by the layer that produces them so callers can decide
//! what is recoverable: a [`ParseError`] drops one newsletter, a
//! [`CollectError`] drops one brand-year listing, while [`RosterError`] and
//! [`PersistError`] end the run.

use reqwest::StatusCode;
use thiserror::Error;

/// A single page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a 4xx or 5xx status.
    #[error("GET {url} returned {status}")]
    Status { url: String, status: StatusCode },
    /// The request never produced a usable response.
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A page was fetched but does not have the markup we extract from.
#[derive(Debug, Error)]
#[error("{url}: page has no <{element}> element")]
pub struct MarkupShapeError {
    pub url: String,
    pub element: &'static str,
}

/// Why a newsletter was discarded.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Markup(#[from] MarkupShapeError),
}

/// Why a brand's year listing could not be read.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("invalid archive url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// The brand roster could not be loaded.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("cannot read roster {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed roster: {0}")]
    Csv(#[from] csv::Error),
}

/// The final table or run report could not be written.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A run could not start or could not be persisted.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("year range is empty: {low} > {high}")]
    InvalidYearRange { low: i32, high: i32 },
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_url_and_code() {
        let err = FetchError::Status {
            url: "https://milled.com/Zara/2020".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        let msg = err.to_string();
        assert!(msg.contains("https://milled.com/Zara/2020"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let err: ParseError = MarkupShapeError {
            url: "https://milled.com/Zara/x".to_string(),
            element: "h2",
        }
        .into();
        assert_eq!(err.to_string(), "https://milled.com/Zara/x: page has no <h2> element");
    }
}
