//! Scrapers for newsletter archive sites.
//!
//! Scraping happens in two phases, mirrored by the two submodules:
//!
//! 1. **Indexing** ([`archive`]): read a brand's year listing and collect the
//!    URL of every campaign on it.
//! 2. **Parsing** ([`newsletter`]): fetch each campaign page and pull out its
//!    title, preview text and send time.
//!
//! Both take any [`PageSource`](crate::fetch::PageSource), and both keep
//! page-level extraction in a plain function (`extract_links`,
//! `extract_newsletter`) that works on HTML already in memory.

pub mod archive;
pub mod newsletter;
