//! Fetching article pages and turning them into text.
//!
//! The batch only depends on the [`ArticleFetcher`] trait, so it can run
//! against the real HTTP client ([`page::HttpFetcher`]) or against an
//! in-memory fetcher in tests.
//!
//! A fetch either yields an [`ArticleText`] or a [`FetchError`]. Extraction
//! itself never fails: a page without a `<title>` gets an empty title and an
//! empty page gets an empty body.

use crate::errors::FetchError;
use crate::models::ArticleText;

pub mod page;

/// Source of article text for a URL.
pub trait ArticleFetcher {
    /// Fetch `url` and extract its title and visible text.
    async fn fetch(&self, url: &str) -> Result<ArticleText, FetchError>;
}
