//! Source adapters: one per external origin.
//!
//! Every adapter splits fetching from parsing. `fetch` performs exactly one
//! attempt against the origin and returns a [`SourceResult`]; the pure
//! `parse_*` functions turn a response body into normalized items and are
//! what the unit tests exercise.

use thiserror::Error;

use crate::domain::content::ContentItem;
use crate::domain::market::MarketSnapshot;

pub mod browserless;
pub mod eastmoney;
pub mod fixed;
pub mod http;
pub mod markup;
pub mod sina;
pub mod weibo;
pub mod weixin;
pub mod xhs;
pub mod yahoo;

pub use http::HttpClient;

/// Reasons a source produced no data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("no usable items in response")]
    Empty,
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::Parse(err.to_string())
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// An origin of news or social items.
pub trait ContentSource {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Performs a single fetch. No retries.
    fn fetch(&self, http: &HttpClient) -> SourceResult<Vec<ContentItem>>;
}

/// An origin of market quotes.
pub trait MarketFeed {
    fn fetch_market(&self, http: &HttpClient) -> SourceResult<MarketSnapshot>;
}

impl<S: ContentSource + ?Sized> ContentSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, http: &HttpClient) -> SourceResult<Vec<ContentItem>> {
        (**self).fetch(http)
    }
}

/// Uses `fallback` whenever `primary` fails or comes back empty.
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> WithFallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: ContentSource, F: ContentSource> ContentSource for WithFallback<P, F> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn fetch(&self, http: &HttpClient) -> SourceResult<Vec<ContentItem>> {
        match self.primary.fetch(http) {
            Ok(items) if !items.is_empty() => return Ok(items),
            Ok(_) => log::info!(
                "{} returned nothing, switching to {}",
                self.primary.name(),
                self.fallback.name()
            ),
            Err(e) => log::warn!(
                "{} failed ({e}), switching to {}",
                self.primary.name(),
                self.fallback.name()
            ),
        }
        self.fallback.fetch(http)
    }
}

/// Runs `source` once and converts a failure into an empty list plus a
/// logged warning.
pub fn fetch_or_empty<S: ContentSource + ?Sized>(source: &S, http: &HttpClient) -> Vec<ContentItem> {
    match source.fetch(http) {
        Ok(items) => {
            log::info!("{}: {} items", source.name(), items.len());
            items
        }
        Err(e) => {
            log::warn!("{} unavailable: {e}", source.name());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::fixed::{self, FixedSource};
    use std::time::Duration;

    fn client() -> HttpClient {
        HttpClient::new(Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn failures_become_empty_lists() {
        let source = FixedSource::failing("broken", "boom");
        assert!(fetch_or_empty(&source, &client()).is_empty());
    }

    #[test]
    fn fallback_used_when_primary_is_empty() {
        let primary = FixedSource::new("primary", vec![]);
        let fallback = FixedSource::new("fallback", vec![fixed::tests::item("来自备用")]);
        let source = WithFallback::new(primary, fallback);

        let items = source.fetch(&client()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "来自备用");
    }

    #[test]
    fn fallback_skipped_when_primary_has_items() {
        let primary = FixedSource::new("primary", vec![fixed::tests::item("主")]);
        let fallback = FixedSource::failing("fallback", "should not run");
        let items = WithFallback::new(primary, fallback).fetch(&client()).unwrap();
        assert_eq!(items[0].title, "主");
    }
}
