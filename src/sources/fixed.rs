use crate::domain::content::ContentItem;
use crate::domain::market::MarketSnapshot;

use super::{ContentSource, HttpClient, MarketFeed, SourceError, SourceResult};

/// A source that never touches the network: it replays a prepared list or a
/// prepared failure. Backs the curated headlines and offline runs.
pub struct FixedSource {
    name: String,
    outcome: Result<Vec<ContentItem>, String>,
}

impl FixedSource {
    pub fn new(name: impl Into<String>, items: Vec<ContentItem>) -> Self {
        Self {
            name: name.into(),
            outcome: Ok(items),
        }
    }

    pub fn failing(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Err(reason.into()),
        }
    }
}

impl ContentSource for FixedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, _http: &HttpClient) -> SourceResult<Vec<ContentItem>> {
        match &self.outcome {
            Ok(items) => Ok(items.clone()),
            Err(reason) => Err(SourceError::Parse(reason.clone())),
        }
    }
}

/// Replays a prepared market snapshot or failure.
pub struct FixedMarket {
    outcome: Result<MarketSnapshot, String>,
}

impl FixedMarket {
    pub fn new(snapshot: MarketSnapshot) -> Self {
        Self {
            outcome: Ok(snapshot),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
        }
    }
}

impl MarketFeed for FixedMarket {
    fn fetch_market(&self, _http: &HttpClient) -> SourceResult<MarketSnapshot> {
        match &self.outcome {
            Ok(snapshot) => Ok(snapshot.clone()),
            Err(reason) => Err(SourceError::Parse(reason.clone())),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::domain::content::{ContentItem, NewsChannel};
    use crate::services::normalize::{RawNews, normalize_news};

    pub(crate) fn item(title: &str) -> ContentItem {
        normalize_news(
            RawNews {
                title: title.into(),
                ..RawNews::default()
            },
            NewsChannel::Curated,
        )
        .unwrap()
    }
}
