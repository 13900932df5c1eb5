//! Yahoo Finance: headlines about the listed entity and daily closes for
//! the market header.

use chrono::DateTime;
use serde::Deserialize;
use url::Url;

use crate::domain::CST;
use crate::domain::content::{ContentItem, NewsChannel};
use crate::domain::market::{MarketSnapshot, Quote};
use crate::services::normalize::{RawNews, normalize_all, normalize_news};

use super::{ContentSource, HttpClient, MarketFeed, SourceError, SourceResult};

const SEARCH_URL: &str = "https://query1.finance.yahoo.com/v1/finance/search";
const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/";
const MAX_NEWS: usize = 15;

/// The brand's Hong Kong listing.
pub const SHARE_SYMBOL: &str = "6181.HK";
pub const GOLD_SYMBOL: &str = "GC=F";
pub const FX_SYMBOL: &str = "USDCNY=X";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<SearchNews>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNews {
    #[serde(default)]
    title: String,
    publisher: Option<String>,
    link: Option<String>,
    provider_publish_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Parses a `v1/finance/search` payload into news items.
pub fn parse_news(body: &str) -> SourceResult<Vec<ContentItem>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let raws = response
        .news
        .into_iter()
        .take(MAX_NEWS)
        .map(|n| RawNews {
            title: n.title,
            source: n.publisher.unwrap_or_default(),
            link: n.link.unwrap_or_default(),
            published_at: n
                .provider_publish_time
                .filter(|ts| *ts > 0)
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
                .map(|dt| dt.with_timezone(&CST)),
        })
        .collect();
    Ok(normalize_all(raws, |raw| normalize_news(raw, NewsChannel::Yahoo)))
}

/// Parses a `v8/finance/chart` payload into its last two closes.
pub fn parse_quote(body: &str) -> SourceResult<Quote> {
    let response: ChartResponse = serde_json::from_str(body)?;
    let closes: Vec<f64> = response
        .chart
        .result
        .unwrap_or_default()
        .into_iter()
        .flat_map(|r| r.indicators.quote)
        .flat_map(|q| q.close)
        .flatten()
        .collect();

    let last = *closes.last().ok_or(SourceError::Empty)?;
    let previous = closes.len().checked_sub(2).map_or(last, |i| closes[i]);
    Ok(Quote { last, previous })
}

/// Headlines about [`SHARE_SYMBOL`].
pub struct YahooNews;

impl ContentSource for YahooNews {
    fn name(&self) -> &str {
        "yahoo-news"
    }

    fn fetch(&self, http: &HttpClient) -> SourceResult<Vec<ContentItem>> {
        let url = Url::parse_with_params(
            SEARCH_URL,
            &[
                ("q", SHARE_SYMBOL),
                ("quotesCount", "0"),
                ("newsCount", "15"),
            ],
        )?;
        let body = http.get_text(url.as_str(), None)?;
        parse_news(&body)
    }
}

/// Gold, USD/CNY and the brand's share price from daily charts.
pub struct YahooMarket;

impl YahooMarket {
    fn quote(http: &HttpClient, symbol: &str) -> SourceResult<Quote> {
        let mut url = Url::parse(CHART_URL)?.join(symbol)?;
        url.query_pairs_mut()
            .append_pair("range", "5d")
            .append_pair("interval", "1d");
        let body = http.get_text(url.as_str(), None)?;
        parse_quote(&body).map_err(|e| match e {
            SourceError::Empty => SourceError::Parse(format!("{symbol}: no closes")),
            other => other,
        })
    }
}

impl MarketFeed for YahooMarket {
    fn fetch_market(&self, http: &HttpClient) -> SourceResult<MarketSnapshot> {
        let gold = Self::quote(http, GOLD_SYMBOL)?;
        let usd_cny = Self::quote(http, FX_SYMBOL)?;
        let share = Self::quote(http, SHARE_SYMBOL)?;
        Ok(MarketSnapshot::new(gold, usd_cny.last, share))
    }
}
