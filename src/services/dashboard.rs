//! One dashboard generation run: fetch, merge, rank, render, write.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Utc};

use crate::catalog;
use crate::domain::CST;
use crate::domain::content::{Category, ContentItem, SocialPlatform};
use crate::domain::market::MarketSnapshot;
use crate::export::DataExport;
use crate::models::config::AppConfig;
use crate::render::{DashboardInput, DashboardView, Renderer};
use crate::services::errors::{DashboardError, DashboardResult};
use crate::services::merge::merge_dedupe;
use crate::sources::eastmoney::EastmoneyNews;
use crate::sources::sina::SinaNews;
use crate::sources::weibo::WeiboSearch;
use crate::sources::weixin::SogouWeixin;
use crate::sources::xhs::{SogouXhs, XiaohongshuSearch};
use crate::sources::yahoo::{YahooMarket, YahooNews};
use crate::sources::{ContentSource, HttpClient, MarketFeed, WithFallback, fetch_or_empty};

pub const INDEX_FILE: &str = "index.html";
pub const DATA_FILE: &str = "data.json";

/// The origins consulted by a run, in priority order.
///
/// On a duplicate title the item from the earlier source is kept, so live
/// sources come before the curated fallback.
pub struct Sources {
    pub market: Box<dyn MarketFeed>,
    pub news: Vec<Box<dyn ContentSource>>,
    pub social: Vec<Box<dyn ContentSource>>,
}

impl Sources {
    /// The production set of sources.
    pub fn live(config: &AppConfig) -> Self {
        let xhs = WithFallback::new(
            XiaohongshuSearch {
                keyword: config.keyword.clone(),
                max_items: config.social_max_items,
                browserless: config.browserless.clone(),
            },
            SogouXhs {
                query: config.xhs_fallback_query.clone(),
                max_items: crate::sources::xhs::TOP_NOTES,
            },
        );

        Self {
            market: Box::new(YahooMarket),
            news: vec![
                Box::new(YahooNews),
                Box::new(EastmoneyNews),
                Box::new(SinaNews {
                    keyword: config.keyword.clone(),
                }),
                Box::new(catalog::curated_source()),
            ],
            social: vec![
                Box::new(WeiboSearch {
                    keyword: config.keyword.clone(),
                    max_items: config.social_max_items,
                }),
                Box::new(SogouWeixin {
                    keyword: config.keyword.clone(),
                    max_items: config.social_max_items,
                }),
                Box::new(xhs),
            ],
        }
    }
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub generated_at: DateTime<FixedOffset>,
    pub market_available: bool,
    pub news_count: usize,
    pub social_count: usize,
    pub store_count: usize,
    pub index_path: PathBuf,
    pub data_path: PathBuf,
}

pub fn now_cst() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&CST)
}

/// Runs the pipeline against the live sources.
pub fn run(config: &AppConfig) -> DashboardResult<RunSummary> {
    let http = HttpClient::new(config.http_timeout())?;
    generate(config, &Sources::live(config), &http, now_cst())
}

fn gather(sources: &[Box<dyn ContentSource>], http: &HttpClient, key_len: usize) -> Vec<ContentItem> {
    let lists = sources
        .iter()
        .map(|source| fetch_or_empty(source.as_ref(), http))
        .collect();
    merge_dedupe(lists, key_len)
}

fn write_file(path: &Path, contents: &str) -> DashboardResult<()> {
    fs::write(path, contents).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn log_breakdown(news: &[ContentItem], social: &[ContentItem]) {
    let per_category = Category::ALL
        .iter()
        .map(|c| {
            let count = news.iter().filter(|n| n.category == *c).count();
            format!("{c} {count}")
        })
        .collect::<Vec<_>>()
        .join(" | ");
    log::info!("News after merge: {} ({per_category})", news.len());

    let per_platform = SocialPlatform::ALL
        .iter()
        .map(|p| {
            let count = social.iter().filter(|s| s.platform() == Some(*p)).count();
            format!("{} {count}", p.as_str())
        })
        .collect::<Vec<_>>()
        .join(" | ");
    log::info!("Social after merge: {} ({per_platform})", social.len());
}

/// Generates the dashboard from `sources` as of `now` and writes
/// [`INDEX_FILE`] and [`DATA_FILE`] into the configured output directory.
///
/// Source failures degrade to empty sections. Only configuration, catalog,
/// rendering and I/O problems abort the run.
pub fn generate(
    config: &AppConfig,
    sources: &Sources,
    http: &HttpClient,
    now: DateTime<FixedOffset>,
) -> DashboardResult<RunSummary> {
    let renderer = Renderer::new()?;
    let stores = catalog::stores()?;

    let market = match sources.market.fetch_market(http) {
        Ok(market) => market,
        Err(e) => {
            log::warn!("Market data unavailable: {e}");
            MarketSnapshot::unavailable(e.to_string())
        }
    };

    let news = gather(&sources.news, http, config.dedupe_key_len);
    let social = gather(&sources.social, http, config.dedupe_key_len);
    log_breakdown(&news, &social);

    let view = DashboardView::build(&DashboardInput {
        now,
        market: &market,
        news: &news,
        social: &social,
        stores: &stores,
        pricing: &config.pricing,
    });
    let page = renderer.render(&view)?;
    let data = DataExport::new(now, &stores, &config.pricing).to_json()?;

    fs::create_dir_all(&config.output_dir).map_err(|source| DashboardError::Io {
        path: config.output_dir.clone(),
        source,
    })?;
    let index_path = config.output_dir.join(INDEX_FILE);
    let data_path = config.output_dir.join(DATA_FILE);
    write_file(&index_path, &page)?;
    write_file(&data_path, &data)?;
    log::info!("Wrote {} ({} bytes)", index_path.display(), page.len());

    Ok(RunSummary {
        generated_at: now,
        market_available: market.error.is_none(),
        news_count: news.len(),
        social_count: social.len(),
        store_count: stores.len(),
        index_path,
        data_path,
    })
}
