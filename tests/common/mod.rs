//! Helpers for integration tests.

use std::path::Path;

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use laopu_intel::domain::CST;
use laopu_intel::domain::content::{ContentItem, NewsChannel, SocialPlatform};
use laopu_intel::domain::market::{MarketSnapshot, Quote};
use laopu_intel::domain::store::PricingConfig;
use laopu_intel::models::config::AppConfig;
use laopu_intel::services::dashboard::Sources;
use laopu_intel::services::normalize::{RawNews, RawSocial, normalize_news, normalize_social};
use laopu_intel::sources::browserless::BrowserlessSettings;
use laopu_intel::sources::ContentSource;
use laopu_intel::sources::fixed::{FixedMarket, FixedSource};
use tempfile::TempDir;

/// Temporary output directory used in integration tests.
pub struct TestOutput {
    dir: TempDir,
}

impl TestOutput {
    pub fn new() -> Self {
        TestOutput {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration writing into a not yet existing subdirectory.
    pub fn config(&self) -> AppConfig {
        AppConfig {
            output_dir: self.dir.path().join("public"),
            keyword: "老铺黄金".into(),
            xhs_fallback_query: "老铺黄金 小红书".into(),
            social_max_items: 10,
            dedupe_key_len: 20,
            http_timeout_secs: 1,
            pricing: PricingConfig::default(),
            browserless: BrowserlessSettings::default(),
        }
    }

    pub fn read(&self, file: &str) -> String {
        std::fs::read_to_string(self.dir.path().join("public").join(file))
            .expect("output file should exist")
    }
}

pub fn now() -> DateTime<FixedOffset> {
    CST.with_ymd_and_hms(2026, 1, 26, 18, 0, 0).unwrap()
}

pub fn news(title: &str, hours_ago: Option<i64>, channel: NewsChannel) -> ContentItem {
    normalize_news(
        RawNews {
            title: title.into(),
            link: "https://finance.example.com/a.html".into(),
            published_at: hours_ago.map(|h| now() - Duration::hours(h)),
            ..RawNews::default()
        },
        channel,
    )
    .expect("valid news item")
}

pub fn post(title: &str, likes: &str, platform: SocialPlatform) -> ContentItem {
    let mut raw = RawSocial {
        title: title.into(),
        preview: format!("{title}，门店实拍"),
        published_at: Some(now() - Duration::minutes(30)),
        ..RawSocial::default()
    };
    if !likes.is_empty() {
        raw.stats.insert("likes".into(), likes.into());
    }
    normalize_social(raw, platform).expect("valid social item")
}

pub fn market() -> MarketSnapshot {
    MarketSnapshot::new(
        Quote { last: 2_750.0, previous: 2_690.0 },
        7.18,
        Quote { last: 712.5, previous: 690.0 },
    )
}

fn boxed(lists: Vec<Vec<ContentItem>>, prefix: &str) -> Vec<Box<dyn ContentSource>> {
    lists
        .into_iter()
        .enumerate()
        .map(|(i, items)| {
            Box::new(FixedSource::new(format!("{prefix}-{i}"), items)) as Box<dyn ContentSource>
        })
        .collect()
}

/// Sources that never touch the network.
pub fn offline_sources(
    market: FixedMarket,
    news: Vec<Vec<ContentItem>>,
    social: Vec<Vec<ContentItem>>,
) -> Sources {
    Sources {
        market: Box::new(market),
        news: boxed(news, "news"),
        social: boxed(social, "social"),
    }
}
