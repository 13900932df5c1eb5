//! Eastmoney news list API for the brand's HK listing.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Deserialize;

use crate::domain::CST;
use crate::domain::content::{ContentItem, NewsChannel};
use crate::services::normalize::{RawNews, normalize_all, normalize_news};

use super::{ContentSource, HttpClient, SourceResult};

const LIST_URL: &str = "https://np-listapi.eastmoney.com/comm/web/getListInfo\
     ?client=web&type=1&mTypeAndCode=128.6181&pageSize=10&pageIndex=1";
const REFERER: &str = "https://quote.eastmoney.com/";

#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Option<ListData>,
}

#[derive(Debug, Deserialize)]
struct ListData {
    #[serde(default)]
    list: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    #[serde(default)]
    title: String,
    media_name: Option<String>,
    url: Option<String>,
    publish_time: Option<String>,
    ctime: Option<String>,
}

/// Parses `2026-01-25 10:30:00` or `2026-01-25T10:30:00+08:00` as CST.
pub fn parse_publish_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    let normalized = raw.trim().replace('T', " ");
    let local = normalized.split('+').next()?.trim();
    let naive = NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M"))
        .ok()?;
    naive.and_local_timezone(CST).single()
}

pub fn parse_list(body: &str) -> SourceResult<Vec<ContentItem>> {
    let response: ListResponse = serde_json::from_str(body)?;
    let raws = response
        .data
        .map(|d| d.list)
        .unwrap_or_default()
        .into_iter()
        .map(|a| {
            let stamp = a
                .publish_time
                .filter(|s| !s.is_empty())
                .or(a.ctime)
                .unwrap_or_default();
            RawNews {
                title: a.title,
                source: a.media_name.unwrap_or_default(),
                link: a.url.unwrap_or_default(),
                published_at: parse_publish_time(&stamp),
            }
        })
        .collect();
    Ok(normalize_all(raws, |raw| normalize_news(raw, NewsChannel::Eastmoney)))
}

pub struct EastmoneyNews;

impl ContentSource for EastmoneyNews {
    fn name(&self) -> &str {
        "eastmoney"
    }

    fn fetch(&self, http: &HttpClient) -> SourceResult<Vec<ContentItem>> {
        let body = http.get_text(LIST_URL, Some(REFERER))?;
        parse_list(&body)
    }
}
