//! Weibo keyword search. Works without a login cookie, with limited results.

use scraper::Html;
use url::Url;

use crate::domain::content::{ContentItem, SocialPlatform};
use crate::services::normalize::{RawSocial, normalize_all, normalize_social};
use crate::services::summarizer::{take_chars, truncate_chars};

use super::markup::{absolutize, selector, text_joined, text_of};
use super::{ContentSource, HttpClient, SourceResult};

const SEARCH_URL: &str = "https://s.weibo.com/weibo";
const REFERER: &str = "https://weibo.com/";
const TITLE_CHARS: usize = 40;
const PREVIEW_CHARS: usize = 120;

pub fn parse_cards(html: &str, max_items: usize) -> SourceResult<Vec<ContentItem>> {
    let document = Html::parse_document(html);
    let card_sel = selector(".card-wrap")?;
    let text_sel = selector(".txt")?;
    let from_sel = selector(".from a")?;
    let name_sel = selector(".name")?;

    let raws = document
        .select(&card_sel)
        .take(max_items)
        .filter_map(|card| {
            let content = text_joined(card.select(&text_sel).next()?, " ");
            let link = card
                .select(&from_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(|href| absolutize(SEARCH_URL, href))
                .unwrap_or_default();
            let author = card
                .select(&name_sel)
                .next()
                .map(text_of)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "微博用户".to_string());

            Some(RawSocial {
                title: truncate_chars(&content, TITLE_CHARS),
                preview: take_chars(&content, PREVIEW_CHARS),
                source: format!("@{author}"),
                link,
                ..RawSocial::default()
            })
        })
        .collect();
    Ok(normalize_all(raws, |raw| normalize_social(raw, SocialPlatform::Weibo)))
}

pub struct WeiboSearch {
    pub keyword: String,
    pub max_items: usize,
}

impl ContentSource for WeiboSearch {
    fn name(&self) -> &str {
        "weibo"
    }

    fn fetch(&self, http: &HttpClient) -> SourceResult<Vec<ContentItem>> {
        let url = Url::parse_with_params(
            SEARCH_URL,
            &[
                ("q", self.keyword.as_str()),
                ("typeall", "1"),
                ("suball", "1"),
                ("Refer", "g"),
            ],
        )?;
        let body = http.get_text(url.as_str(), Some(REFERER))?;
        parse_cards(&body, self.max_items)
    }
}
