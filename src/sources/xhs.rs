//! Xiaohongshu notes.
//!
//! The search page is client-rendered, so notes are read from HTML produced
//! by a headless rendering service. When that yields nothing, a Sogou web
//! search restricted to Xiaohongshu mentions stands in.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::content::{ContentItem, SocialPlatform};
use crate::services::normalize::{RawSocial, normalize_all, normalize_social};
use crate::services::popularity::parse_likes;
use crate::services::summarizer::smart_summary;

use super::browserless::{BrowserlessClient, BrowserlessSettings};
use super::http::DESKTOP_USER_AGENT;
use super::markup::{absolutize, first_match, selector, selectors, text_of};
use super::{ContentSource, HttpClient, SourceResult};

const SITE: &str = "https://www.xiaohongshu.com";
const SEARCH_URL: &str = "https://www.xiaohongshu.com/search_result";
const SOGOU_URL: &str = "https://www.sogou.com/web";
const SOGOU_REFERER: &str = "https://www.sogou.com/";

/// Notes kept after popularity ranking.
pub const TOP_NOTES: usize = 6;
const PREVIEW_CHARS: usize = 50;
const RELEVANCE_TERMS: [&str; 4] = ["老铺黄金", "老铺", "黄金", "古法金"];
const FALLBACK_TERM: &str = "老铺黄金";
const FALLBACK_SOURCE: &str = "小红书·搜狗索引";

const CARD_CSS: [&str; 6] = [
    "section.note-item",
    "div.note-item",
    "[class*='NoteItem']",
    ".feeds-page .note-item",
    ".search-feed-item",
    "[data-note-id]",
];

fn first_text(card: ElementRef<'_>, candidates: &[Selector]) -> String {
    first_match(card, candidates).map(text_of).unwrap_or_default()
}

/// Extracts notes from a rendered search page.
///
/// The first card selector that matches anything defines the card set. At
/// most `max_items * 4` cards are scanned and `max_items` relevant notes
/// collected; the result is ordered by like count and cut to
/// [`TOP_NOTES`].
pub fn parse_notes(html: &str, max_items: usize) -> SourceResult<Vec<ContentItem>> {
    let document = Html::parse_document(html);
    let card_sels = selectors(&CARD_CSS)?;
    let title_sels = selectors(&["span.title", ".footer span.title", "[class*='title']"])?;
    let link_sels = selectors(&["a[href*='/explore/']", "a"])?;
    let author_sels = selectors(&[".author span", ".nickname"])?;
    let like_sels = selectors(&[".like-wrapper .count", "[class*='like'] [class*='count']"])?;

    let cards: Vec<ElementRef<'_>> = card_sels
        .iter()
        .map(|sel| document.select(sel).collect::<Vec<_>>())
        .find(|found| !found.is_empty())
        .unwrap_or_default();

    let mut raws = Vec::new();
    for card in cards.into_iter().take(max_items * 4) {
        if raws.len() >= max_items {
            break;
        }
        let title = first_text(card, &title_sels);
        if title.is_empty() {
            continue;
        }
        let author = first_text(card, &author_sels);
        let combined = format!("{title} {author}");
        if !RELEVANCE_TERMS.iter().any(|t| combined.contains(t)) {
            continue;
        }

        let link = first_match(card, &link_sels)
            .and_then(|a| a.value().attr("href"))
            .map(|href| absolutize(SITE, href))
            .unwrap_or_default();
        let likes = first_text(card, &like_sels);
        let mut stats = BTreeMap::new();
        if !likes.is_empty() {
            stats.insert("likes".to_string(), likes);
        }

        raws.push(RawSocial {
            preview: smart_summary(&title, PREVIEW_CHARS),
            title,
            link,
            stats,
            ..RawSocial::default()
        });
    }

    let mut items = normalize_all(raws, |raw| normalize_social(raw, SocialPlatform::Xhs));
    items.sort_by_key(|item| std::cmp::Reverse(parse_likes(item.stat("likes").unwrap_or(""))));
    items.truncate(TOP_NOTES);
    Ok(items)
}

/// Extracts Xiaohongshu mentions from a Sogou web-search page.
pub fn parse_sogou_results(html: &str, max_items: usize) -> SourceResult<Vec<ContentItem>> {
    let document = Html::parse_document(html);
    let result_sel = selector(".vrwrap")?;
    let link_sels = selectors(&["h3 a", "a[href]"])?;
    let snippet_sels = selectors(&[".str_info", "p"])?;

    let raws = document
        .select(&result_sel)
        .filter_map(|result| {
            let anchor = first_match(result, &link_sels)?;
            let title = text_of(anchor);
            let snippet = first_text(result, &snippet_sels);
            if title.is_empty() || !(title.contains(FALLBACK_TERM) || snippet.contains(FALLBACK_TERM)) {
                return None;
            }
            let mut preview = smart_summary(&snippet, PREVIEW_CHARS);
            if preview.is_empty() {
                preview = smart_summary(&title, PREVIEW_CHARS);
            }
            Some(RawSocial {
                link: absolutize(SOGOU_REFERER, anchor.value().attr("href").unwrap_or_default()),
                source: FALLBACK_SOURCE.to_string(),
                title,
                preview,
                ..RawSocial::default()
            })
        })
        .take(max_items)
        .collect();
    Ok(normalize_all(raws, |raw| normalize_social(raw, SocialPlatform::Xhs)))
}

/// Note search rendered through a Browserless-compatible service.
pub struct XiaohongshuSearch {
    pub keyword: String,
    pub max_items: usize,
    pub browserless: BrowserlessSettings,
}

impl XiaohongshuSearch {
    pub fn search_url(&self) -> SourceResult<Url> {
        Ok(Url::parse_with_params(
            SEARCH_URL,
            &[
                ("keyword", self.keyword.as_str()),
                ("type", "51"),
                ("source", "web_search_result_notes"),
            ],
        )?)
    }
}

impl ContentSource for XiaohongshuSearch {
    fn name(&self) -> &str {
        "xiaohongshu"
    }

    fn fetch(&self, _http: &HttpClient) -> SourceResult<Vec<ContentItem>> {
        let client = BrowserlessClient::from_settings(&self.browserless)?;
        let html = client.content(self.search_url()?.as_str())?;
        parse_notes(&html, self.max_items)
    }
}

/// Sogou web search for Xiaohongshu mentions of the brand.
pub struct SogouXhs {
    pub query: String,
    pub max_items: usize,
}

impl ContentSource for SogouXhs {
    fn name(&self) -> &str {
        "xiaohongshu-sogou"
    }

    fn fetch(&self, http: &HttpClient) -> SourceResult<Vec<ContentItem>> {
        let url = Url::parse_with_params(SOGOU_URL, &[("query", self.query.as_str()), ("num", "10")])?;
        let body = http.get_text_as(url.as_str(), Some(SOGOU_REFERER), Some(DESKTOP_USER_AGENT))?;
        parse_sogou_results(&body, self.max_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceError;
    use std::time::Duration;

    fn note(title: &str, author: &str, likes: &str, href: &str) -> String {
        format!(
            r#"<section class="note-item">
                 <a href="{href}"><img/></a>
                 <div class="footer"><span class="title">{title}</span>
                   <div class="author"><span>{author}</span></div>
                   <span class="like-wrapper"><span class="count">{likes}</span></span>
                 </div>
               </section>"#
        )
    }

    #[test]
    fn ranks_relevant_notes_by_likes() {
        let html = [
            note("老铺黄金葫芦吊坠开箱", "小金", "356", "/explore/aaa"),
            note("今日穿搭分享", "路人", "9万", "/explore/bbb"),
            note("古法金手镯对比", "金饰控", "1.2万", "/explore/ccc"),
            note("海港城买金攻略", "老铺黄金粉丝", "", "https://www.xiaohongshu.com/explore/ddd"),
        ]
        .concat();
        let items = parse_notes(&html, 10).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "古法金手镯对比");
        assert_eq!(items[0].stat("likes"), Some("1.2万"));
        assert_eq!(items[0].link.as_str(), "https://www.xiaohongshu.com/explore/ccc");
        assert_eq!(items[1].title, "老铺黄金葫芦吊坠开箱");
        assert_eq!(items[2].stat("likes"), None);
        assert!(items.iter().all(|i| i.source == "小红书"));
        assert_eq!(items[1].preview(), Some("老铺黄金葫芦吊坠开箱"));
    }

    #[test]
    fn keeps_at_most_six_notes() {
        let html: String = (0..10)
            .map(|i| note(&format!("老铺黄金笔记{i}"), "", &i.to_string(), "/explore/x"))
            .collect();
        let items = parse_notes(&html, 10).unwrap();

        assert_eq!(items.len(), TOP_NOTES);
        assert_eq!(items[0].stat("likes"), Some("9"));
    }

    #[test]
    fn page_without_cards_is_empty() {
        assert!(parse_notes("<div class='login-container'></div>", 10).unwrap().is_empty());
    }

    #[test]
    fn fallback_requires_brand_mention() {
        let html = r#"
            <div class="vrwrap"><h3><a href="/link?url=1">小红书上的老铺黄金测评 - 小红书</a></h3>
              <p class="str_info">2025年12月3日 - 博主实测三家门店价格差异...</p></div>
            <div class="vrwrap"><h3><a href="/link?url=2">黄金首饰怎么选</a></h3>
              <p class="str_info">与品牌无关的内容</p></div>
            <div class="vrwrap"><h3><a href="https://example.com/x">门店探访</a></h3>
              <p>老铺黄金北京SKP店排队</p></div>
            <div class="vrwrap"><h3><a href="/link?url=4">老铺黄金</a></h3></div>"#;
        let items = parse_sogou_results(html, 6).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].link.as_str(), "https://www.sogou.com/link?url=1");
        assert_eq!(items[0].preview(), Some("博主实测三家门店价格差异"));
        assert_eq!(items[1].preview(), Some("老铺黄金北京SKP店排队"));
        assert_eq!(items[2].preview(), Some("老铺黄金"));
        assert!(items.iter().all(|i| i.source == "小红书·搜狗索引"));
    }

    #[test]
    fn unconfigured_renderer_is_an_error() {
        let search = XiaohongshuSearch {
            keyword: "老铺黄金".into(),
            max_items: 10,
            browserless: BrowserlessSettings::default(),
        };
        let http = HttpClient::new(Duration::from_secs(1)).unwrap();
        assert!(matches!(search.fetch(&http), Err(SourceError::NotConfigured(_))));
        assert!(search.search_url().unwrap().as_str().contains("type=51"));
    }
}
