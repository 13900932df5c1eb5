//! Sina Finance news search.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use scraper::Html;
use url::Url;

use crate::domain::CST;
use crate::domain::content::{ContentItem, NewsChannel};
use crate::services::normalize::{RawNews, normalize_all, normalize_news};
use crate::services::summarizer::take_chars;

use super::markup::{absolutize, first_match, selector, selectors, text_of};
use super::{ContentSource, HttpClient, SourceResult};

const SEARCH_URL: &str = "https://search.sina.com.cn/";
const MAX_ITEMS: usize = 10;

/// Parses `2026年01月25日10:30` (any trailing text ignored) as CST.
pub fn parse_result_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    let head = take_chars(raw.trim(), 16);
    NaiveDateTime::parse_from_str(&head, "%Y年%m月%d日%H:%M")
        .ok()?
        .and_local_timezone(CST)
        .single()
}

pub fn parse_results(html: &str) -> SourceResult<Vec<ContentItem>> {
    let document = Html::parse_document(html);
    let result_sel = selector(".box-result")?;
    let link_sels = selectors(&["h2 a", "a"])?;
    let time_sel = selector(".fgray_time")?;

    let raws = document
        .select(&result_sel)
        .take(MAX_ITEMS)
        .filter_map(|div| {
            let anchor = first_match(div, &link_sels)?;
            let published_at = div
                .select(&time_sel)
                .next()
                .and_then(|t| parse_result_time(&text_of(t)));
            Some(RawNews {
                title: text_of(anchor),
                source: NewsChannel::Sina.default_source().to_string(),
                link: absolutize(SEARCH_URL, anchor.value().attr("href").unwrap_or_default()),
                published_at,
            })
        })
        .collect();
    Ok(normalize_all(raws, |raw| normalize_news(raw, NewsChannel::Sina)))
}

pub struct SinaNews {
    pub keyword: String,
}

impl ContentSource for SinaNews {
    fn name(&self) -> &str {
        "sina"
    }

    fn fetch(&self, http: &HttpClient) -> SourceResult<Vec<ContentItem>> {
        let url = Url::parse_with_params(
            SEARCH_URL,
            &[
                ("q", self.keyword.as_str()),
                ("range", "all"),
                ("c", "news"),
                ("sort", "time"),
                ("num", "10"),
            ],
        )?;
        let body = http.get_text(url.as_str(), None)?;
        parse_results(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const FIXTURE: &str = r#"
        <html><body>
          <div class="box-result">
            <h2><a href="https://finance.sina.com.cn/jjxw/2025-10-26/doc-1.shtml">老铺黄金今起再次<font>涨价</font></a></h2>
            <span class="fgray_time">2025年10月26日09:15 新浪财经</span>
          </div>
          <div class="box-result">
            <a href="/doc-2.shtml">老铺黄金门店排队</a>
          </div>
          <div class="box-result"><p>no link here</p></div>
        </body></html>"#;

    #[test]
    fn parses_search_results() {
        let items = parse_results(FIXTURE).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "老铺黄金今起再次涨价");
        assert_eq!(items[0].published_at.unwrap().day(), 26);
        assert_eq!(items[1].link.as_str(), "https://search.sina.com.cn/doc-2.shtml");
        assert!(items[1].published_at.is_none());
        assert!(items.iter().all(|i| i.source == "新浪财经"));
    }

    #[test]
    fn rejects_unknown_time_layout() {
        assert!(parse_result_time("3小时前").is_none());
    }
}
