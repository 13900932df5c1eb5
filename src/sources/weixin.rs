//! WeChat official-account articles through the Sogou WeChat index, where
//! brand announcements and reviewer posts surface.

use chrono::{DateTime, FixedOffset, NaiveDate};
use scraper::{Html, Selector};
use url::Url;

use crate::domain::CST;
use crate::domain::content::{ContentItem, SocialPlatform};
use crate::services::normalize::{RawSocial, normalize_all, normalize_social};
use crate::services::summarizer::take_chars;

use super::markup::{absolutize, first_match, selector, selectors, text_of};
use super::{ContentSource, HttpClient, SourceResult};

const SEARCH_URL: &str = "https://weixin.sogou.com/weixin";
const REFERER: &str = "https://weixin.sogou.com/";

/// Parses a leading `YYYY-MM-DD` as midnight CST.
pub fn parse_article_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let head = take_chars(raw.trim(), 10);
    NaiveDate::parse_from_str(&head, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(CST)
        .single()
}

pub fn parse_articles(html: &str, max_items: usize) -> SourceResult<Vec<ContentItem>> {
    let document = Html::parse_document(html);
    let article_sel = selector(".news-box .news-list li")?;
    let title_sel = selector("h3 a")?;
    let preview_sel = selector("p.txt-info")?;
    let account_sel = selector(".account")?;
    let time_sels = selectors(&[".s-p ~ span", "span.s-p"])?;

    let raws = document
        .select(&article_sel)
        .take(max_items)
        .filter_map(|li| {
            let anchor = li.select(&title_sel).next()?;
            let text = |sel: &Selector| li.select(sel).next().map(text_of).unwrap_or_default();
            Some(RawSocial {
                title: text_of(anchor),
                preview: text(&preview_sel),
                source: text(&account_sel),
                link: absolutize(REFERER, anchor.value().attr("href").unwrap_or_default()),
                published_at: first_match(li, &time_sels)
                    .and_then(|t| parse_article_date(&text_of(t))),
                ..RawSocial::default()
            })
        })
        .collect();
    Ok(normalize_all(raws, |raw| normalize_social(raw, SocialPlatform::Weixin)))
}

pub struct SogouWeixin {
    pub keyword: String,
    pub max_items: usize,
}

impl ContentSource for SogouWeixin {
    fn name(&self) -> &str {
        "weixin"
    }

    fn fetch(&self, http: &HttpClient) -> SourceResult<Vec<ContentItem>> {
        let url = Url::parse_with_params(
            SEARCH_URL,
            &[("type", "2"), ("query", self.keyword.as_str()), ("ie", "utf8")],
        )?;
        let body = http.get_text(url.as_str(), Some(REFERER))?;
        parse_articles(&body, self.max_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const FIXTURE: &str = r#"
        <div class="news-box"><ul class="news-list">
          <li>
            <h3><a href="/link?url=abc">老铺黄金春节限时活动</a></h3>
            <p class="txt-info">多家门店推出专场</p>
            <div class="txt-box"><a class="account">金价观察</a><span class="s-p">2026-01-20</span></div>
          </li>
          <li>
            <h3><a href="https://mp.weixin.qq.com/s/xyz">古法金怎么挑</a></h3>
          </li>
          <li><p>no title</p></li>
        </ul></div>"#;

    #[test]
    fn parses_article_list() {
        let items = parse_articles(FIXTURE, 10).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "老铺黄金春节限时活动");
        assert_eq!(items[0].source, "金价观察");
        assert_eq!(items[0].link.as_str(), "https://weixin.sogou.com/link?url=abc");
        assert_eq!(items[0].preview(), Some("多家门店推出专场"));
        assert_eq!(items[0].published_at.unwrap().day(), 20);
        assert_eq!(items[1].source, "微信公众号");
        assert_eq!(items[1].preview(), Some(""));
        assert!(items[1].published_at.is_none());
    }

    #[test]
    fn parses_leading_date() {
        let date = parse_article_date("2026-01-20 12:00").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2026, 1, 20));
        assert!(parse_article_date("3天前").is_none());
    }
}
