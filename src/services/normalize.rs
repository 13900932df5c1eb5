//! Conversion of raw adapter output into uniform [`ContentItem`] records.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};

use crate::domain::content::{ContentItem, ContentKind, NewsChannel, SocialPlatform};
use crate::domain::types::{ContentLink, ContentTitle, SourceName, TypeConstraintError};
use crate::services::classifier::classify;

/// A news headline as scraped, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawNews {
    pub title: String,
    pub source: String,
    pub link: String,
    pub published_at: Option<DateTime<FixedOffset>>,
}

/// A social post as scraped, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawSocial {
    pub title: String,
    pub preview: String,
    pub source: String,
    pub link: String,
    pub published_at: Option<DateTime<FixedOffset>>,
    pub stats: BTreeMap<String, String>,
}

fn source_or(raw: String, fallback: &str) -> Result<SourceName, TypeConstraintError> {
    SourceName::new(raw).or_else(|_| SourceName::new(fallback))
}

/// Builds a news record; the category is derived from the title.
///
/// Fails only when the title is blank. Unparseable links degrade to
/// "no clickable origin".
pub fn normalize_news(
    raw: RawNews,
    channel: NewsChannel,
) -> Result<ContentItem, TypeConstraintError> {
    let title = ContentTitle::new(raw.title)?;
    let category = classify(&title);
    Ok(ContentItem {
        category,
        source: source_or(raw.source, channel.default_source())?,
        link: ContentLink::lenient(raw.link),
        published_at: raw.published_at,
        title,
        kind: ContentKind::News { channel },
    })
}

/// Builds a social record; the category is derived from title and preview.
pub fn normalize_social(
    raw: RawSocial,
    platform: SocialPlatform,
) -> Result<ContentItem, TypeConstraintError> {
    let title = ContentTitle::new(raw.title)?;
    let preview = raw.preview.trim().to_string();
    let category = classify(&format!("{title} {preview}"));
    Ok(ContentItem {
        category,
        source: source_or(raw.source, platform.default_source())?,
        link: ContentLink::lenient(raw.link),
        published_at: raw.published_at,
        title,
        kind: ContentKind::Social {
            platform,
            preview,
            stats: raw.stats,
        },
    })
}

/// Normalizes a batch, dropping records that fail validation.
pub fn normalize_all<R, F>(raws: Vec<R>, mut normalize: F) -> Vec<ContentItem>
where
    F: FnMut(R) -> Result<ContentItem, TypeConstraintError>,
{
    raws.into_iter()
        .filter_map(|raw| match normalize(raw) {
            Ok(item) => Some(item),
            Err(e) => {
                log::debug!("Dropping content item: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::Category;

    #[test]
    fn news_is_classified_from_title() {
        let item = normalize_news(
            RawNews {
                title: " 老铺黄金今起再次涨价 ".into(),
                source: "".into(),
                link: "https://finance.sina.com.cn/jjxw/doc.shtml".into(),
                published_at: None,
            },
            NewsChannel::Sina,
        )
        .unwrap();

        assert_eq!(item.title, "老铺黄金今起再次涨价");
        assert_eq!(item.source, "新浪财经");
        assert_eq!(item.category, Category::Adjust);
        assert!(item.is_news());
    }

    #[test]
    fn social_category_uses_preview() {
        let item = normalize_social(
            RawSocial {
                title: "今天去了海港城".into(),
                preview: "满减叠加购物券很划算".into(),
                ..RawSocial::default()
            },
            SocialPlatform::Weibo,
        )
        .unwrap();

        assert_eq!(item.category, Category::Promo);
        assert_eq!(item.source, "@微博用户");
        assert!(item.link.is_empty());
        assert_eq!(item.platform(), Some(SocialPlatform::Weibo));
    }

    #[test]
    fn blank_titles_are_dropped() {
        let items = normalize_all(
            vec![
                RawNews {
                    title: "  ".into(),
                    ..RawNews::default()
                },
                RawNews {
                    title: "老铺黄金业绩预告".into(),
                    link: "not a link".into(),
                    ..RawNews::default()
                },
            ],
            |raw| normalize_news(raw, NewsChannel::Eastmoney),
        );

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, Category::Finance);
        assert!(items[0].link.is_empty());
    }
}
