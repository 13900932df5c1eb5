use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ContentLink, ContentTitle, SourceName, TypeConstraintError};

/// Coarse keyword-derived topic of a piece of text.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Adjust,
    Promo,
    Finance,
    General,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Adjust,
        Category::Promo,
        Category::Finance,
        Category::General,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adjust => "adjust",
            Self::Promo => "promo",
            Self::Finance => "finance",
            Self::General => "general",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "adjust" => Ok(Self::Adjust),
            "promo" => Ok(Self::Promo),
            "finance" => Ok(Self::Finance),
            "general" => Ok(Self::General),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "category: {other}"
            ))),
        }
    }
}

/// Origin of a news item.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NewsChannel {
    Yahoo,
    Eastmoney,
    Sina,
    Curated,
}

impl NewsChannel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Eastmoney => "eastmoney",
            Self::Sina => "sina",
            Self::Curated => "curated",
        }
    }

    /// Attribution used when the upstream payload carries no publisher.
    pub const fn default_source(self) -> &'static str {
        match self {
            Self::Yahoo => "Yahoo Finance",
            Self::Eastmoney => "东方财富",
            Self::Sina => "新浪财经",
            Self::Curated => "公开报道",
        }
    }
}

/// Origin of a social item.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    Xhs,
    Weibo,
    Weixin,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 3] = [
        SocialPlatform::Xhs,
        SocialPlatform::Weibo,
        SocialPlatform::Weixin,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xhs => "xhs",
            Self::Weibo => "weibo",
            Self::Weixin => "weixin",
        }
    }

    /// Display label shown next to each post.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Xhs => "📕 小红书",
            Self::Weibo => "🔵 微博",
            Self::Weixin => "💚 微信",
        }
    }

    pub const fn default_source(self) -> &'static str {
        match self {
            Self::Xhs => "小红书",
            Self::Weibo => "@微博用户",
            Self::Weixin => "微信公众号",
        }
    }
}

/// Kind-specific part of a [`ContentItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentKind {
    News {
        channel: NewsChannel,
    },
    Social {
        platform: SocialPlatform,
        /// Bounded-length body text.
        preview: String,
        /// Metric name to raw display string, e.g. `likes -> "8.9万"`.
        stats: BTreeMap<String, String>,
    },
}

/// A normalized news or social record.
///
/// The shared base (title, source, link, timestamp, category) is identical
/// for both kinds; the discriminant lives in [`ContentKind`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    pub title: ContentTitle,
    pub source: SourceName,
    pub link: ContentLink,
    /// `None` means unknown time; such items sort last.
    pub published_at: Option<DateTime<FixedOffset>>,
    pub category: Category,
    #[serde(flatten)]
    pub kind: ContentKind,
}

impl ContentItem {
    pub fn is_news(&self) -> bool {
        matches!(self.kind, ContentKind::News { .. })
    }

    pub fn platform(&self) -> Option<SocialPlatform> {
        match &self.kind {
            ContentKind::Social { platform, .. } => Some(*platform),
            ContentKind::News { .. } => None,
        }
    }

    pub fn preview(&self) -> Option<&str> {
        match &self.kind {
            ContentKind::Social { preview, .. } => Some(preview.as_str()),
            ContentKind::News { .. } => None,
        }
    }

    pub fn stat(&self, name: &str) -> Option<&str> {
        match &self.kind {
            ContentKind::Social { stats, .. } => stats.get(name).map(String::as_str),
            ContentKind::News { .. } => None,
        }
    }
}
