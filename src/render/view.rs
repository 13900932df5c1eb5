//! Typed page model handed to the dashboard template.
//!
//! Every value the template prints is computed here so the template stays a
//! plain layout. Optional values that are unknown at render time are filled
//! with [`PLACEHOLDER`].

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::domain::content::{Category, ContentItem};
use crate::domain::market::MarketSnapshot;
use crate::domain::store::{PricingConfig, StoreRecord};
use crate::services::pricing::{discount_breakdown, rank_by_discount, rank_by_simulated_price};
use crate::services::summarizer::take_chars;

pub const PLACEHOLDER: &str = "—";

const ALERT_ADJUST_CHARS: usize = 30;
const ALERT_NEWS_CHARS: usize = 28;
const PRICE_ALERT_ITEMS: usize = 3;
const CARD_ITEMS: usize = 2;
const OTHER_NEWS_ITEMS: usize = 8;
const GOLD_MOVE_ALERT_PCT: f64 = 2.0;
const RESTOCK_FALLBACK: &str = "待实地补充，以门店说法为准。";

/// Everything that varies between runs of the dashboard.
pub struct DashboardInput<'a> {
    pub now: DateTime<FixedOffset>,
    pub market: &'a MarketSnapshot,
    pub news: &'a [ContentItem],
    pub social: &'a [ContentItem],
    pub stores: &'a [StoreRecord],
    pub pricing: &'a PricingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DashboardView {
    pub generated_at: String,
    pub update_date: String,
    pub update_time: String,
    pub gold_spot: String,
    pub gold_note: String,
    pub gold_cny: String,
    pub usd_cny: String,
    pub hk_price: String,
    pub hk_change: String,
    pub hk_color: String,
    pub base_price_per_g: String,
    pub sim_weight_g: String,
    pub base_price_total: String,
    pub alert_bar_text: String,
    pub price_alert: Option<PriceAlertView>,
    pub adjust_card: Vec<NewsLine>,
    pub promo_card: Vec<NewsLine>,
    pub other_news: Vec<NewsLine>,
    pub social_posts: Vec<SocialPost>,
    pub discount_rank: Vec<DiscountRow>,
    pub sim_rank: Vec<SimRow>,
    pub stores: Vec<StoreCard>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceAlertView {
    /// Latest price adjustment headlines.
    Adjustments { items: Vec<NewsLine> },
    /// Large gold move without any adjustment headline.
    GoldMove { message: String, checked_at: String },
}

#[derive(Debug, Serialize, PartialEq)]
pub struct NewsLine {
    pub title: String,
    pub link: String,
    pub source: String,
    pub time: String,
    pub tag_label: &'static str,
    pub tag_class: &'static str,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SocialPost {
    pub platform: &'static str,
    pub platform_label: &'static str,
    pub time: String,
    pub tag_label: Option<&'static str>,
    pub tag_class: &'static str,
    pub title: String,
    pub link: String,
    pub preview: String,
    pub likes: Option<String>,
    pub source: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DiscountRow {
    pub name: String,
    pub city: String,
    pub mall: String,
    pub discount_pct: String,
    pub note: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SimRow {
    pub name: String,
    pub city: String,
    pub mall: String,
    pub final_price: String,
    pub discount_factor: String,
    pub breakdown: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StoreCard {
    pub name: String,
    pub region: String,
    pub city: String,
    pub mall: String,
    pub highlight: &'static str,
    pub promo_desc: String,
    pub promo_valid_until: Option<String>,
    pub restock_note: String,
    pub inventory_tags: Vec<String>,
    pub type_tags: Vec<String>,
    pub promo_source: String,
}

fn tag_for(category: Category) -> (&'static str, &'static str) {
    match category {
        Category::Adjust => ("⚡ 调价", "adjust"),
        Category::Promo => ("🎁 促销", "promo"),
        Category::Finance => ("📊 财务", "finance"),
        Category::General => ("📰 资讯", "general"),
    }
}

/// Formats `value` with `decimals` fraction digits and comma-grouped
/// thousands.
pub fn thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        grouped.insert(0, '-');
    }
    grouped
}

/// Human-friendly age of `at` relative to `now`.
pub fn rel_time(now: DateTime<FixedOffset>, at: Option<DateTime<FixedOffset>>) -> String {
    let Some(at) = at else {
        return PLACEHOLDER.to_string();
    };
    let minutes = (now - at).num_minutes();
    if minutes < 1 {
        return "刚刚".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}分钟前");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}小时前");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days}天前");
    }
    at.with_timezone(&now.timezone()).format("%m-%d").to_string()
}

fn stamp(at: Option<DateTime<FixedOffset>>) -> String {
    at.map(|t| t.format("%m-%d %H:%M").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn news_line(item: &ContentItem) -> NewsLine {
    let (tag_label, tag_class) = tag_for(item.category);
    NewsLine {
        title: item.title.to_string(),
        link: item.link.to_string(),
        source: item.source.to_string(),
        time: stamp(item.published_at),
        tag_label,
        tag_class,
    }
}

fn of_category(news: &[ContentItem], category: Category) -> impl Iterator<Item = &ContentItem> {
    news.iter().filter(move |n| n.category == category)
}

/// One-line banner: the latest adjustment, else the latest promotion, else
/// the latest headline, else a refresh notice.
pub fn alert_bar_text(news: &[ContentItem], now: DateTime<FixedOffset>) -> String {
    if let Some(adjust) = of_category(news, Category::Adjust).next() {
        return format!(
            "⚡ {} · 点击「价格情报」查看详情",
            take_chars(&adjust.title, ALERT_ADJUST_CHARS)
        );
    }
    if let Some(promo) = of_category(news, Category::Promo).next() {
        return format!(
            "🎁 {} · 点击「门店促销」查看详情",
            take_chars(&promo.title, ALERT_ADJUST_CHARS)
        );
    }
    if let Some(first) = news.first() {
        return format!("📰 最新：{}", take_chars(&first.title, ALERT_NEWS_CHARS));
    }
    format!("金价数据已更新 · {} CST", now.format("%Y-%m-%d %H:%M"))
}

pub fn price_alert(
    news: &[ContentItem],
    market: &MarketSnapshot,
    now: DateTime<FixedOffset>,
) -> Option<PriceAlertView> {
    let adjustments: Vec<NewsLine> = of_category(news, Category::Adjust)
        .take(PRICE_ALERT_ITEMS)
        .map(news_line)
        .collect();
    if !adjustments.is_empty() {
        return Some(PriceAlertView::Adjustments { items: adjustments });
    }

    let change = market.gold_change_pct();
    if change.abs() < GOLD_MOVE_ALERT_PCT {
        return None;
    }
    let message = if change > 0.0 {
        format!("金价今日上涨 {:.1}%，关注是否触发品牌调价。", change.abs())
    } else {
        format!("金价今日下跌 {:.1}%，暂无调价信号。", change.abs())
    };
    Some(PriceAlertView::GoldMove {
        message,
        checked_at: now.format("%Y-%m-%d %H:%M").to_string(),
    })
}

fn social_post(item: &ContentItem, now: DateTime<FixedOffset>) -> Option<SocialPost> {
    let platform = item.platform()?;
    let tag_label = match item.category {
        Category::Adjust | Category::Promo => Some(tag_for(item.category).0),
        Category::Finance | Category::General => None,
    };
    Some(SocialPost {
        platform: platform.as_str(),
        platform_label: platform.label(),
        time: rel_time(now, item.published_at),
        tag_label,
        tag_class: tag_for(item.category).1,
        title: item.title.to_string(),
        link: item.link.to_string(),
        preview: item.preview().unwrap_or_default().to_string(),
        likes: item.stat("likes").filter(|l| !l.is_empty()).map(str::to_string),
        source: item.source.to_string(),
    })
}

fn discount_note(store: &StoreRecord) -> String {
    let mut parts = Vec::new();
    if let Some(fx) = store.fx_discount.filter(|v| *v != 0.0) {
        parts.push(format!("汇率约 {:.0} 折", fx * 100.0));
    }
    if let Some(rate) = store.coupon_rate.filter(|v| *v != 0.0) {
        parts.push(format!("购物券再省约 {:.0}%", rate * 100.0));
    }
    if parts.is_empty() {
        "折扣参数来自公开信息，具体价格以门店现场公示为准。".to_string()
    } else {
        format!("{}，具体价格以门店现场公示为准。", parts.join(" + "))
    }
}

fn store_card(store: &StoreRecord) -> StoreCard {
    StoreCard {
        name: store.name.to_string(),
        region: store.region.clone(),
        city: store.city.clone(),
        mall: store.mall.clone(),
        highlight: store.highlight(),
        promo_desc: store.promo_desc.clone(),
        promo_valid_until: store.promo_valid_until.map(|d| d.format("%Y-%m-%d").to_string()),
        restock_note: store
            .restock_note
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| RESTOCK_FALLBACK.to_string()),
        inventory_tags: store.inventory_tags.clone(),
        type_tags: store.type_tags.clone(),
        promo_source: store.promo_source.clone(),
    }
}

fn or_placeholder(value: Option<String>) -> String {
    value.unwrap_or_else(|| PLACEHOLDER.to_string())
}

impl DashboardView {
    pub fn build(input: &DashboardInput<'_>) -> Self {
        let DashboardInput {
            now,
            market,
            news,
            social,
            stores,
            pricing,
        } = *input;

        let discount_rank = rank_by_discount(stores)
            .into_iter()
            .map(|s| DiscountRow {
                name: s.name.to_string(),
                city: s.city.clone(),
                mall: s.mall.clone(),
                discount_pct: format!("{:.1}", s.effective_discount() * 100.0),
                note: discount_note(s),
            })
            .collect();

        let sim_rank = rank_by_simulated_price(stores, pricing)
            .into_iter()
            .map(|s| SimRow {
                name: s.name.to_string(),
                city: s.city.clone(),
                mall: s.mall.clone(),
                final_price: format!("{:.0}", s.simulated_final_price(pricing)),
                discount_factor: format!("{:.3}", s.effective_discount()),
                breakdown: discount_breakdown(s),
            })
            .collect();

        DashboardView {
            generated_at: now.format("%Y-%m-%d %H:%M").to_string(),
            update_date: now.format("%Y-%m-%d").to_string(),
            update_time: now.format("%H:%M").to_string(),
            gold_spot: market
                .gold
                .map(|q| format!("${}", thousands(q.last, 0)))
                .unwrap_or_else(|| "获取中".to_string()),
            gold_note: market.gold_note().to_string(),
            gold_cny: or_placeholder(market.gold_cny_per_gram().map(|v| thousands(v, 0))),
            usd_cny: or_placeholder(market.usd_cny.map(|r| format!("{r:.4}"))),
            hk_price: or_placeholder(market.hk_share.map(|q| thousands(q.last, 1))),
            hk_change: or_placeholder(market.hk_share.map(|q| format!("{:+.2}", q.change_pct()))),
            hk_color: market.hk_color().to_string(),
            base_price_per_g: format!("{}", pricing.price_per_gram),
            sim_weight_g: format!("{}", pricing.sim_weight_g),
            base_price_total: format!("{:.0}", pricing.base_price()),
            alert_bar_text: alert_bar_text(news, now),
            price_alert: price_alert(news, market, now),
            adjust_card: of_category(news, Category::Adjust)
                .take(CARD_ITEMS)
                .map(news_line)
                .collect(),
            promo_card: of_category(news, Category::Promo)
                .take(CARD_ITEMS)
                .map(news_line)
                .collect(),
            other_news: news
                .iter()
                .filter(|n| matches!(n.category, Category::Finance | Category::General))
                .take(OTHER_NEWS_ITEMS)
                .map(news_line)
                .collect(),
            social_posts: social.iter().filter_map(|s| social_post(s, now)).collect(),
            discount_rank,
            sim_rank,
            stores: stores.iter().map(store_card).collect(),
        }
    }

    pub fn has_news(&self) -> bool {
        !(self.adjust_card.is_empty() && self.promo_card.is_empty() && self.other_news.is_empty())
    }
}
