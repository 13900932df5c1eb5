use crate::domain::content::Category;

/// Price-adjustment vocabulary. Checked first.
pub const KEYWORDS_ADJUST: [&str; 7] = ["调价", "涨价", "提价", "降价", "价格调整", "上调", "下调"];
/// Promotion vocabulary.
pub const KEYWORDS_PROMO: [&str; 9] = [
    "促销", "大促", "优惠", "折扣", "满减", "活动", "专场", "限时", "秒杀",
];
/// Corporate finance vocabulary, stored lower-case.
pub const KEYWORDS_FINANCE: [&str; 10] = [
    "财报", "业绩", "营收", "利润", "ipo", "股东", "股权", "分红", "回购", "评级",
];

/// Assigns exactly one [`Category`] to `text`.
///
/// Keyword sets are tested in the fixed order adjust, promo, finance; the
/// first set with any match wins regardless of how many keywords match.
pub fn classify(text: &str) -> Category {
    let lowered = text.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|kw| lowered.contains(kw));

    if matches(&KEYWORDS_ADJUST) {
        Category::Adjust
    } else if matches(&KEYWORDS_PROMO) {
        Category::Promo
    } else if matches(&KEYWORDS_FINANCE) {
        Category::Finance
    } else {
        Category::General
    }
}
