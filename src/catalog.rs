//! Embedded catalog: the tracked stores and a handful of curated public
//! headlines that back the news feed when live sources are thin.

use chrono::NaiveDate;

use crate::domain::CST;
use crate::domain::content::{ContentItem, NewsChannel};
use crate::domain::store::StoreRecord;
use crate::domain::types::{StoreId, StoreName, TypeConstraintError};
use crate::services::normalize::{RawNews, normalize_all, normalize_news};
use crate::sources::fixed::FixedSource;

struct StoreSeed {
    id: &'static str,
    name: &'static str,
    city: &'static str,
    region: &'static str,
    mall: &'static str,
    type_tags: &'static [&'static str],
    fx_discount: Option<f64>,
    coupon_rate: Option<f64>,
    promo_desc: &'static str,
    promo_valid_until: Option<&'static str>,
    restock_note: Option<&'static str>,
    inventory_tags: &'static [&'static str],
    promo_source: &'static str,
}

fn owned(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

impl TryFrom<&StoreSeed> for StoreRecord {
    type Error = TypeConstraintError;

    fn try_from(seed: &StoreSeed) -> Result<Self, Self::Error> {
        let promo_valid_until = seed
            .promo_valid_until
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|e| TypeConstraintError::InvalidValue(format!("{d}: {e}")))
            })
            .transpose()?;

        Ok(StoreRecord {
            id: StoreId::new(seed.id)?,
            name: StoreName::new(seed.name)?,
            city: seed.city.to_string(),
            region: seed.region.to_string(),
            mall: seed.mall.to_string(),
            type_tags: owned(seed.type_tags),
            fx_discount: seed.fx_discount,
            coupon_rate: seed.coupon_rate,
            promo_desc: seed.promo_desc.to_string(),
            promo_valid_until,
            restock_note: seed.restock_note.map(str::to_string),
            inventory_tags: owned(seed.inventory_tags),
            promo_source: seed.promo_source.to_string(),
        })
    }
}

const NO_PUBLIC_PROMO: &str = "暂未整理到具体公开活动信息，建议以商场及品牌官方公示为准。";
const PENDING_SOURCE: &str = "待补充（官网 / 商场活动页面）。";
const PENDING_MALL_SOURCE: &str = "待补充商场与品牌官网链接。";

// Only Harbour City carries confirmed discount figures; the other stores
// are listed without numbers until a public source is available.
const STORES: [StoreSeed; 8] = [
    StoreSeed {
        id: "hk_harbour_city",
        name: "香港 海港城店 (Harbour City)",
        city: "香港",
        region: "香港",
        mall: "海港城 Harbour City",
        type_tags: &["老铺黄金专柜", "商场联名活动"],
        fx_discount: Some(0.91),
        coupon_rate: Some(0.05),
        promo_desc: "参与海港城「Always Rewarding」满额回赠：单笔满 HK$10,000 获 HK$500 购物券 \
                     （最高可叠加 20 张）；使用指定信用卡（如中银 / 汇丰）可享积分加倍。",
        promo_valid_until: Some("2026-02-28"),
        restock_note: Some(
            "春节前补货频率高，投资金条及足金古法饰品到货较集中，具体以门店当日库存为准。",
        ),
        inventory_tags: &["平安扣（现货）", "古法钻饰（足）"],
        promo_source: "线下活动卡片，建议同步核对海港城与发卡行官网。",
    },
    StoreSeed {
        id: "hk_times_square",
        name: "香港 时代广场店",
        city: "香港",
        region: "香港",
        mall: "铜锣湾 时代广场",
        type_tags: &["老铺黄金专柜"],
        fx_discount: None,
        coupon_rate: None,
        promo_desc: NO_PUBLIC_PROMO,
        promo_valid_until: None,
        restock_note: Some("SKP 系列联名款与日常投资金条可能不同步补货，建议提前电话确认。"),
        inventory_tags: &[],
        promo_source: PENDING_SOURCE,
    },
    StoreSeed {
        id: "macau_galaxy",
        name: "澳门 银河店",
        city: "澳门",
        region: "澳门",
        mall: "Galaxy澳门综合度假城",
        type_tags: &["老铺黄金专柜"],
        fx_discount: None,
        coupon_rate: None,
        promo_desc: NO_PUBLIC_PROMO,
        promo_valid_until: None,
        restock_note: Some("节假日前后补货相对集中，适合挑选大克重投资款。"),
        inventory_tags: &[],
        promo_source: PENDING_SOURCE,
    },
    StoreSeed {
        id: "cn_beijing_skp",
        name: "北京 SKP 老铺黄金",
        city: "北京",
        region: "内地SKP",
        mall: "北京 SKP",
        type_tags: &["老铺黄金旗舰", "高端消费场景"],
        fx_discount: None,
        coupon_rate: None,
        promo_desc: "根据公开报道，春节及大促期间排队盛况明显，具体价格与活动以 SKP 现场公示为准。",
        promo_valid_until: None,
        restock_note: Some(
            "新款古法工艺饰品与生肖限量款通常优先在北京 SKP 上市，排队号建议提前关注小程序。",
        ),
        inventory_tags: &[],
        promo_source: "媒体报道与 SKP 相关公开信息，需结合实际门店核实。",
    },
    StoreSeed {
        id: "cn_xian_skp",
        name: "西安 SKP 老铺黄金",
        city: "西安",
        region: "内地SKP",
        mall: "西安 SKP",
        type_tags: &["老铺黄金专柜"],
        fx_discount: None,
        coupon_rate: None,
        promo_desc: "报道提及 SKP 系列门店排队热度较高，具体折扣以当地 SKP 公示为准。",
        promo_valid_until: None,
        restock_note: Some("节日与周末客流集中，排号建议提早。"),
        inventory_tags: &[],
        promo_source: "媒体报道，待补充更细节的官方链接。",
    },
    StoreSeed {
        id: "cn_shenzhen_mixc",
        name: "深圳 万象城 老铺黄金",
        city: "深圳",
        region: "深圳",
        mall: "深圳 万象城",
        type_tags: &["老铺黄金专柜", "核心商圈"],
        fx_discount: None,
        coupon_rate: None,
        promo_desc: "暂无明确公开的统一活动信息，通常跟随商场联合促销与品牌档期。",
        promo_valid_until: None,
        restock_note: Some("深圳地区投资需求偏强，大克重金条和古法手镯补货频率相对较高。"),
        inventory_tags: &[],
        promo_source: PENDING_MALL_SOURCE,
    },
    StoreSeed {
        id: "cn_guangzhou_taikoo",
        name: "广州 太古汇 / 天环广场 老铺黄金",
        city: "广州",
        region: "广州",
        mall: "广州 核心商圈（如太古汇、天环广场等）",
        type_tags: &["老铺黄金专柜"],
        fx_discount: None,
        coupon_rate: None,
        promo_desc: "活动多与商场联动，具体折扣以当地场内公示为准。",
        promo_valid_until: None,
        restock_note: Some("工作日补货为主，节庆前夕古法饰品与婚庆套系补货集中。"),
        inventory_tags: &[],
        promo_source: PENDING_MALL_SOURCE,
    },
    StoreSeed {
        id: "cn_hainan_dutyfree",
        name: "海南 离岛免税区 老铺黄金",
        city: "海南",
        region: "海南",
        mall: "离岛免税购物城（以实际入驻点位为准）",
        type_tags: &["老铺黄金专柜", "离岛免税"],
        fx_discount: None,
        coupon_rate: None,
        promo_desc: "如有免税或满减政策，以免税城及品牌现场标牌为准。",
        promo_valid_until: None,
        restock_note: Some("节假日补货密集，投资金条与礼赠套装款式较丰富。"),
        inventory_tags: &[],
        promo_source: "待补充免税城与品牌官网链接。",
    },
];

/// (title, publisher, date, url)
const HEADLINES: [(&str, &str, &str, &str); 5] = [
    (
        "港股异动 | 老铺黄金涨近9%，SKP活动排队热度高涨，高端中式古法黄金仍持续破圈",
        "恒生指数通",
        "2026-01-26",
        "https://www.hstong.com/news/detail/26012610351175118",
    ),
    (
        "高端消费“转向” SKP老铺黄金排队盛况空前",
        "证券日报",
        "2026-01-25",
        "http://www.zqrb.cn/money/gold/2026-01-25/A1769213140881.html",
    ),
    (
        "老铺黄金年内二次提价，奢品之路能走多远？",
        "36氪",
        "2025-10-27",
        "https://m.36kr.com/p/3438958245056133",
    ),
    (
        "老铺黄金今起再次涨价，最高幅度超25%",
        "新浪财经",
        "2025-10-26",
        "https://finance.sina.com.cn/jjxw/2025-10-26/doc-infvexcq4760215.shtml",
    ),
    (
        "老鋪黃金投資者網站公告及通函（最近披露）",
        "老鋪黃金官方投資者網站",
        "2026-02-02",
        "http://hk.lphj.com/index.php?m=content&c=index&a=lists&catid=18",
    ),
];

/// All tracked stores, in catalog order.
pub fn stores() -> Result<Vec<StoreRecord>, TypeConstraintError> {
    STORES.iter().map(StoreRecord::try_from).collect()
}

/// Curated headlines as news items dated midnight CST of their
/// publication day.
pub fn curated_headlines() -> Vec<ContentItem> {
    let raws = HEADLINES
        .iter()
        .map(|(title, source, date, url)| RawNews {
            title: title.to_string(),
            source: source.to_string(),
            link: url.to_string(),
            published_at: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .and_then(|dt| dt.and_local_timezone(CST).single()),
        })
        .collect();
    normalize_all(raws, |raw| normalize_news(raw, NewsChannel::Curated))
}

/// The curated headlines as a source that never fails.
pub fn curated_source() -> FixedSource {
    FixedSource::new("curated", curated_headlines())
}
