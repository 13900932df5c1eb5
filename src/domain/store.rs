use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{StoreId, StoreName};

/// Fixed reference scenario used to compare stores by an estimated final
/// price. Passed explicitly to the discount model and the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate)]
pub struct PricingConfig {
    /// Reference mainland list price in CNY per gram.
    #[validate(range(exclusive_min = 0.0))]
    pub price_per_gram: f64,
    /// Simulated purchase weight in grams.
    #[validate(range(exclusive_min = 0.0))]
    pub sim_weight_g: f64,
}

impl PricingConfig {
    /// Undiscounted price of the simulated purchase.
    pub fn base_price(&self) -> f64 {
        self.price_per_gram * self.sim_weight_g
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_per_gram: 1450.0,
            sim_weight_g: 50.0,
        }
    }
}

/// A retail location of the brand.
///
/// Records are built once from the embedded catalog and never mutated
/// during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreRecord {
    pub id: StoreId,
    pub name: StoreName,
    pub city: String,
    /// 香港 / 澳门 / 内地SKP / 深圳 / 广州 / 海南 ...
    pub region: String,
    pub mall: String,
    pub type_tags: Vec<String>,
    /// Exchange-rate discount, e.g. `0.91` for roughly 9折. `None` when unknown.
    pub fx_discount: Option<f64>,
    /// Coupon or spend-and-get rebate expressed as a rate, e.g. `0.05`.
    pub coupon_rate: Option<f64>,
    pub promo_desc: String,
    pub promo_valid_until: Option<NaiveDate>,
    pub restock_note: Option<String>,
    pub inventory_tags: Vec<String>,
    pub promo_source: String,
}

impl StoreRecord {
    /// Present, non-zero discount components. A zero value carries no
    /// information and is treated like an absent one.
    fn fx_component(&self) -> Option<f64> {
        self.fx_discount.filter(|v| *v != 0.0)
    }

    fn coupon_component(&self) -> Option<f64> {
        self.coupon_rate.filter(|v| *v != 0.0)
    }

    /// Whether at least one discount component is known.
    pub fn has_discount_data(&self) -> bool {
        self.fx_discount.is_some() || self.coupon_rate.is_some()
    }

    /// Product of all known discount components relative to the mainland
    /// list price. Absent components contribute `1.0`; values are not
    /// clamped.
    pub fn effective_discount(&self) -> f64 {
        let mut discount = 1.0;
        if let Some(fx) = self.fx_component() {
            discount *= fx;
        }
        if let Some(rate) = self.coupon_component() {
            discount *= 1.0 - rate;
        }
        discount
    }

    /// Estimated final price of the reference purchase at this store.
    pub fn simulated_final_price(&self, pricing: &PricingConfig) -> f64 {
        pricing.base_price() * self.effective_discount()
    }

    /// Short badge describing the kind of location.
    pub fn highlight(&self) -> &'static str {
        if matches!(self.region.as_str(), "香港" | "澳门") {
            "港澳线下门店"
        } else if self.mall.contains("SKP") {
            "SKP 高端场景"
        } else {
            "核心商圈"
        }
    }
}
