//! Machine-readable companion of the dashboard (`data.json`).

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::domain::store::{PricingConfig, StoreRecord};

#[derive(Debug, Serialize)]
pub struct StoreExport<'a> {
    #[serde(flatten)]
    pub store: &'a StoreRecord,
    pub simulated_final_price: f64,
}

#[derive(Debug, Serialize)]
pub struct DataExport<'a> {
    pub generated_at: String,
    pub base_price_per_g: f64,
    pub sim_weight_g: f64,
    pub stores: Vec<StoreExport<'a>>,
}

impl<'a> DataExport<'a> {
    /// Every store in catalog order with its simulated final price.
    pub fn new(
        now: DateTime<FixedOffset>,
        stores: &'a [StoreRecord],
        pricing: &PricingConfig,
    ) -> Self {
        Self {
            generated_at: now.format("%Y-%m-%d %H:%M").to_string(),
            base_price_per_g: pricing.price_per_gram,
            sim_weight_g: pricing.sim_weight_g,
            stores: stores
                .iter()
                .map(|store| StoreExport {
                    store,
                    simulated_final_price: store.simulated_final_price(pricing),
                })
                .collect(),
        }
    }

    /// Pretty-printed UTF-8 JSON; non-ASCII text is written as is.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CST;
    use crate::domain::store::tests::store;
    use chrono::TimeZone;
    use serde_json::Value;

    #[test]
    fn flattens_store_fields() {
        let stores = vec![store("hk", Some(0.91), None), store("bj", None, None)];
        let now = CST.with_ymd_and_hms(2026, 1, 26, 18, 5, 0).unwrap();
        let json = DataExport::new(now, &stores, &PricingConfig::default())
            .to_json()
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["generated_at"], "2026-01-26 18:05");
        assert_eq!(value["base_price_per_g"], 1450.0);
        assert_eq!(value["stores"][0]["id"], "hk");
        assert_eq!(value["stores"][0]["fx_discount"], 0.91);
        assert!(value["stores"][0]["coupon_rate"].is_null());
        assert_eq!(value["stores"][1]["simulated_final_price"], 72500.0);
        assert!(json.contains("香港"));
    }
}
