use crate::domain::store::{PricingConfig, StoreRecord};

/// Stores with at least one known discount component, best deal first.
pub fn rank_by_discount(stores: &[StoreRecord]) -> Vec<&StoreRecord> {
    let mut ranked: Vec<&StoreRecord> = stores.iter().filter(|s| s.has_discount_data()).collect();
    ranked.sort_by(|a, b| a.effective_discount().total_cmp(&b.effective_discount()));
    ranked
}

/// Every store ordered by the simulated final price, cheapest first. Stores
/// without discount data rank at the undiscounted price.
pub fn rank_by_simulated_price<'a>(
    stores: &'a [StoreRecord],
    pricing: &PricingConfig,
) -> Vec<&'a StoreRecord> {
    let mut ranked: Vec<&StoreRecord> = stores.iter().collect();
    ranked.sort_by(|a, b| {
        a.simulated_final_price(pricing)
            .total_cmp(&b.simulated_final_price(pricing))
    });
    ranked
}

/// Human-readable breakdown of the discount components of `store`.
pub fn discount_breakdown(store: &StoreRecord) -> Vec<String> {
    let mut parts = Vec::new();
    if let Some(fx) = store.fx_discount.filter(|v| *v != 0.0) {
        parts.push(format!("汇率折算：约 {:.0}%", fx * 100.0));
    }
    if let Some(rate) = store.coupon_rate.filter(|v| *v != 0.0) {
        parts.push(format!("购物券折算：约 {:.0}%", (1.0 - rate) * 100.0));
    }
    parts
}
