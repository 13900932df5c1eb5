use serde::{Deserialize, Serialize};

/// Troy ounce in grams, used to convert USD/oz quotes into CNY/g.
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1035;

/// Latest two closes of a quoted instrument.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub last: f64,
    pub previous: f64,
}

impl Quote {
    /// Day-over-day change in percent.
    pub fn change_pct(&self) -> f64 {
        if self.previous == 0.0 {
            return 0.0;
        }
        (self.last - self.previous) / self.previous * 100.0
    }
}

/// Market context shown in the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketSnapshot {
    /// COMEX gold futures, USD per troy ounce.
    pub gold: Option<Quote>,
    pub usd_cny: Option<f64>,
    /// The brand's Hong Kong listing (6181.HK), HKD.
    pub hk_share: Option<Quote>,
    /// Why the snapshot is empty, when it is.
    pub error: Option<String>,
}

impl MarketSnapshot {
    pub fn new(gold: Quote, usd_cny: f64, hk_share: Quote) -> Self {
        Self {
            gold: Some(gold),
            usd_cny: Some(usd_cny),
            hk_share: Some(hk_share),
            error: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            gold: None,
            usd_cny: None,
            hk_share: None,
            error: Some(reason.into()),
        }
    }

    pub fn gold_change_pct(&self) -> f64 {
        self.gold.map(|q| q.change_pct()).unwrap_or(0.0)
    }

    /// Estimated mainland gold price in CNY per gram.
    pub fn gold_cny_per_gram(&self) -> Option<f64> {
        match (self.gold, self.usd_cny) {
            (Some(gold), Some(rate)) => Some(gold.last * rate / GRAMS_PER_TROY_OUNCE),
            _ => None,
        }
    }

    pub fn gold_note(&self) -> &'static str {
        if self.gold.is_none() {
            return "请稍后刷新";
        }
        let change = self.gold_change_pct();
        if change >= 1.0 {
            "本周持续上涨"
        } else if change >= 0.0 {
            "小幅上涨"
        } else if change >= -1.0 {
            "小幅回调"
        } else {
            "明显回调"
        }
    }

    /// CSS colour hint for the share price change.
    pub fn hk_color(&self) -> &'static str {
        match self.hk_share {
            Some(q) if q.change_pct() >= 0.0 => "green",
            Some(_) => "red",
            None => "neutral",
        }
    }
}
