use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::Symbol;

/// Analyst consensus bucket derived from recommendation counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalystRating {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl AnalystRating {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::Buy => "Buy",
            Self::Hold => "Hold",
            Self::Sell => "Sell",
            Self::StrongSell => "Strong Sell",
        }
    }

    /// Bucket a weighted consensus score into a rating band.
    ///
    /// Bands are inclusive at their lower bound and evaluated descending;
    /// scores built from non-negative counts are already within [1, 5], so
    /// no clamping is applied.
    pub fn from_score(score: f64) -> Self {
        if score >= 4.5 {
            Self::StrongBuy
        } else if score >= 3.5 {
            Self::Buy
        } else if score >= 2.5 {
            Self::Hold
        } else if score >= 1.5 {
            Self::Sell
        } else {
            Self::StrongSell
        }
    }
}

impl Display for AnalystRating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analyst recommendation counts for one reporting period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecommendationCounts {
    pub strong_buy: u32,
    pub buy: u32,
    pub hold: u32,
    pub sell: u32,
    pub strong_sell: u32,
}

impl RecommendationCounts {
    pub fn total(&self) -> u32 {
        self.strong_buy + self.buy + self.hold + self.sell + self.strong_sell
    }

    /// Weighted consensus over all counts: strong buy weighs 5 down to
    /// strong sell at 1. `None` when there are no recommendations at all.
    pub fn consensus(&self) -> Option<AnalystRating> {
        let total = self.total();
        if total == 0 {
            return None;
        }

        let weighted = 5 * self.strong_buy
            + 4 * self.buy
            + 3 * self.hold
            + 2 * self.sell
            + self.strong_sell;
        let score = f64::from(weighted) / f64::from(total);

        Some(AnalystRating::from_score(score))
    }
}

/// Convert a raw market capitalization in millions of dollars into billions
/// rounded to one decimal place. Half-way values round away from zero.
pub fn market_cap_billions(millions: f64) -> f64 {
    (millions / 1000.0 * 10.0).round() / 10.0
}

/// Merged per-symbol record produced by the aggregation pipeline.
///
/// Exists only when the quote fetch yielded a usable price; every other
/// field is independently optional and absent when its source fetch failed
/// or returned a sentinel value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSummary {
    pub symbol: Symbol,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap_billions: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_pe: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eps_ttm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyst_rating: Option<AnalystRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Normalized company news article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsArticle {
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Publication time in unix seconds, as reported by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<i64>,
}

impl NewsArticle {
    /// Publication time rendered as RFC3339, when the provider supplied one.
    pub fn published_rfc3339(&self) -> Option<String> {
        let timestamp = self.datetime?;
        let parsed = OffsetDateTime::from_unix_timestamp(timestamp).ok()?;
        parsed.format(&Rfc3339).ok()
    }
}

/// Instrument search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_type: Option<String>,
}
