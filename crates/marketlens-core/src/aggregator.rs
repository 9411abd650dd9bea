//! Watchlist aggregation pipeline.
//!
//! For each symbol: one load-bearing quote fetch, then three best-effort
//! fetches (profile, metrics, recommendations) merged into a single
//! [`StockSummary`]. Failure anywhere is contained — an optional fetch that
//! fails leaves its fields unset, a symbol without a usable quote is
//! skipped, and nothing escapes the per-symbol boundary.

use std::cmp::Ordering;

use log::{debug, warn};

use crate::domain::{market_cap_billions, AnalystRating, StockSummary};
use crate::provider::{FinnhubClient, ProfilePayload, RecommendationPayload};
use crate::Symbol;

/// Sequential, rate-limited aggregation over a watchlist of symbols.
pub struct StockAggregator {
    provider: FinnhubClient,
}

impl StockAggregator {
    pub fn new(provider: FinnhubClient) -> Self {
        Self { provider }
    }

    /// Aggregate every symbol, strictly in order.
    ///
    /// Symbols without a usable quote are omitted (never a placeholder);
    /// the output is an order-preserving subsequence of the input. With no
    /// API key configured the whole batch short-circuits to empty without
    /// touching the network.
    pub async fn summarize_all(&self, symbols: &[Symbol]) -> Vec<StockSummary> {
        if symbols.is_empty() {
            return Vec::new();
        }
        if !self.provider.is_configured() {
            warn!("no Finnhub API key configured; returning empty watchlist data");
            return Vec::new();
        }

        let mut summaries = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.summarize(symbol).await {
                Some(summary) => summaries.push(summary),
                None => debug!("skipping {symbol}: no usable quote"),
            }
        }
        summaries
    }

    /// Aggregate one symbol, or `None` when its quote is absent or priced
    /// at zero — the defined "no data" outcome, not an error.
    pub async fn summarize(&self, symbol: &Symbol) -> Option<StockSummary> {
        let quote = self.provider.quote(symbol).await?;
        let price = quote.current.filter(|price| *price != 0.0)?;

        // The remaining fetches are independently best-effort; the shared
        // pacer serializes their dispatch even though they join here.
        let (profile, metrics, trends) = tokio::join!(
            self.provider.company_profile(symbol),
            self.provider.company_metrics(symbol),
            self.provider.recommendation_trends(symbol),
        );

        let (market_cap, logo_url) = profile.map(split_profile).unwrap_or_default();
        let metric = metrics.and_then(|payload| payload.metric).unwrap_or_default();

        Some(StockSummary {
            symbol: symbol.clone(),
            price,
            change: quote.change.unwrap_or(0.0),
            change_percent: quote.change_percent.unwrap_or(0.0),
            market_cap_billions: market_cap,
            pe_ratio: positive(metric.pe_ratio),
            forward_pe: positive(metric.forward_pe),
            eps_ttm: positive(metric.eps_ttm),
            analyst_rating: trends.as_deref().and_then(latest_consensus),
            logo_url,
        })
    }
}

fn split_profile(profile: ProfilePayload) -> (Option<f64>, Option<String>) {
    let market_cap = profile
        .market_capitalization
        .filter(|millions| *millions != 0.0)
        .map(market_cap_billions);
    let logo_url = profile.logo.filter(|logo| !logo.is_empty());
    (market_cap, logo_url)
}

/// Provider sentinel values are zero or negative; keep only real readings.
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Consensus rating from the most recent reporting period.
///
/// Recency is decided by the `period` date (ISO dates compare correctly as
/// strings); entries without one rank oldest, and provider order — newest
/// first — breaks ties.
fn latest_consensus(trends: &[RecommendationPayload]) -> Option<AnalystRating> {
    trends
        .iter()
        .enumerate()
        .max_by(|(left_index, left), (right_index, right)| {
            match (left.period.as_deref(), right.period.as_deref()) {
                (Some(a), Some(b)) => a.cmp(b).then(right_index.cmp(left_index)),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => right_index.cmp(left_index),
            }
        })
        .and_then(|(_, latest)| latest.counts().consensus())
}
