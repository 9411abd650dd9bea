//! Domain types for MarketLens watchlist data.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, uppercase-normalized ticker |
//! | [`StockSummary`] | Merged per-symbol aggregation record |
//! | [`AnalystRating`] | Consensus bucket (Strong Buy .. Strong Sell) |
//! | [`RecommendationCounts`] | Analyst counts for one reporting period |
//! | [`NewsArticle`] | Normalized company news article |
//! | [`SymbolMatch`] | Instrument search hit |

mod models;
mod symbol;

pub use models::{
    market_cap_billions, AnalystRating, NewsArticle, RecommendationCounts, StockSummary,
    SymbolMatch,
};
pub use symbol::Symbol;
