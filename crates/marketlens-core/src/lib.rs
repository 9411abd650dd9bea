//! # MarketLens Core
//!
//! Stock-data aggregation pipeline for the MarketLens watchlist: given a
//! list of ticker symbols, fetch quote, profile, metrics, and analyst
//! recommendation data from Finnhub under a shared rate budget and merge
//! each symbol into one [`StockSummary`] with derived fields.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`aggregator`] | Per-symbol aggregation and sequential batch orchestration |
//! | [`cache`] | In-memory response cache honoring per-fetch TTL hints |
//! | [`domain`] | Validated domain models and derivations |
//! | [`error`] | Validation errors |
//! | [`http_client`] | HTTP transport abstraction (reqwest in production) |
//! | [`provider`] | Finnhub client: paced JSON fetches, soft failure |
//! | [`throttling`] | Minimum-interval request pacer |
//!
//! ## Failure model
//!
//! The pipeline fails soft everywhere and fails the batch nowhere: transport
//! errors, non-2xx statuses (429 included), and undecodable bodies become
//! `None` at the fetch boundary; a symbol without a usable quote is dropped
//! from the batch; missing optional data leaves fields unset. Only the quote
//! call is load-bearing. A missing API key yields an empty batch and a
//! logged warning rather than an error.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use marketlens_core::{FinnhubClient, StockAggregator, Symbol};
//!
//! #[tokio::main]
//! async fn main() {
//!     let aggregator = StockAggregator::new(FinnhubClient::from_env());
//!     let symbols = vec![Symbol::parse("AAPL").unwrap()];
//!
//!     for summary in aggregator.summarize_all(&symbols).await {
//!         println!("{}: ${:.2}", summary.symbol, summary.price);
//!     }
//! }
//! ```

pub mod aggregator;
pub mod cache;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod provider;
pub mod throttling;

pub use aggregator::StockAggregator;
pub use cache::ResponseCache;
pub use domain::{
    market_cap_billions, AnalystRating, NewsArticle, RecommendationCounts, StockSummary, Symbol,
    SymbolMatch,
};
pub use error::ValidationError;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use provider::{
    FinnhubClient, MetricSet, MetricsPayload, ProfilePayload, QuotePayload, RecommendationPayload,
    API_KEY_ENV, FINNHUB_BASE_URL,
};
pub use throttling::{RequestPacer, MIN_REQUEST_INTERVAL};
