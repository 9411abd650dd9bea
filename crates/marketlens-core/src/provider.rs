//! Finnhub REST client.
//!
//! Wraps the provider endpoints the watchlist pipeline consumes. Every call
//! goes through [`FinnhubClient::fetch_json`]: paced by the shared
//! [`RequestPacer`], decoded with serde, and soft-failed to `None` on any
//! transport error, non-2xx status (429 included), or undecodable body.
//! Callers distinguish "no data" from fatal conditions by construction —
//! nothing here returns an `Err`.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::cache::ResponseCache;
use crate::domain::{NewsArticle, RecommendationCounts, SymbolMatch};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::throttling::RequestPacer;
use crate::Symbol;

pub const FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";

/// Environment variable holding the Finnhub API key.
pub const API_KEY_ENV: &str = "MARKETLENS_FINNHUB_API_KEY";

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

// Freshness hints for the response cache. Quotes are never cached.
const FUNDAMENTALS_CACHE_TTL: Duration = Duration::from_secs(3600);
const NEWS_CACHE_TTL: Duration = Duration::from_secs(300);
const SEARCH_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Client for the Finnhub HTTP API.
#[derive(Clone)]
pub struct FinnhubClient {
    http_client: Arc<dyn HttpClient>,
    pacer: RequestPacer,
    cache: ResponseCache,
    base_url: String,
    api_key: Option<String>,
}

impl FinnhubClient {
    /// Production client reading the API key from [`API_KEY_ENV`].
    ///
    /// A missing key does not fail here; the pipeline treats it as a
    /// soft "no data" condition when a batch is requested.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(API_KEY_ENV).ok(),
            Arc::new(ReqwestHttpClient::new()),
            RequestPacer::default(),
        )
    }

    pub fn new(
        api_key: Option<String>,
        http_client: Arc<dyn HttpClient>,
        pacer: RequestPacer,
    ) -> Self {
        Self {
            http_client,
            pacer,
            cache: ResponseCache::new(),
            base_url: String::from(FINNHUB_BASE_URL),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    pub fn with_pacer(mut self, pacer: RequestPacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Real-time quote. Load-bearing for the pipeline; never cached.
    pub async fn quote(&self, symbol: &Symbol) -> Option<QuotePayload> {
        let url = self.endpoint_url("/quote", &[("symbol", symbol.as_str())]);
        self.fetch_json(url, None).await
    }

    /// Company profile (market cap, logo). Best-effort.
    pub async fn company_profile(&self, symbol: &Symbol) -> Option<ProfilePayload> {
        let url = self.endpoint_url("/stock/profile2", &[("symbol", symbol.as_str())]);
        self.fetch_json(url, Some(FUNDAMENTALS_CACHE_TTL)).await
    }

    /// Valuation metrics (P/E, forward P/E, EPS). Best-effort.
    pub async fn company_metrics(&self, symbol: &Symbol) -> Option<MetricsPayload> {
        let url = self.endpoint_url(
            "/stock/metric",
            &[("symbol", symbol.as_str()), ("metric", "all")],
        );
        self.fetch_json(url, Some(FUNDAMENTALS_CACHE_TTL)).await
    }

    /// Analyst recommendation periods, newest first per provider contract.
    pub async fn recommendation_trends(
        &self,
        symbol: &Symbol,
    ) -> Option<Vec<RecommendationPayload>> {
        let url = self.endpoint_url("/stock/recommendation", &[("symbol", symbol.as_str())]);
        self.fetch_json(url, Some(FUNDAMENTALS_CACHE_TTL)).await
    }

    /// Latest company news, normalized and truncated to `limit` articles.
    pub async fn company_news(&self, symbol: &Symbol, limit: usize) -> Option<Vec<NewsArticle>> {
        let limit_param = limit.to_string();
        let url = self.endpoint_url(
            "/company-news",
            &[("symbol", symbol.as_str()), ("limit", &limit_param)],
        );
        let articles: Vec<NewsPayload> = self.fetch_json(url, Some(NEWS_CACHE_TTL)).await?;

        Some(
            articles
                .into_iter()
                .filter_map(NewsPayload::normalize)
                .take(limit)
                .collect(),
        )
    }

    /// Free-text instrument search.
    pub async fn search(&self, query: &str) -> Option<Vec<SymbolMatch>> {
        let url = self.endpoint_url("/search", &[("q", query)]);
        let payload: SearchPayload = self.fetch_json(url, Some(SEARCH_CACHE_TTL)).await?;

        Some(
            payload
                .result
                .into_iter()
                .filter_map(SearchMatchPayload::normalize)
                .collect(),
        )
    }

    fn endpoint_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        let mut separator = '?';

        for (name, value) in params {
            url.push(separator);
            separator = '&';
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        if let Some(key) = &self.api_key {
            url.push(separator);
            url.push_str("token=");
            url.push_str(&urlencoding::encode(key));
        }

        url
    }

    /// Paced GET + JSON decode with soft failure.
    ///
    /// `cache_ttl` is an advisory freshness hint for the response cache;
    /// it never changes what the caller observes beyond skipping a network
    /// round-trip on a fresh entry.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: String,
        cache_ttl: Option<Duration>,
    ) -> Option<T> {
        if cache_ttl.is_some() {
            if let Some(body) = self.cache.get(&url).await {
                match serde_json::from_str(&body) {
                    Ok(value) => {
                        debug!("cache hit for {}", redacted(&url));
                        return Some(value);
                    }
                    Err(error) => {
                        warn!("discarding undecodable cache entry for {}: {error}", redacted(&url));
                    }
                }
            }
        }

        self.pacer.acquire().await;

        let request = HttpRequest::get(url.as_str()).with_timeout(FETCH_TIMEOUT);
        let response = match self.http_client.get(request).await {
            Ok(response) => response,
            Err(error) => {
                warn!("transport error for {}: {error}", redacted(&url));
                return None;
            }
        };

        if response.is_rate_limited() {
            warn!("provider rate limit hit for {}", redacted(&url));
            return None;
        }
        if !response.is_success() {
            warn!(
                "provider returned status {} for {}",
                response.status,
                redacted(&url)
            );
            return None;
        }

        let value = match serde_json::from_str(&response.body) {
            Ok(value) => value,
            Err(error) => {
                warn!("undecodable response body for {}: {error}", redacted(&url));
                return None;
            }
        };

        if let Some(ttl) = cache_ttl {
            self.cache.put(url, response.body, ttl).await;
        }

        Some(value)
    }
}

/// Strips the API key from a URL destined for a log line.
fn redacted(url: &str) -> String {
    match url.split_once("token=") {
        Some((prefix, _)) => format!("{prefix}token=***"),
        None => url.to_owned(),
    }
}

/// Raw `/quote` payload. Finnhub uses single-letter field names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct QuotePayload {
    /// Current price.
    #[serde(rename = "c")]
    pub current: Option<f64>,
    /// Absolute change since previous close.
    #[serde(rename = "d")]
    pub change: Option<f64>,
    /// Percent change since previous close.
    #[serde(rename = "dp")]
    pub change_percent: Option<f64>,
    /// Previous close.
    #[serde(rename = "pc")]
    pub previous_close: Option<f64>,
    /// Quote timestamp, unix seconds.
    #[serde(rename = "t")]
    pub timestamp: Option<i64>,
}

/// Raw `/stock/profile2` payload, reduced to the fields the pipeline uses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfilePayload {
    /// Market capitalization in millions of dollars.
    #[serde(rename = "marketCapitalization")]
    pub market_capitalization: Option<f64>,
    pub logo: Option<String>,
}

/// Raw `/stock/metric` payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct MetricsPayload {
    pub metric: Option<MetricSet>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct MetricSet {
    #[serde(rename = "peRatio")]
    pub pe_ratio: Option<f64>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<f64>,
    #[serde(rename = "epsTTM")]
    pub eps_ttm: Option<f64>,
}

/// One `/stock/recommendation` period. Missing counts decode as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecommendationPayload {
    #[serde(rename = "strongBuy")]
    pub strong_buy: Option<u32>,
    pub buy: Option<u32>,
    pub hold: Option<u32>,
    pub sell: Option<u32>,
    #[serde(rename = "strongSell")]
    pub strong_sell: Option<u32>,
    /// Reporting period date, e.g. "2024-03-01".
    pub period: Option<String>,
}

impl RecommendationPayload {
    pub fn counts(&self) -> RecommendationCounts {
        RecommendationCounts {
            strong_buy: self.strong_buy.unwrap_or(0),
            buy: self.buy.unwrap_or(0),
            hold: self.hold.unwrap_or(0),
            sell: self.sell.unwrap_or(0),
            strong_sell: self.strong_sell.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NewsPayload {
    headline: Option<String>,
    source: Option<String>,
    summary: Option<String>,
    url: Option<String>,
    image: Option<String>,
    datetime: Option<i64>,
}

impl NewsPayload {
    /// Articles without a headline carry nothing worth rendering.
    fn normalize(self) -> Option<NewsArticle> {
        let headline = self.headline.filter(|headline| !headline.is_empty())?;
        Some(NewsArticle {
            headline,
            source: self.source,
            summary: self.summary,
            url: self.url,
            image: self.image,
            datetime: self.datetime,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    result: Vec<SearchMatchPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchMatchPayload {
    symbol: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    security_type: Option<String>,
}

impl SearchMatchPayload {
    fn normalize(self) -> Option<SymbolMatch> {
        let symbol = self.symbol.filter(|symbol| !symbol.is_empty())?;
        Some(SymbolMatch {
            symbol,
            description: self.description.unwrap_or_default(),
            security_type: self.security_type,
        })
    }
}
