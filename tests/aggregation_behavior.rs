//! Behavior-driven tests for the watchlist aggregation pipeline.
//!
//! These tests verify HOW the pipeline composes per-symbol data: which
//! failures skip a symbol, which leave fields unset, and what the batch
//! guarantees about ordering and isolation.

use std::time::Duration;

use marketlens_core::{AnalystRating, Symbol};
use marketlens_tests::{
    aggregator_with, client_without_key, metrics_body, profile_body, quote_body,
    recommendation_body, ScriptedHttpClient, StockAggregator,
};

fn pace() -> Duration {
    Duration::from_millis(1)
}

fn symbols(raw: &[&str]) -> Vec<Symbol> {
    raw.iter()
        .map(|s| Symbol::parse(s).expect("valid symbol"))
        .collect()
}

#[tokio::test]
async fn when_all_fetches_succeed_summary_carries_every_field() {
    // Given: a provider with full data for AAPL
    let script = ScriptedHttpClient::new()
        .on("/quote?symbol=AAPL", 200, &quote_body(190.5, 1.25, 0.66))
        .on(
            "/stock/profile2?symbol=AAPL",
            200,
            &profile_body(2_500_000.0, "https://cdn.test/aapl.png"),
        )
        .on(
            "/stock/metric?symbol=AAPL",
            200,
            &metrics_body(28.3, 26.1, 6.42),
        )
        .on(
            "/stock/recommendation?symbol=AAPL",
            200,
            &recommendation_body("2024-03-01", 10, 0, 0, 0, 0),
        )
        .build();
    let aggregator = aggregator_with(script, pace());

    // When: the batch runs
    let summaries = aggregator.summarize_all(&symbols(&["AAPL"])).await;

    // Then: one record with quote fields, derived fields, and rating
    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.symbol.as_str(), "AAPL");
    assert_eq!(summary.price, 190.5);
    assert_eq!(summary.change, 1.25);
    assert_eq!(summary.change_percent, 0.66);
    assert_eq!(summary.market_cap_billions, Some(2500.0));
    assert_eq!(summary.pe_ratio, Some(28.3));
    assert_eq!(summary.forward_pe, Some(26.1));
    assert_eq!(summary.eps_ttm, Some(6.42));
    assert_eq!(summary.analyst_rating, Some(AnalystRating::StrongBuy));
    assert_eq!(summary.logo_url.as_deref(), Some("https://cdn.test/aapl.png"));
}

#[tokio::test]
async fn when_quote_is_missing_the_symbol_is_omitted() {
    // Given: AAPL quotes fine, ZZZZINVALID has no quote data
    let script = ScriptedHttpClient::new()
        .on("/quote?symbol=AAPL", 200, &quote_body(190.5, 1.25, 0.66))
        .on("/quote?symbol=ZZZZINVALID", 200, "{}")
        .build();
    let aggregator = aggregator_with(script.clone(), pace());

    // When
    let summaries = aggregator
        .summarize_all(&symbols(&["AAPL", "ZZZZINVALID"]))
        .await;

    // Then: exactly one record, for AAPL, in position 0
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].symbol.as_str(), "AAPL");

    // And: no optional fetches were issued for the dead symbol
    let urls = script.request_urls();
    assert!(!urls.iter().any(|url| url.contains("profile2?symbol=ZZZZINVALID")));
    assert!(!urls.iter().any(|url| url.contains("metric?symbol=ZZZZINVALID")));
    assert!(!urls
        .iter()
        .any(|url| url.contains("recommendation?symbol=ZZZZINVALID")));
}

#[tokio::test]
async fn when_quote_price_is_zero_the_symbol_is_omitted() {
    let script = ScriptedHttpClient::new()
        .on("/quote?symbol=DELISTED", 200, &quote_body(0.0, 0.0, 0.0))
        .build();
    let aggregator = aggregator_with(script, pace());

    let summaries = aggregator.summarize_all(&symbols(&["DELISTED"])).await;
    assert!(summaries.is_empty());
}

#[tokio::test]
async fn when_optional_fetches_fail_only_quote_fields_are_set() {
    // Given: a healthy quote but profile/metrics/recommendations all error
    let script = ScriptedHttpClient::new()
        .on("/quote?symbol=AAPL", 200, &quote_body(190.5, 1.25, 0.66))
        .on("/stock/profile2", 500, "internal error")
        .on_transport_error("/stock/metric", "connection reset")
        .on("/stock/recommendation", 429, r#"{"error":"API limit reached."}"#)
        .build();
    let aggregator = aggregator_with(script, pace());

    // When
    let summaries = aggregator.summarize_all(&symbols(&["AAPL"])).await;

    // Then: the record exists with every optional field absent
    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.price, 190.5);
    assert_eq!(summary.change, 1.25);
    assert_eq!(summary.change_percent, 0.66);
    assert_eq!(summary.market_cap_billions, None);
    assert_eq!(summary.pe_ratio, None);
    assert_eq!(summary.forward_pe, None);
    assert_eq!(summary.eps_ttm, None);
    assert_eq!(summary.analyst_rating, None);
    assert_eq!(summary.logo_url, None);
}

#[tokio::test]
async fn when_the_provider_rate_limits_the_quote_the_symbol_is_skipped_softly() {
    let script = ScriptedHttpClient::new()
        .on("/quote?symbol=AAPL", 429, r#"{"error":"API limit reached."}"#)
        .build();
    let aggregator = aggregator_with(script, pace());

    let summaries = aggregator.summarize_all(&symbols(&["AAPL"])).await;
    assert!(summaries.is_empty());
}

#[tokio::test]
async fn batch_output_preserves_input_order_with_failures_absent() {
    // Given: the middle symbol of three has no quote
    let script = ScriptedHttpClient::new()
        .on("/quote?symbol=AAPL", 200, &quote_body(190.5, 1.25, 0.66))
        .on("/quote?symbol=DEAD", 200, "{}")
        .on("/quote?symbol=MSFT", 200, &quote_body(410.0, -2.0, -0.49))
        .build();
    let aggregator = aggregator_with(script, pace());

    // When
    let summaries = aggregator
        .summarize_all(&symbols(&["AAPL", "DEAD", "MSFT"]))
        .await;

    // Then: survivors keep their relative order, no placeholders
    let got: Vec<&str> = summaries.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(got, vec!["AAPL", "MSFT"]);
}

#[tokio::test]
async fn empty_input_produces_empty_output_without_requests() {
    let script = ScriptedHttpClient::new().build();
    let aggregator = aggregator_with(script.clone(), pace());

    let summaries = aggregator.summarize_all(&[]).await;

    assert!(summaries.is_empty());
    assert_eq!(script.request_count(), 0);
}

#[tokio::test]
async fn missing_api_key_short_circuits_the_batch_without_requests() {
    let script = ScriptedHttpClient::new()
        .on("/quote", 200, &quote_body(190.5, 1.25, 0.66))
        .build();
    let aggregator = StockAggregator::new(client_without_key(script.clone()));

    let summaries = aggregator.summarize_all(&symbols(&["AAPL"])).await;

    assert!(summaries.is_empty());
    assert_eq!(script.request_count(), 0);
}

#[tokio::test]
async fn identical_responses_aggregate_identically() {
    let script = ScriptedHttpClient::new()
        .on("/quote?symbol=AAPL", 200, &quote_body(190.5, 1.25, 0.66))
        .on(
            "/stock/profile2?symbol=AAPL",
            200,
            &profile_body(2_500_000.0, "https://cdn.test/aapl.png"),
        )
        .on(
            "/stock/metric?symbol=AAPL",
            200,
            &metrics_body(28.3, 26.1, 6.42),
        )
        .on(
            "/stock/recommendation?symbol=AAPL",
            200,
            &recommendation_body("2024-03-01", 2, 8, 5, 1, 0),
        )
        .build();
    let aggregator = aggregator_with(script, pace());
    let watchlist = symbols(&["AAPL"]);

    let first = aggregator.summarize_all(&watchlist).await;
    let second = aggregator.summarize_all(&watchlist).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn sentinel_metric_values_are_dropped_individually() {
    // peRatio negative, forwardPE zero: both sentinels. epsTTM is real.
    let script = ScriptedHttpClient::new()
        .on("/quote?symbol=AAPL", 200, &quote_body(190.5, 1.25, 0.66))
        .on(
            "/stock/metric?symbol=AAPL",
            200,
            &metrics_body(-1.0, 0.0, 6.42),
        )
        .build();
    let aggregator = aggregator_with(script, pace());

    let summaries = aggregator.summarize_all(&symbols(&["AAPL"])).await;

    assert_eq!(summaries[0].pe_ratio, None);
    assert_eq!(summaries[0].forward_pe, None);
    assert_eq!(summaries[0].eps_ttm, Some(6.42));
}

#[tokio::test]
async fn rating_uses_the_most_recent_period_not_list_position() {
    // Provider returns an older period first; the newer one must win.
    let body = r#"[
        {"period":"2024-02-01","strongBuy":0,"buy":0,"hold":10,"sell":0,"strongSell":0},
        {"period":"2024-03-01","strongBuy":10,"buy":0,"hold":0,"sell":0,"strongSell":0}
    ]"#;
    let script = ScriptedHttpClient::new()
        .on("/quote?symbol=AAPL", 200, &quote_body(190.5, 1.25, 0.66))
        .on("/stock/recommendation?symbol=AAPL", 200, body)
        .build();
    let aggregator = aggregator_with(script, pace());

    let summaries = aggregator.summarize_all(&symbols(&["AAPL"])).await;

    assert_eq!(summaries[0].analyst_rating, Some(AnalystRating::StrongBuy));
}

#[tokio::test]
async fn all_zero_recommendation_counts_leave_the_rating_absent() {
    let script = ScriptedHttpClient::new()
        .on("/quote?symbol=AAPL", 200, &quote_body(190.5, 1.25, 0.66))
        .on(
            "/stock/recommendation?symbol=AAPL",
            200,
            &recommendation_body("2024-03-01", 0, 0, 0, 0, 0),
        )
        .build();
    let aggregator = aggregator_with(script, pace());

    let summaries = aggregator.summarize_all(&symbols(&["AAPL"])).await;

    assert_eq!(summaries[0].analyst_rating, None);
}

#[tokio::test]
async fn quote_with_missing_change_fields_defaults_them_to_zero() {
    let script = ScriptedHttpClient::new()
        .on("/quote?symbol=AAPL", 200, r#"{"c":190.5}"#)
        .build();
    let aggregator = aggregator_with(script, pace());

    let summaries = aggregator.summarize_all(&symbols(&["AAPL"])).await;

    assert_eq!(summaries[0].price, 190.5);
    assert_eq!(summaries[0].change, 0.0);
    assert_eq!(summaries[0].change_percent, 0.0);
}
