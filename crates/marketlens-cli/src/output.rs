//! Result rendering for terminal and scripting consumers.

use std::io::{self, Write};

use marketlens_core::{NewsArticle, StockSummary, SymbolMatch};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render_summaries(
    summaries: &[StockSummary],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(summaries, pretty),
        OutputFormat::Table => {
            let mut out = io::stdout().lock();
            writeln!(
                out,
                "{:<8} {:>10} {:>9} {:>8} {:>9} {:>7} {:>8} {:>7}  {}",
                "SYMBOL", "PRICE", "CHANGE", "CHANGE%", "MCAP(B)", "P/E", "FWD P/E", "EPS", "RATING"
            )?;
            for summary in summaries {
                writeln!(
                    out,
                    "{:<8} {:>10.2} {:>9.2} {:>8.2} {:>9} {:>7} {:>8} {:>7}  {}",
                    summary.symbol.as_str(),
                    summary.price,
                    summary.change,
                    summary.change_percent,
                    optional(summary.market_cap_billions, 1),
                    optional(summary.pe_ratio, 2),
                    optional(summary.forward_pe, 2),
                    optional(summary.eps_ttm, 2),
                    summary
                        .analyst_rating
                        .map(|rating| rating.as_str())
                        .unwrap_or("-"),
                )?;
            }
            Ok(())
        }
    }
}

pub fn render_matches(
    matches: &[SymbolMatch],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(matches, pretty),
        OutputFormat::Table => {
            let mut out = io::stdout().lock();
            writeln!(out, "{:<12} {:<14} {}", "SYMBOL", "TYPE", "DESCRIPTION")?;
            for hit in matches {
                writeln!(
                    out,
                    "{:<12} {:<14} {}",
                    hit.symbol,
                    hit.security_type.as_deref().unwrap_or("-"),
                    hit.description,
                )?;
            }
            Ok(())
        }
    }
}

pub fn render_news(
    articles: &[NewsArticle],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_json(articles, pretty),
        OutputFormat::Table => {
            let mut out = io::stdout().lock();
            for article in articles {
                writeln!(
                    out,
                    "{}  [{}] {}",
                    article
                        .published_rfc3339()
                        .unwrap_or_else(|| String::from("-")),
                    article.source.as_deref().unwrap_or("unknown"),
                    article.headline,
                )?;
                if let Some(url) = &article.url {
                    writeln!(out, "    {url}")?;
                }
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    let mut out = io::stdout().lock();
    writeln!(out, "{rendered}")?;
    Ok(())
}

fn optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(value) => format!("{value:.decimals$}"),
        None => String::from("-"),
    }
}
