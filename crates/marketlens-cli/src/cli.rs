//! CLI argument definitions for MarketLens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `watch` | Aggregate quote, fundamentals, and analyst ratings for symbols |
//! | `search` | Search instruments by free-text query |
//! | `news` | Latest company news for a symbol |
//!
//! # Examples
//!
//! ```bash
//! # Aggregate a watchlist
//! marketlens watch AAPL MSFT NVDA
//!
//! # JSON output for scripting
//! marketlens watch AAPL --format json --pretty
//!
//! # Find a ticker
//! marketlens search "apple"
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// MarketLens - stock watchlist aggregation over the Finnhub API.
///
/// Reads the API key from the MARKETLENS_FINNHUB_API_KEY environment
/// variable. Calls to the provider are paced 300 ms apart by default.
#[derive(Debug, Parser)]
#[command(
    name = "marketlens",
    author,
    version,
    about = "Stock watchlist aggregation CLI"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Minimum spacing between provider calls, in milliseconds.
    #[arg(long, global = true, default_value_t = 300)]
    pub pace_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for terminal display.
    Table,
    /// JSON array output.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate quote, fundamentals, and analyst ratings for symbols.
    ///
    /// Symbols without a usable quote are omitted from the output; the
    /// command still succeeds, mirroring the pipeline's soft-failure
    /// semantics.
    Watch(WatchArgs),

    /// Search instruments by free-text query.
    Search(SearchArgs),

    /// Latest company news for a symbol.
    News(NewsArgs),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Ticker symbols, case-insensitive (e.g. AAPL msft brk.b).
    #[arg(required = true)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text query: a ticker fragment or company name.
    pub query: String,
}

#[derive(Debug, Args)]
pub struct NewsArgs {
    /// Ticker symbol, case-insensitive.
    pub symbol: String,

    /// Maximum number of articles to show.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}
