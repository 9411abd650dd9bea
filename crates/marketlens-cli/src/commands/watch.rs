use std::process::ExitCode;

use log::warn;
use marketlens_core::{FinnhubClient, StockAggregator, Symbol};

use crate::cli::{Cli, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn run(args: &WatchArgs, cli: &Cli, client: FinnhubClient) -> Result<ExitCode, CliError> {
    let symbols = args
        .symbols
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let aggregator = StockAggregator::new(client);
    let summaries = aggregator.summarize_all(&symbols).await;

    if summaries.len() < symbols.len() {
        warn!(
            "{} of {} symbols returned no data",
            symbols.len() - summaries.len(),
            symbols.len()
        );
    }

    output::render_summaries(&summaries, cli.format, cli.pretty)?;
    Ok(ExitCode::SUCCESS)
}
