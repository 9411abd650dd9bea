use std::process::ExitCode;

use marketlens_core::FinnhubClient;

use crate::cli::{Cli, SearchArgs};
use crate::error::CliError;
use crate::output;

pub async fn run(
    args: &SearchArgs,
    cli: &Cli,
    client: FinnhubClient,
) -> Result<ExitCode, CliError> {
    match client.search(&args.query).await {
        Some(matches) => {
            output::render_matches(&matches, cli.format, cli.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("warning: search unavailable for '{}'", args.query);
            Ok(ExitCode::from(3))
        }
    }
}
