use std::process::ExitCode;

use marketlens_core::{FinnhubClient, Symbol};

use crate::cli::{Cli, NewsArgs};
use crate::error::CliError;
use crate::output;

pub async fn run(args: &NewsArgs, cli: &Cli, client: FinnhubClient) -> Result<ExitCode, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    match client.company_news(&symbol, args.limit).await {
        Some(articles) => {
            output::render_news(&articles, cli.format, cli.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("warning: news unavailable for {symbol}");
            Ok(ExitCode::from(3))
        }
    }
}
