mod news;
mod search;
mod watch;

use std::process::ExitCode;
use std::time::Duration;

use marketlens_core::{FinnhubClient, RequestPacer};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let pacer = RequestPacer::new(Duration::from_millis(cli.pace_ms.max(1)));
    let client = FinnhubClient::from_env().with_pacer(pacer);

    match &cli.command {
        Command::Watch(args) => watch::run(args, cli, client).await,
        Command::Search(args) => search::run(args, cli, client).await,
        Command::News(args) => news::run(args, cli, client).await,
    }
}
