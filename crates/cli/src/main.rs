use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use fairsplit_cli::{Cli, Menu};
use fairsplit_ledger::SplitService;

fn main() -> Result<()> {
    let cli = Cli::parse();
    fairsplit_observability::init(&cli.tracing_config());

    let config = cli.ledger_config();
    info!(duplicate_users = ?config.duplicate_users, output = ?cli.output, "starting session");

    let stdin = io::stdin();
    let mut menu = Menu::new(
        stdin.lock(),
        io::stdout(),
        SplitService::new(config),
        cli.renderer(),
    );
    menu.run()?;

    info!(
        expenses = menu.service().list_expenses().len(),
        "session ended"
    );
    Ok(())
}
