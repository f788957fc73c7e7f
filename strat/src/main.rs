mod commands;
mod logging;
mod ops;
mod reports;

use clap::Parser;
use eyre::Result;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::setup(cli.log_level);
    cli.run()
}
