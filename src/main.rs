use anyhow::{Context, Result};
use clap::Parser;

use skyburst::app;
use skyburst::config::{Cli, Config};
use skyburst::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;

    logging::init(config.log_file.as_deref(), config.verbose)?;

    app::run(&config).context("fireworks display failed")
}
