use std::io;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use conneg::config::{self, CliArgs};
use conneg_prefs::AcceptReader;
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        return config::print_default_config();
    }

    let config = config::load_config(&cli)?;
    conneg::telemetry::init_logging(&config.logging)
        .with_context(|| "failed to initialize logging")?;

    debug!(config_path = %cli.config, "Configuration loaded");

    let Some(command) = cli.command.as_ref() else {
        CliArgs::command().print_help()?;
        return Ok(());
    };

    let reader = AcceptReader::new(config.reader.clone());
    let mut stdout = io::stdout().lock();
    conneg::commands::run(command, &reader, &config.output, &mut stdout)
}
