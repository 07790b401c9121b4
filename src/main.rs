//! Binary entry point: load the library once, run the requested command (or
//! a whole shell session), then save once on the way out.
use std::io;

use anyhow::Context;
use clap::Parser;
use library_manager::{commands, logger, CliConfig, Command, Library, ManualClock, Store};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);

    let store = match &config.data_file {
        Some(path) => Store::new(path),
        None => Store::at_default_location()?,
    };
    let mut library = match config.today {
        Some(today) => Library::open_with_clock(store, Box::new(ManualClock::new(today))),
        None => Library::open(store),
    };

    let outcome = match config.command {
        Command::Shell => commands::run_shell(&mut library, io::stdin().lock(), io::stdout().lock()),
        command => commands::execute(&mut library, command).map(|reply| println!("{reply}")),
    };

    library.save().with_context(|| {
        format!(
            "failed to save library data to {}",
            library.store().path().display()
        )
    })?;
    outcome
}
