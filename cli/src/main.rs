use std::io;

use anyhow::{Context, anyhow};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use mineclear_core::Session;

use crate::app::App;
use crate::config::{Args, Settings};

mod app;
mod config;
mod render;

/// Routes `log` records through a stderr fmt subscriber so they never mix with the board.
fn init_logging(verbose: &Verbosity<WarnLevel>) -> anyhow::Result<()> {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose)?;

    let settings = Settings::load(&args)?;
    log::debug!("settings: {:?}", settings);

    let mut app = App::new(Session::new(settings.game, settings.seed));
    app.run(io::stdin().lock(), io::stdout().lock())
        .context("Terminal I/O failed")?;

    log::debug!("Exiting after {} games", app.session().games_started());
    Ok(())
}
