//! ATM CLI - a training cash machine in your terminal

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use atm_core::adapters::{StreamConsole, DEFAULT_DATA_FILE};
use atm_core::services::EntryPoint;
use atm_core::{AtmContext, Error};

mod output;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // End-of-input (Ctrl-D) ends the program like an interrupt does
            if matches!(e.downcast_ref::<Error>(), Some(Error::InputExhausted)) {
                println!();
            } else {
                output::error(&format!("{:#}", e));
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let data_file = default_data_file();
    let ctx = AtmContext::new(&data_file, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .context("Failed to initialize ATM context")?;

    if ctx.config.event_log && ctx.logger.is_none() {
        output::warning("Event log unavailable, continuing without it");
    }

    let stdin = io::stdin();
    let console = StreamConsole::new(stdin.lock(), io::stdout());
    ctx.controller(console).run()?;
    Ok(())
}

/// Data file used when `ATM_DATA_FILE` is not set: `~/.atm/atm_data.json`,
/// or `atm_data.json` in the working directory without a home directory
fn default_data_file() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".atm"))
        .unwrap_or_default()
        .join(DEFAULT_DATA_FILE)
}
