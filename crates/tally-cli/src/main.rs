//! `tally`: command-line front end for the Tally points tracker.
//!
//! # Startup Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration from `--config`, or `tally.yaml` when present
//! 3. Initialize structured logging (tracing) on stderr
//! 4. Open the tracker on the configured data directory
//! 5. Run the command and print its output

mod cli;
mod commands;
mod error;
mod render;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tally_core::config::DEFAULT_CONFIG_FILE;
use tally_core::{LogFormat, LoggingConfig, SystemClock, TallyConfig, Tracker};
use tally_store::{FileSlot, StateStore};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, opening the data directory or the
/// command itself fails.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_tracing(&config.logging);
    tracing::debug!(
        data_dir = %config.storage.data_dir.display(),
        key = %config.storage.key,
        "configuration loaded"
    );

    let store = StateStore::new(
        FileSlot::new(&config.storage.data_dir),
        config.storage.key.clone(),
    );
    let mut tracker = Tracker::open(store, SystemClock).with_context(|| {
        format!(
            "failed to open tracker data in {}",
            config.storage.data_dir.display()
        )
    })?;

    let report = tracker.load_report();
    if !report.is_clean() {
        for problem in &report.corrupt {
            eprintln!("warning: {problem}; defaults were used");
        }
    }

    let command = cli.command.unwrap_or(Command::Today);
    let mut stdout = std::io::stdout().lock();
    commands::run(command, &mut tracker, &mut stdout)?;
    Ok(())
}

/// Load configuration and apply the command-line overrides.
fn load_config(cli: &Cli) -> Result<TallyConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => TallyConfig::from_file(path)?,
        None => TallyConfig::from_file_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir.clone_from(data_dir);
    }
    Ok(config)
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    match logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn data_dir_flag_overrides_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("tally.yaml");
        std::fs::write(&config_path, "storage:\n  data_dir: from-config\n").expect("write config");

        let cli = Cli::parse_from([
            "tally",
            "--config",
            config_path.to_str().expect("utf-8 path"),
            "--data-dir",
            "from-flag",
            "log",
        ]);
        let config = load_config(&cli).expect("load config");
        assert_eq!(config.storage.data_dir, Path::new("from-flag"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let cli = Cli::parse_from(["tally", "--config", "/nonexistent/tally.yaml"]);
        assert!(matches!(load_config(&cli), Err(CliError::Config { .. })));
    }
}
