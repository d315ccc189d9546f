//! # restyle - command-line front end
//!
//! Wires the configuration, a file-backed [`StyleStore`] and the system
//! clipboard into the commands defined in [`cli`]. Each invocation opens the
//! store, runs one command and flushes pending writes on exit, so undo history
//! only lives for the duration of a single command.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;

use anyhow::{Context, Result};
use restyle_store::{FileStorage, StyleStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::clipboard::SystemClipboard;
use crate::commands::Session;
use crate::config::{Config, RealEnv};

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Loads configuration and applies command-line overrides on top.
pub fn resolve(cli: &Cli) -> Result<Config> {
    let mut config =
        Config::load(cli.config.as_deref(), &RealEnv).context("failed to load configuration")?;
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = dir.clone();
    }
    if let Some(key) = &cli.key {
        config.storage_key = key.clone();
    }
    if let Some(breakpoint) = cli.breakpoint {
        config.breakpoint = breakpoint;
    }
    Ok(config)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = resolve(&cli)?;
    tracing::debug!(
        dir = %config.storage_dir.display(),
        key = %config.storage_key,
        "opening store"
    );

    let storage = FileStorage::new(config.storage_dir.clone());
    let store = StyleStore::open(storage, config.store_options());
    let mut session = Session::new(store, config, Box::new(SystemClipboard));

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    session.execute(&cli.command, &mut stdout.lock(), &mut stderr.lock())?;
    session
        .store
        .flush()
        .context("failed to persist state")?;
    Ok(())
}
