//! CLI entrypoint for dais
//!
//! This is the main binary that wires together all layers using
//! dependency injection: it loads configuration, restores the saved
//! conferences, applies one command, and flushes the result to disk.

use anyhow::{Context, Result};
use clap::Parser;
use dais_application::{
    AnonymousIdentity, CommitteeEventLog, CommitteeSession, DocumentStore, FixedIdentity,
    IdentitySource, LoadBookUseCase, NoEventLog, PersistenceHandle, ReloadMode, SystemClock,
    storage_key,
};
use dais_infrastructure::{
    ConfigLoader, FileConfig, JsonFileStore, JsonlEventLog, MemoryStore, Severity,
    StaticReferenceData,
};
use dais_presentation::cli::commands::Command;
use dais_presentation::{Cli, ConsoleFormatter, JsonFormatter, OutputFormatter, execute};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!(e))
            .context("Failed to load configuration")?
    };

    let log_guard = init_logging(cli.verbose, config.logging.file_path().as_deref());
    info!("Starting dais");

    for issue in config.validate() {
        match issue.severity {
            Severity::Error => error!("{}", issue.message()),
            Severity::Warning => warn!("{}", issue.message()),
        }
    }
    let params = config.to_session_params();

    // === Dependency Injection ===
    let identity: Box<dyn IdentitySource> = match &cli.user {
        Some(user) => Box::new(FixedIdentity::new(user.clone())),
        None => Box::new(AnonymousIdentity),
    };
    let key = storage_key(identity.as_ref());
    let store = build_store(&cli, &config)?;
    let clock = Arc::new(SystemClock);

    // Each invocation is one step of the same live session, so the floor
    // and an open pause carry over from the previous command.
    let loaded = LoadBookUseCase::new(store.clone(), clock.clone())
        .with_params(params.clone())
        .with_reload_mode(ReloadMode::Resume)
        .execute(&key)
        .await;
    debug!(
        "Loaded book (restored: {}, repairs: {})",
        loaded.restored,
        loaded.notes.len()
    );

    let event_log: Arc<dyn CommitteeEventLog> = match config
        .logging
        .event_log_path()
        .and_then(JsonlEventLog::new)
    {
        Some(log) => Arc::new(log),
        None => Arc::new(NoEventLog),
    };

    let persistence = PersistenceHandle::spawn(store, key, params.save_debounce);
    let mut session = CommitteeSession::new(loaded.book, clock)
        .with_reference_data(Arc::new(StaticReferenceData::new()))
        .with_event_log(event_log)
        .with_persistence(persistence)
        .with_params(params);

    let formatter: Box<dyn OutputFormatter> = if cli.json {
        Box::new(JsonFormatter)
    } else {
        Box::new(ConsoleFormatter)
    };

    let command = cli.command.unwrap_or(Command::Status);
    let failed = match execute(&mut session, command) {
        Ok(outcome) => {
            print!("{}", formatter.format(&session, &outcome));
            if cli.json {
                println!();
            }
            false
        }
        Err(e) => {
            eprintln!("{}", formatter.format_error(&e));
            true
        }
    };

    if let Some(saved) = session.shutdown().await {
        debug!("Saved at {}", saved.to_rfc3339());
    }

    if failed {
        drop(log_guard);
        std::process::exit(2);
    }
    drop(log_guard);
    Ok(())
}

/// Install the tracing subscriber: stderr always, plus a file when configured.
fn init_logging(verbose: u8, file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match file.and_then(|f| Some((f.parent()?, f.file_name()?))) {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn build_store(cli: &Cli, config: &FileConfig) -> Result<Arc<dyn DocumentStore>> {
    if cli.ephemeral {
        return Ok(Arc::new(MemoryStore::new()));
    }
    let dir = config
        .storage
        .resolved_data_dir()
        .context("No data directory available; set storage.data_dir or pass --ephemeral")?;
    debug!("Storing conferences under {}", dir.display());
    Ok(Arc::new(JsonFileStore::new(dir)))
}
