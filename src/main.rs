// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Stategrid CLI entrypoint.
//!
//! By default this runs the interactive TUI against the mock record provider.
//!
//! `--headless <query>` runs one search-and-select cycle without a terminal and prints the
//! resulting render snapshot as JSON; `--snapshot-schema` prints the snapshot's JSON schema.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stategrid::config::{Config, ConfigError};
use stategrid::model::us_states;
use stategrid::provider::MockProvider;
use stategrid::session::{runtime_now, Session};
use stategrid::snapshot::{snapshot_schema_json, RenderSnapshot};
use stategrid::store::{Action, Store};

#[derive(Parser, Debug)]
#[command(name = "stategrid", version, about = "Look up US state data in the terminal")]
struct Cli {
    #[arg(long, value_name = "PATH", help = "TOML config file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Seed for the mock record generator")]
    seed: Option<u64>,
    #[arg(long, value_name = "MS", help = "Simulated provider latency in milliseconds")]
    latency_ms: Option<u64>,
    #[arg(long, value_name = "PATH", help = "Append logs to this file (RUST_LOG filters)")]
    log_file: Option<PathBuf>,
    #[arg(long, conflicts_with = "headless", help = "Print the render snapshot JSON schema")]
    snapshot_schema: bool,
    #[arg(
        long,
        value_name = "QUERY",
        help = "Search, select the first match and print the snapshot as JSON"
    )]
    headless: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("no state matches {0:?}")]
    NoMatch(String),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("terminal UI failed: {0}")]
    Tui(String),
}

impl Cli {
    fn resolve_config(&self) -> Result<Config, AppError> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        if let Some(seed) = self.seed {
            config.provider.seed = Some(seed);
        }
        if let Some(latency_ms) = self.latency_ms {
            config.provider.latency_ms = latency_ms;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<(), AppError> {
    // The terminal belongs to the UI; without a file, logs go nowhere.
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn build_session(config: &Config) -> Session {
    let store = Store::new(us_states(), config);
    let provider = MockProvider::new(config.provider.seed, config.provider.latency());
    Session::new(store, Arc::new(provider))
}

async fn run_headless(mut session: Session, query: &str) -> Result<RenderSnapshot, AppError> {
    session.dispatch(Action::QueryChanged(query.to_owned()));
    session.settle_query().await;
    if session.store().filter().filtered().is_empty() {
        return Err(AppError::NoMatch(query.to_owned()));
    }

    session.dispatch(Action::SelectHighlighted);
    session.settle_fetches().await;
    session.settle_query().await;
    while session.store().grid().has_pending_fade() {
        if session.step().await.is_none() {
            break;
        }
    }
    Ok(session.store().snapshot(runtime_now()))
}

fn run(cli: Cli) -> Result<(), AppError> {
    if cli.snapshot_schema {
        println!("{}", snapshot_schema_json()?);
        return Ok(());
    }

    init_logging(cli.log_file.as_deref())?;
    let config = cli.resolve_config()?;
    tracing::info!(?config, "starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;

    runtime.block_on(async {
        let session = build_session(&config);
        match cli.headless.as_deref() {
            Some(query) => {
                let snapshot = run_headless(session, query).await?;
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                Ok(())
            }
            None => stategrid::tui::run(session)
                .await
                .map_err(|err| AppError::Tui(err.to_string())),
        }
    })
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        tracing::error!(error = %err, "exiting");
        eprintln!("stategrid: {err}");
        std::process::exit(1);
    }
}
