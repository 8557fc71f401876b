//! Terminal admin UI for a product catalog.

mod app;
mod app_event;
mod app_event_sender;
mod catalog;
pub mod cli;
mod colors;
pub mod config;
mod key_hint;
mod shell;
mod tui;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use catalog_client::CatalogClient;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub use cli::Cli;
pub use config::CatalogConfig;

const LOG_FILE_NAME: &str = "catalog-tui.log";
const DEFAULT_LOG_FILTER: &str = "catalog_tui=info,catalog_client=info";

pub fn run_main(cli: Cli) -> anyhow::Result<()> {
    let config = CatalogConfig::load(cli.config.as_deref())
        .context("failed to load config")?
        .with_overrides(cli.config_overrides())
        .context("invalid command-line option")?;

    let _log_guard = init_logging(&config.log_dir())?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api_base_url,
        list_timeout_secs = config.list_timeout_secs,
        "catalog-tui starting"
    );

    let client = CatalogClient::with_list_timeout(&config.api_base_url, config.list_timeout())
        .context("failed to build catalog client")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("catalog-worker")
        .build()
        .context("failed to start tokio runtime")?;
    let _runtime_guard = runtime.enter();

    let mut terminal = tui::init().context("failed to initialise terminal")?;
    let result = app::App::new(Arc::new(client), config.currency_symbol).run(&mut terminal);
    if let Err(err) = tui::restore() {
        tracing::error!("failed to restore terminal: {err}");
    }

    tracing::info!("catalog-tui exiting");
    result
}

/// Log to a file; the terminal belongs to the UI. The returned guard flushes
/// buffered lines when dropped.
fn init_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log dir {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
