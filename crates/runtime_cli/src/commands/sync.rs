//! Sync command implementation
//!
//! Recomputes and replaces the non-workdays of every year in range.

use std::path::PathBuf;

use infra_config::Settings;
use infra_master::Reconciler;
use infra_store::MemoryStore;
use tracing::info;

use super::{build_source, open_store};
use crate::{CliError, Pipeline, Result, RunSummary};

/// Overrides for one sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// First year, overriding `run.start_year`
    pub from: Option<i32>,
    /// Last year, overriding `run.end_year`
    pub to: Option<i32>,
    /// Read payloads from this directory instead of the configured source
    pub source_dir: Option<PathBuf>,
    /// Reconcile into memory only
    pub dry_run: bool,
}

/// Run the sync command
pub async fn run(settings: &Settings, options: SyncOptions) -> Result<RunSummary> {
    let start = options.from.unwrap_or(settings.run.start_year);
    let end = options.to.unwrap_or(settings.run.end_year);
    if start > end {
        return Err(CliError::InvalidArgument(format!(
            "--from {} is after --to {}",
            start, end
        )));
    }

    let source = build_source(settings, options.source_dir)?;
    let reconciler = Reconciler::with_weekend_label(&settings.calendar.weekend_label);

    if options.dry_run {
        let store = MemoryStore::new();
        let summary = Pipeline::new(source.as_ref(), &store, reconciler)
            .run(start..=end)
            .await?;
        info!(rows = store.all_rows().len(), "dry run, database untouched");
        return Ok(summary);
    }

    let store = open_store(settings)?;
    Pipeline::new(source.as_ref(), store.as_ref(), reconciler)
        .run(start..=end)
        .await
}
