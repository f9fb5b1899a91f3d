//! Preview command implementation
//!
//! Fetches and reconciles one year and prints the rows without touching
//! the database.

use std::io::Write;
use std::path::PathBuf;

use adapter_feeds::HolidaySource;
use infra_config::Settings;
use infra_master::Reconciler;

use super::{build_source, write_rows};
use crate::Result;

/// Run the preview command, writing `date<TAB>description` lines to `out`.
pub async fn run<W: Write>(
    settings: &Settings,
    year: i32,
    source_dir: Option<PathBuf>,
    out: &mut W,
) -> Result<usize> {
    let source = build_source(settings, source_dir)?;
    let entries = source.fetch(year).await?;

    let rows = Reconciler::with_weekend_label(&settings.calendar.weekend_label)
        .compute_year(year, &entries);
    write_rows(out, &rows)?;

    Ok(rows.len())
}
