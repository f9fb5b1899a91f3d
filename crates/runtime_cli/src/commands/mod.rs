//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod preview;
pub mod show;
pub mod sync;

use crate::Result;
use adapter_feeds::{FileHolidaySource, HolidaySource, HttpHolidaySource};
use infra_config::Settings;
use infra_master::NonWorkday;
use infra_store::NonWorkdayStore;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Holiday source selected by `--source-dir`, then `source.data_dir`, then HTTP.
pub fn build_source(
    settings: &Settings,
    source_dir: Option<PathBuf>,
) -> Result<Box<dyn HolidaySource>> {
    let dir = source_dir.or_else(|| settings.source.data_dir.as_ref().map(PathBuf::from));

    match dir {
        Some(dir) => {
            info!(dir = %dir.display(), "reading holiday data from files");
            Ok(Box::new(FileHolidaySource::new(dir)))
        }
        None => {
            info!(template = %settings.source.url_template, "fetching holiday data over HTTP");
            Ok(Box::new(HttpHolidaySource::new(
                &settings.source,
                settings.retry.clone(),
            )?))
        }
    }
}

/// Store for the configured database.
#[cfg(feature = "mysql")]
pub fn open_store(settings: &Settings) -> Result<Box<dyn NonWorkdayStore>> {
    Ok(Box::new(infra_store::MySqlStore::new(
        settings.database.clone(),
        settings.retry.clone(),
    )))
}

/// Store for the configured database.
#[cfg(not(feature = "mysql"))]
pub fn open_store(_settings: &Settings) -> Result<Box<dyn NonWorkdayStore>> {
    Err(crate::CliError::InvalidArgument(
        "built without the `mysql` feature; use --dry-run".to_string(),
    ))
}

fn write_rows<W: Write>(out: &mut W, rows: &[NonWorkday]) -> Result<()> {
    for row in rows {
        writeln!(out, "{}\t{}", row.date, row.description)?;
    }
    Ok(())
}
