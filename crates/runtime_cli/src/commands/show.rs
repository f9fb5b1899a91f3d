//! Show command implementation

use std::io::Write;

use infra_config::Settings;
use infra_store::NonWorkdayStore;

use super::{open_store, write_rows};
use crate::Result;

/// Print the stored rows of `year`.
pub async fn run<W: Write>(settings: &Settings, year: i32, out: &mut W) -> Result<usize> {
    let store = open_store(settings)?;
    let rows = store.load_year(year).await?;
    write_rows(out, &rows)?;
    Ok(rows.len())
}
