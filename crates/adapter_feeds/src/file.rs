//! Local-directory holiday feed.

use crate::error::FeedError;
use crate::payload::parse_payload;
use crate::source::HolidaySource;
use async_trait::async_trait;
use infra_master::HolidayEntry;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads `{dir}/{year}.json` files in the published payload format.
#[derive(Debug, Clone)]
pub struct FileHolidaySource {
    dir: PathBuf,
}

impl FileHolidaySource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Payload path for `year`.
    pub fn path_for(&self, year: i32) -> PathBuf {
        self.dir.join(format!("{}.json", year))
    }
}

#[async_trait]
impl HolidaySource for FileHolidaySource {
    async fn fetch(&self, year: i32) -> Result<Vec<HolidayEntry>, FeedError> {
        let path = self.path_for(year);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FeedError::NotFound(path.display().to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let entries = parse_payload(&bytes)?;
        info!(year, entries = entries.len(), path = %path.display(), "loaded holiday data");
        Ok(entries)
    }
}
