//! In-process store.

use crate::error::StoreError;
use crate::traits::{validate_rows, NonWorkdayStore};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use infra_master::NonWorkday;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Keeps the table in a sorted map; same contract as the SQL store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<Option<BTreeMap<NaiveDate, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose table already exists with `rows`.
    pub fn with_rows<I: IntoIterator<Item = NonWorkday>>(rows: I) -> Self {
        let table = rows
            .into_iter()
            .map(|r| (r.date, r.description))
            .collect();
        Self {
            table: Mutex::new(Some(table)),
        }
    }

    /// Every stored row, ascending.
    pub fn all_rows(&self) -> Vec<NonWorkday> {
        match self.lock().as_ref() {
            Some(table) => table
                .iter()
                .map(|(date, description)| NonWorkday::new(*date, description.clone()))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn has_schema(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<BTreeMap<NaiveDate, String>>> {
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn missing_table() -> StoreError {
    StoreError::QueryError("table non_workdays does not exist".to_string())
}

#[async_trait]
impl NonWorkdayStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.lock().get_or_insert_with(BTreeMap::new);
        Ok(())
    }

    async fn replace_year(&self, year: i32, rows: &[NonWorkday]) -> Result<u64, StoreError> {
        validate_rows(year, rows)?;

        let mut guard = self.lock();
        let table = guard.as_mut().ok_or_else(missing_table)?;

        table.retain(|date, _| date.year() != year);
        table.extend(rows.iter().map(|r| (r.date, r.description.clone())));
        Ok(rows.len() as u64)
    }

    async fn load_year(&self, year: i32) -> Result<Vec<NonWorkday>, StoreError> {
        let guard = self.lock();
        let table = guard.as_ref().ok_or_else(missing_table)?;

        Ok(table
            .iter()
            .filter(|(date, _)| date.year() == year)
            .map(|(date, description)| NonWorkday::new(*date, description.clone()))
            .collect())
    }
}
