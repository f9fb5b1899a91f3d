//! MySQL-protocol backend for infra_store.
//!
//! Works against MySQL, MariaDB and Apache Doris front ends using sqlx.
//! Every operation opens its own connection and closes it before
//! returning, whether the operation succeeded or not.

use crate::error::StoreError;
use crate::schema::TableSql;
use crate::traits::{validate_rows, NonWorkdayStore};
use async_trait::async_trait;
use chrono::NaiveDate;
use infra_config::{DatabaseConfig, RetryConfig};
use infra_master::NonWorkday;
use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlConnection};
use sqlx::{Connection, QueryBuilder};
use tracing::{debug, info, warn};

/// MySQL-backed store implementation.
pub struct MySqlStore {
    config: DatabaseConfig,
    retry: RetryConfig,
    sql: TableSql,
}

impl MySqlStore {
    /// Create a store for the configured table. No connection is opened.
    pub fn new(config: DatabaseConfig, retry: RetryConfig) -> Self {
        let sql = TableSql::new(&config);
        Self { config, retry, sql }
    }

    /// Statements issued against the table.
    pub fn sql(&self) -> &TableSql {
        &self.sql
    }

    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.user)
            .password(&self.config.password)
            .database(&self.config.name)
            .charset(&self.config.charset)
    }

    async fn connect_once(
        &self,
        options: &MySqlConnectOptions,
    ) -> Result<MySqlConnection, StoreError> {
        let timeout = self.config.connect_timeout();
        match tokio::time::timeout(timeout, MySqlConnection::connect_with(options)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(StoreError::ConnectionError(format!(
                "connecting to {}:{} timed out after {:?}",
                self.config.host, self.config.port, timeout
            ))),
        }
    }

    /// Open a connection, retrying transient failures with backoff.
    async fn connect(&self) -> Result<MySqlConnection, StoreError> {
        let options = self.connect_options();
        let mut attempt = 0;

        loop {
            match self.connect_once(&options).await {
                Ok(conn) => return Ok(conn),
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    warn!(error = %e, attempt, ?delay, "database connect failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn close(conn: MySqlConnection) {
        if let Err(e) = conn.close().await {
            warn!(error = %e, "failed to close database connection cleanly");
        }
    }

    async fn replace_in(
        &self,
        conn: &mut MySqlConnection,
        year: i32,
        rows: &[NonWorkday],
    ) -> Result<u64, StoreError> {
        // Dropping `tx` on any early return rolls the transaction back.
        let mut tx = conn.begin().await?;

        let deleted = sqlx::query(&self.sql.delete_year)
            .bind(year)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        debug!(year, deleted, "cleared previous rows");

        let mut inserted = 0;
        if !rows.is_empty() {
            let mut builder = QueryBuilder::<MySql>::new(self.sql.insert_prefix.as_str());
            builder.push_values(rows, |mut b, row| {
                b.push_bind(row.date).push_bind(row.description.clone());
            });
            inserted = builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}

#[async_trait]
impl NonWorkdayStore for MySqlStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(&self.sql.create).execute(&mut conn).await;
        Self::close(conn).await;

        result?;
        info!(table = %self.config.table, "schema ready");
        Ok(())
    }

    async fn replace_year(&self, year: i32, rows: &[NonWorkday]) -> Result<u64, StoreError> {
        validate_rows(year, rows)?;

        let mut conn = self.connect().await?;
        let result = self.replace_in(&mut conn, year, rows).await;
        Self::close(conn).await;

        let inserted = result?;
        info!(year, inserted, table = %self.config.table, "replaced non-workdays");
        Ok(inserted)
    }

    async fn load_year(&self, year: i32) -> Result<Vec<NonWorkday>, StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query_as::<_, (NaiveDate, Option<String>)>(&self.sql.select_year)
            .bind(year)
            .fetch_all(&mut conn)
            .await;
        Self::close(conn).await;

        Ok(result?
            .into_iter()
            .map(|(date, description)| NonWorkday::new(date, description.unwrap_or_default()))
            .collect())
    }
}
