//! Settings and configuration structures.

use crate::error::ConfigError;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

/// Placeholder substituted with the year in [`SourceConfig::url_template`].
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// Main application settings.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Holiday data source configuration
    #[serde(default)]
    pub source: SourceConfig,
    /// Year range to process
    #[serde(default)]
    pub run: RunConfig,
    /// Retry and backoff for transient I/O failures
    #[serde(default)]
    pub retry: RetryConfig,
    /// Reconciliation options
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Logging options
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings from configuration files and environment variables.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `OFFDAY_ENV`)
    /// 3. Environment variables prefixed with `OFFDAY_`, e.g. `OFFDAY_DATABASE__HOST`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Like [`Settings::load`], with an explicit file layered above the
    /// `config/` directory and below the environment.
    pub fn load_with(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var("OFFDAY_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("OFFDAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a single TOML file, without `config/` or environment layers.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let config = Config::builder()
            .add_source(File::from(path).required(true))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run.start_year > self.run.end_year {
            return Err(ConfigError::invalid(
                "run.start_year",
                format!(
                    "start year {} is after end year {}",
                    self.run.start_year, self.run.end_year
                ),
            ));
        }

        if !self.source.url_template.contains(YEAR_PLACEHOLDER) {
            return Err(ConfigError::invalid(
                "source.url_template",
                format!("template must contain '{}'", YEAR_PLACEHOLDER),
            ));
        }

        if !is_plain_identifier(&self.database.table) {
            return Err(ConfigError::invalid(
                "database.table",
                format!("'{}' is not a plain SQL identifier", self.database.table),
            ));
        }

        if self.retry.backoff_factor < 1.0 {
            return Err(ConfigError::invalid(
                "retry.backoff_factor",
                "backoff factor must be >= 1.0",
            ));
        }

        if self.retry.max_backoff_ms < self.retry.initial_backoff_ms {
            return Err(ConfigError::invalid(
                "retry.max_backoff_ms",
                "max backoff must be >= initial backoff",
            ));
        }

        Ok(())
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// DDL flavour used when creating the destination table.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableDialect {
    /// Plain MySQL / MariaDB table with a unique key on the date.
    #[default]
    Mysql,
    /// Apache Doris unique-key table, hash distributed on the date.
    Doris,
}

/// Database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Server host name or address
    #[serde(default = "default_db_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_db_port")]
    pub port: u16,
    /// Login user
    #[serde(default = "default_db_user")]
    pub user: String,
    /// Login password
    #[serde(default)]
    pub password: String,
    /// Database (schema) name
    #[serde(default = "default_db_name")]
    pub name: String,
    /// Connection character set
    #[serde(default = "default_charset")]
    pub charset: String,
    /// Destination table name
    #[serde(default = "default_table")]
    pub table: String,
    /// DDL dialect for `CREATE TABLE`
    #[serde(default)]
    pub dialect: TableDialect,
    /// Hash buckets (Doris only)
    #[serde(default = "default_buckets")]
    pub buckets: u32,
    /// Replica count (Doris only)
    #[serde(default = "default_replication_num")]
    pub replication_num: u32,
    /// Connection timeout (in seconds)
    #[serde(default = "default_connection_timeout")]
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Connection timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Copy with the password masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.password.is_empty() {
            copy.password = "********".to_string();
        }
        copy
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: String::new(),
            name: default_db_name(),
            charset: default_charset(),
            table: default_table(),
            dialect: TableDialect::default(),
            buckets: default_buckets(),
            replication_num: default_replication_num(),
            connect_timeout_secs: default_connection_timeout(),
        }
    }
}

fn default_db_host() -> String {
    "127.0.0.1".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_user() -> String {
    "root".to_string()
}

fn default_db_name() -> String {
    "test".to_string()
}

fn default_charset() -> String {
    "utf8mb4".to_string()
}

fn default_table() -> String {
    "non_workdays".to_string()
}

fn default_buckets() -> u32 {
    2
}

fn default_replication_num() -> u32 {
    3
}

fn default_connection_timeout() -> u64 {
    30
}

/// Holiday data source configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Endpoint template; `{year}` is replaced by the four-digit year
    #[serde(default = "default_url_template")]
    pub url_template: String,
    /// Read `{data_dir}/{year}.json` instead of fetching over HTTP
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Request timeout (in seconds)
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

impl SourceConfig {
    /// Endpoint URL for one year.
    pub fn url_for(&self, year: i32) -> String {
        self.url_template
            .replace(YEAR_PLACEHOLDER, &year.to_string())
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            data_dir: None,
            timeout_secs: default_request_timeout(),
        }
    }
}

fn default_url_template() -> String {
    "http://chinese-holidays-data.basten.me/data/{year}.json".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// Inclusive range of years to process.
#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    /// First year processed
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    /// Last year processed (inclusive)
    #[serde(default = "default_end_year")]
    pub end_year: i32,
}

impl RunConfig {
    /// Years to process, ascending.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
        }
    }
}

fn default_start_year() -> i32 {
    2015
}

fn default_end_year() -> i32 {
    2024
}

/// Exponential backoff for transient network and connect failures.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables retrying
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry (in milliseconds)
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Upper bound on any single delay (in milliseconds)
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Multiplier applied per retry
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,
}

impl RetryConfig {
    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based), capped at `max_backoff_ms`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let raw = self.initial_backoff_ms as f64 * self.backoff_factor.powi(exponent);
        let capped = raw.min(self.max_backoff_ms as f64);
        Duration::from_millis(capped.round() as u64)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            backoff_factor: default_backoff_factor(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    500
}

fn default_max_backoff_ms() -> u64 {
    8_000
}

fn default_backoff_factor() -> f64 {
    2.0
}

/// Reconciliation options.
#[derive(Debug, Deserialize, Clone)]
pub struct CalendarConfig {
    /// Description written for weekend days without a holiday name
    #[serde(default = "default_weekend_label")]
    pub weekend_label: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            weekend_label: default_weekend_label(),
        }
    }
}

fn default_weekend_label() -> String {
    "weekend".to_string()
}

/// Logging options.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.database.port, 3306);
        assert_eq!(settings.database.charset, "utf8mb4");
        assert_eq!(settings.database.table, "non_workdays");
        assert_eq!(settings.run.years(), 2015..=2024);
        assert_eq!(settings.calendar.weekend_label, "weekend");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_url_for_substitutes_year() {
        let source = SourceConfig::default();
        assert_eq!(
            source.url_for(2025),
            "http://chinese-holidays-data.basten.me/data/2025.json"
        );
    }

    #[test]
    fn test_rejects_inverted_year_range() {
        let mut settings = Settings::default();
        settings.run.start_year = 2026;
        settings.run.end_year = 2020;
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "run.start_year"
        ));
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let mut settings = Settings::default();
        settings.source.url_template = "http://example.invalid/data.json".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_unsafe_table_name() {
        let mut settings = Settings::default();
        settings.database.table = "non_workdays; DROP TABLE x".to_string();
        assert!(settings.validate().is_err());

        settings.database.table = "1table".to_string();
        assert!(settings.validate().is_err());

        settings.database.table = "_holidays_cn".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let retry = RetryConfig {
            max_retries: 5,
            initial_backoff_ms: 100,
            max_backoff_ms: 350,
            backoff_factor: 2.0,
        };
        assert_eq!(retry.delay_for(1), Duration::from_millis(100));
        assert_eq!(retry.delay_for(2), Duration::from_millis(200));
        assert_eq!(retry.delay_for(3), Duration::from_millis(350));
        assert_eq!(retry.delay_for(10), Duration::from_millis(350));
    }

    #[test]
    fn test_redacted_masks_password() {
        let mut db = DatabaseConfig::default();
        db.password = "secret".to_string();
        assert_eq!(db.redacted().password, "********");
        assert_eq!(DatabaseConfig::default().redacted().password, "");
    }

    #[test]
    fn test_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[database]
host = "10.0.0.5"
dialect = "doris"

[run]
start_year = 2020
end_year = 2021

[calendar]
weekend_label = "周末"
"#
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.database.host, "10.0.0.5");
        assert_eq!(settings.database.dialect, TableDialect::Doris);
        assert_eq!(settings.database.port, 3306);
        assert_eq!(settings.run.years(), 2020..=2021);
        assert_eq!(settings.calendar.weekend_label, "周末");
    }

    #[test]
    fn test_from_file_missing() {
        let result = Settings::from_file("does/not/exist.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
