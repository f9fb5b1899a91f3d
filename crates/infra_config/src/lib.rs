//! # infra_config
//!
//! Runtime settings for the Offday non-workday loader.
//!
//! Settings are layered from built-in defaults, optional TOML files under
//! `config/`, an explicit file passed by the caller, and `OFFDAY_`-prefixed
//! environment variables. The resulting [`Settings`] value is passed into
//! the feed and store constructors; nothing reads process-wide state after
//! loading.
//!
//! ## Architecture Position
//!
//! Part of the **I**nfra layer. Depends on no other workspace crate.
//!
//! ## Example
//!
//! ```rust,ignore
//! use infra_config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Years: {:?}", settings.run.years());
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    CalendarConfig, DatabaseConfig, LoggingConfig, RetryConfig, RunConfig, Settings, SourceConfig,
    TableDialect, YEAR_PLACEHOLDER,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CalendarConfig, ConfigError, DatabaseConfig, LoggingConfig, RetryConfig, RunConfig,
        Settings, SourceConfig, TableDialect,
    };
}
