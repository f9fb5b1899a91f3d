//! # adapter_feeds
//!
//! Holiday calendar feeds for Offday.
//!
//! A feed returns, for one year, the published holiday periods and make-up
//! working days as [`infra_master::HolidayEntry`] values. Two feeds are
//! provided: [`HttpHolidaySource`] reads the yearly JSON files from a
//! templated URL, [`FileHolidaySource`] reads the same files from a local
//! directory.
//!
//! ## Architecture Position
//!
//! Part of the **A**dapter layer. Depends only on `infra_master` (for the
//! entry types) and `infra_config` (for settings).
//!
//! ## Example
//!
//! ```rust,ignore
//! use adapter_feeds::{HolidaySource, HttpHolidaySource};
//!
//! let source = HttpHolidaySource::new(&settings.source, settings.retry.clone())?;
//! let entries = source.fetch_or_empty(2025).await;
//! ```

mod error;
mod file;
mod http;
mod payload;
mod source;

pub use error::FeedError;
pub use file::FileHolidaySource;
pub use http::HttpHolidaySource;
pub use payload::{parse_payload, RawHolidayRecord, RawKind};
pub use source::HolidaySource;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{FeedError, FileHolidaySource, HolidaySource, HttpHolidaySource};
}
