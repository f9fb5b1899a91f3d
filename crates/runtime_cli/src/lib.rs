//! # runtime_cli
//!
//! Command-line runtime for Offday: builds the feed and store from
//! settings and drives the yearly fetch, reconcile and replace loop.
//!
//! ## Architecture Position
//!
//! Part of the **R**untime layer. Wires the adapter and infra crates
//! together; nothing depends on it.

pub mod commands;
mod error;
mod pipeline;

pub use error::{CliError, Result};
pub use pipeline::{Pipeline, RunSummary, YearOutcome};
