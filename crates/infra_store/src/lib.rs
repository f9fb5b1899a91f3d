//! # infra_store
//!
//! Persistence of computed non-working days for Offday.
//!
//! The [`NonWorkdayStore`] trait owns the destination table: idempotent
//! schema creation, a transactional per-year replace (delete then bulk
//! insert), and a read-back. [`MySqlStore`] talks the MySQL protocol
//! through `sqlx` (MySQL, MariaDB and Apache Doris front ends);
//! [`MemoryStore`] keeps rows in process for tests and dry runs.
//!
//! ## Architecture Position
//!
//! Part of the **I**nfra layer. Depends on `infra_master` for the row type
//! and `infra_config` for connection settings.
//!
//! ## Example
//!
//! ```rust,ignore
//! use infra_store::{MySqlStore, NonWorkdayStore};
//!
//! let store = MySqlStore::new(settings.database.clone(), settings.retry.clone());
//! store.ensure_schema().await?;
//! store.replace_year(2025, &rows).await?;
//! ```

mod error;
mod memory;
mod schema;
mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use schema::TableSql;
pub use traits::{validate_rows, NonWorkdayStore};

#[cfg(feature = "mysql")]
mod mysql;

#[cfg(feature = "mysql")]
pub use mysql::MySqlStore;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{MemoryStore, NonWorkdayStore, StoreError};

    #[cfg(feature = "mysql")]
    pub use crate::MySqlStore;
}
