//! Check command implementation
//!
//! Validates configuration and prints the resolved settings.

use tracing::info;

use crate::Result;
use infra_config::Settings;

/// Run the check command
pub fn run(settings: &Settings) -> Result<()> {
    info!("Checking configuration...");
    settings.validate()?;

    let db = settings.database.redacted();

    println!("Offday Configuration Check");
    println!("==========================\n");

    println!("Database:");
    println!("  Address: {}:{}", db.host, db.port);
    println!("  User: {}", db.user);
    let password = if db.password.is_empty() {
        "(empty)"
    } else {
        db.password.as_str()
    };
    println!("  Password: {}", password);
    println!("  Database: {}", db.name);
    println!("  Charset: {}", db.charset);
    println!("  Table: {} ({:?})", db.table, db.dialect);
    println!("  Connect timeout: {}s", db.connect_timeout_secs);
    println!();

    println!("Holiday source:");
    match &settings.source.data_dir {
        Some(dir) => println!("  Directory: {}", dir),
        None => println!("  URL template: {}", settings.source.url_template),
    }
    println!("  Request timeout: {}s", settings.source.timeout_secs);
    println!();

    println!("Run:");
    println!(
        "  Years: {} to {}",
        settings.run.start_year, settings.run.end_year
    );
    println!("  Weekend label: {}", settings.calendar.weekend_label);
    println!(
        "  Retries: {} (backoff {}ms to {}ms, x{})",
        settings.retry.max_retries,
        settings.retry.initial_backoff_ms,
        settings.retry.max_backoff_ms,
        settings.retry.backoff_factor
    );
    println!();

    #[cfg(feature = "mysql")]
    println!("Storage backend: MySQL protocol (sqlx)");
    #[cfg(not(feature = "mysql"))]
    println!("Storage backend: none (built without the `mysql` feature; only --dry-run works)");
    println!();

    println!("All checks passed!");

    Ok(())
}
