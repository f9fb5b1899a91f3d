//! `offday`: recompute non-working days per year and load them into the database.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use infra_config::Settings;
use runtime_cli::commands::{self, sync::SyncOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "offday",
    version,
    about = "Compute weekend and public-holiday non-workdays per year and store them"
)]
struct Cli {
    /// Settings file layered over config/ and under OFFDAY_* variables
    #[arg(long, short, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, reconcile and replace every year in range (default)
    Sync {
        /// First year (defaults to run.start_year)
        #[arg(long)]
        from: Option<i32>,
        /// Last year, inclusive (defaults to run.end_year)
        #[arg(long)]
        to: Option<i32>,
        /// Read {year}.json files from this directory instead of the configured source
        #[arg(long, value_name = "DIR")]
        source_dir: Option<PathBuf>,
        /// Reconcile without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the computed non-workdays of one year without storing them
    Preview {
        #[arg(long)]
        year: i32,
        #[arg(long, value_name = "DIR")]
        source_dir: Option<PathBuf>,
    },
    /// Print the stored non-workdays of one year
    Show {
        #[arg(long)]
        year: i32,
    },
    /// Validate configuration and print the resolved settings
    Check,
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load_with(cli.config.as_deref())?;
    init_logging(&settings);

    let command = cli.command.unwrap_or(Command::Sync {
        from: None,
        to: None,
        source_dir: None,
        dry_run: false,
    });

    match command {
        Command::Sync {
            from,
            to,
            source_dir,
            dry_run,
        } => {
            let options = SyncOptions {
                from,
                to,
                source_dir,
                dry_run,
            };
            commands::sync::run(&settings, options).await?;
        }
        Command::Preview { year, source_dir } => {
            let mut stdout = std::io::stdout().lock();
            commands::preview::run(&settings, year, source_dir, &mut stdout).await?;
        }
        Command::Show { year } => {
            let mut stdout = std::io::stdout().lock();
            commands::show::run(&settings, year, &mut stdout).await?;
        }
        Command::Check => commands::check::run(&settings)?,
    }

    Ok(())
}
