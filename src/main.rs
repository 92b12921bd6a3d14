mod commands;
mod config;
mod lock;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gcal_notion_core::date_range::DateRange;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "gcal-notion")]
#[command(about = "Sync Google Calendar events into a Notion database", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync events changed since the last pass (run this periodically)
    Sync,
    /// Create a fresh record for every event in the window, without looking
    /// for existing ones (run `clear` first)
    ForceResync,
    /// Archive every record that was synced from the calendar
    Clear,
    /// Create or update records for events in an explicit date range
    SyncRange {
        /// Start date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        from: String,

        /// End date, inclusive (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        to: String,
    },
    /// Show or change how many days ahead each pass looks
    Window {
        #[command(subcommand)]
        action: WindowAction,
    },
    /// Check that the Notion database is reachable
    Check,
}

#[derive(Subcommand)]
enum WindowAction {
    Show,
    Set {
        /// Number of days (1 to 3650)
        days: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(log_filter()).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Window { action } => match action {
            WindowAction::Show => commands::window::show(),
            WindowAction::Set { days } => commands::window::set(days),
        },
        Commands::SyncRange { from, to } => {
            let range = DateRange::from_args(&from, &to).map_err(|e| anyhow::anyhow!(e))?;
            commands::sync_range::run(&AppConfig::load()?, range).await
        }
        Commands::Sync => commands::sync::run(&AppConfig::load()?).await,
        Commands::ForceResync => commands::force_resync::run(&AppConfig::load()?).await,
        Commands::Clear => commands::clear::run(&AppConfig::load()?).await,
        Commands::Check => commands::check::run(&AppConfig::load()?).await,
    }
}

/// `info` unless `RUST_LOG` says otherwise.
fn log_filter() -> EnvFilter {
    log_filter_from(&std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default())
}

fn log_filter_from(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}
