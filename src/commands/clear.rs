use anyhow::Result;

use super::Clients;
use crate::config::AppConfig;
use crate::lock;

/// Archive every record that came from the calendar.
pub async fn run(cfg: &AppConfig) -> Result<()> {
    let _lock = lock::acquire()?;
    let clients = Clients::from_config(cfg)?;

    let stats = clients.syncer().clear_synced_records().await?;

    println!("Archived {} records ({} failed)", stats.archived, stats.failed);
    if stats.archived > 0 {
        println!("Empty the trash in Notion to delete them permanently.");
    }
    Ok(())
}
