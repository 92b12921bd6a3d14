use anyhow::Result;
use gcal_notion_core::date_range::DateRange;

use super::Clients;
use crate::config::AppConfig;
use crate::lock;

pub async fn run(cfg: &AppConfig, range: DateRange) -> Result<()> {
    let _lock = lock::acquire()?;
    let clients = Clients::from_config(cfg)?;

    let stats = clients.syncer().sync_range(&range).await?;

    println!("Synced {} to {}: {}", range.from, range.to, stats);
    Ok(())
}
