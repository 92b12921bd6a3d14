use anyhow::{Context, Result};
use chrono::Utc;
use gcal_notion_core::state::FileStateStore;

use super::Clients;
use crate::config::{self, AppConfig};
use crate::lock;

/// One periodic pass: changes since the last successful pass, within the
/// configured window.
pub async fn run(cfg: &AppConfig) -> Result<()> {
    let _lock = lock::acquire()?;
    let clients = Clients::from_config(cfg)?;
    let states = FileStateStore::new(config::state_path()?);

    let report = clients
        .syncer()
        .sync(&states, Utc::now())
        .await
        .context("Sync pass failed; the watermark was left unchanged")?;

    println!("Synced: {}", report.stats);
    Ok(())
}
