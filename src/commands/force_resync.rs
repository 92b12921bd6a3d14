use anyhow::Result;
use chrono::Utc;
use gcal_notion_core::state::{FileStateStore, StateStore};

use super::Clients;
use crate::config::{self, AppConfig};
use crate::lock;

/// Recreate a record for every live event in the window. Run `clear` first,
/// otherwise existing records are duplicated.
pub async fn run(cfg: &AppConfig) -> Result<()> {
    let _lock = lock::acquire()?;
    let clients = Clients::from_config(cfg)?;
    let state = FileStateStore::new(config::state_path()?).load()?;

    let stats = clients.syncer().force_resync(state.window_days, Utc::now()).await?;

    println!("Resynced: {}", stats);
    Ok(())
}
