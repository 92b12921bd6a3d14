use anyhow::{Context, Result};
use gcal_notion_core::state::{FileStateStore, StateStore};

use crate::config;
use crate::lock;

pub fn show() -> Result<()> {
    let state = FileStateStore::new(config::state_path()?).load()?;
    println!("Sync window: {} days", state.window_days);
    Ok(())
}

pub fn set(days: u32) -> Result<()> {
    let _lock = lock::acquire()?;
    let states = FileStateStore::new(config::state_path()?);

    let state = states.load()?.with_window_days(days)?;
    states
        .save(&state)
        .with_context(|| format!("Failed to save state to {}", states.path().display()))?;

    println!("Sync window set to {} days", state.window_days);
    Ok(())
}
