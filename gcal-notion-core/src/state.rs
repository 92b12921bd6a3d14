//! Mutable settings persisted between passes: the watermark and the window size.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SYNC_WINDOW_DAYS, MAX_SYNC_WINDOW_DAYS};
use crate::error::{GcalNotionError, GcalNotionResult};

fn default_window_days() -> u32 {
    DEFAULT_SYNC_WINDOW_DAYS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    /// Start of the last pass that completed without a fetch error.
    /// Absent before the first successful pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,

    /// Forward look-ahead of every pass, in days.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl Default for SyncState {
    fn default() -> Self {
        SyncState {
            last_sync: None,
            window_days: DEFAULT_SYNC_WINDOW_DAYS,
        }
    }
}

impl SyncState {
    pub fn with_window_days(mut self, days: u32) -> GcalNotionResult<Self> {
        if days == 0 {
            return Err(GcalNotionError::Config(
                "Sync window must be at least one day".into(),
            ));
        }
        if days > MAX_SYNC_WINDOW_DAYS {
            return Err(GcalNotionError::Config(format!(
                "Sync window must be at most {} days",
                MAX_SYNC_WINDOW_DAYS
            )));
        }
        self.window_days = days;
        Ok(self)
    }
}

/// Storage for [`SyncState`].
pub trait StateStore: Send + Sync {
    /// Load the state, or the default when nothing was saved yet.
    fn load(&self) -> GcalNotionResult<SyncState>;

    fn save(&self, state: &SyncState) -> GcalNotionResult<()>;
}

/// TOML file backed state (e.g. ~/.config/gcal-notion/state.toml).
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> GcalNotionResult<SyncState> {
        if !self.path.exists() {
            return Ok(SyncState::default());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        toml::from_str(&contents).map_err(|e| {
            GcalNotionError::State(format!(
                "Failed to parse sync state from {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, state: &SyncState) -> GcalNotionResult<()> {
        let contents = toml::to_string_pretty(state)
            .map_err(|e| GcalNotionError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

/// In-memory state, for tests and one-off runs.
#[derive(Default)]
pub struct MemoryStateStore {
    state: Mutex<SyncState>,
}

impl MemoryStateStore {
    pub fn new(state: SyncState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> GcalNotionResult<SyncState> {
        self.state
            .lock()
            .map(|s| *s)
            .map_err(|_| GcalNotionError::State("state lock poisoned".into()))
    }

    fn save(&self, state: &SyncState) -> GcalNotionResult<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| GcalNotionError::State("state lock poisoned".into()))?;
        *guard = *state;
        Ok(())
    }
}
