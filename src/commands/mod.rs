pub mod check;
pub mod clear;
pub mod force_resync;
pub mod sync;
pub mod sync_range;
pub mod window;

use anyhow::Result;
use gcal_notion_core::sync::Syncer;
use gcal_notion_provider_google::GoogleCalendar;
use gcal_notion_store_notion::NotionStore;

use crate::config::AppConfig;

/// The two remote collaborators, built from the loaded config.
pub struct Clients {
    source: GoogleCalendar,
    store: NotionStore,
    calendar_id: String,
}

impl Clients {
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        Ok(Clients {
            source: GoogleCalendar::with_base_url(&cfg.google_api_base, cfg.google_access_token.as_str())?,
            store: NotionStore::with_base_url(
                &cfg.notion_api_base,
                cfg.notion_token.as_str(),
                cfg.database_id.as_str(),
            )?,
            calendar_id: cfg.calendar_id.clone(),
        })
    }

    pub fn syncer(&self) -> Syncer<'_> {
        Syncer::new(
            &self.source,
            &self.store,
            self.calendar_id.as_str(),
            self.store.database_id(),
        )
    }
}
