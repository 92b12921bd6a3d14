//! Per-event create / update / archive decisions.

use std::fmt;

use tracing::{error, info, warn};

use crate::date_range::DateRange;
use crate::event::CalendarEvent;
use crate::mapper::RecordMapper;
use crate::ports::RecordStore;
use crate::record::RecordId;
use crate::resolver::CorrelationResolver;

/// Terminal result of reconciling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Start outside the active window; the store was not contacted.
    Skipped,
    Created(RecordId),
    Updated(RecordId),
    Archived(RecordId),
    /// Cancelled event with no matching record.
    NothingToArchive,
    /// The store rejected the write; details were logged.
    Failed,
}

/// Counters for one driver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub created: usize,
    pub updated: usize,
    pub archived: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncStats {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped => self.skipped += 1,
            Outcome::Created(_) => self.created += 1,
            Outcome::Updated(_) => self.updated += 1,
            Outcome::Archived(_) => self.archived += 1,
            Outcome::NothingToArchive => {}
            Outcome::Failed => self.failed += 1,
        }
    }

    /// Events that produced or refreshed a record.
    pub fn processed(&self) -> usize {
        self.created + self.updated
    }
}

impl fmt::Display for SyncStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} archived, {} skipped, {} failed",
            self.created, self.updated, self.archived, self.skipped, self.failed
        )
    }
}

pub struct Reconciler<'a> {
    store: &'a dyn RecordStore,
    mapper: RecordMapper,
}

impl<'a> Reconciler<'a> {
    pub fn new(store: &'a dyn RecordStore, mapper: RecordMapper) -> Self {
        Self { store, mapper }
    }

    /// Periodic-pass entry: skip events outside `window`, archive cancelled
    /// events, create-or-update the rest.
    pub async fn reconcile(&self, event: &CalendarEvent, window: &DateRange) -> Outcome {
        if window.excludes(event) {
            warn!(
                event_id = %event.id,
                title = event.title(),
                start = ?event.start.as_ref().map(|s| s.to_string()),
                "skipping event outside sync window"
            );
            return Outcome::Skipped;
        }

        if event.is_cancelled() {
            self.archive_event(event).await
        } else {
            self.create_or_update(event).await
        }
    }

    /// Update the correlated record if one exists, otherwise create one.
    pub async fn create_or_update(&self, event: &CalendarEvent) -> Outcome {
        match CorrelationResolver::new(self.store).resolve(&event.id).await {
            Some(record_id) => {
                info!(event_id = %event.id, title = event.title(), "updating existing record");
                self.update(event, record_id).await
            }
            None => {
                info!(event_id = %event.id, title = event.title(), "creating new record");
                self.create(event).await
            }
        }
    }

    /// Create a record without looking for an existing one.
    pub async fn create(&self, event: &CalendarEvent) -> Outcome {
        let payload = self.mapper.map(event, None);

        match self.store.create(&payload).await {
            Ok(record_id) => {
                info!(event_id = %event.id, record_id = %record_id, "created record");
                Outcome::Created(record_id)
            }
            Err(e) => {
                error!(event_id = %event.id, title = event.title(), error = %e, "failed to create record");
                Outcome::Failed
            }
        }
    }

    async fn update(&self, event: &CalendarEvent, record_id: RecordId) -> Outcome {
        let payload = self.mapper.map(event, Some(&record_id));

        match self.store.update(&record_id, &payload).await {
            Ok(()) => {
                info!(event_id = %event.id, record_id = %record_id, "updated record");
                Outcome::Updated(record_id)
            }
            Err(e) => {
                error!(
                    event_id = %event.id,
                    record_id = %record_id,
                    error = %e,
                    "failed to update record"
                );
                Outcome::Failed
            }
        }
    }

    /// Archive the record correlated with a cancelled event, if any.
    pub async fn archive_event(&self, event: &CalendarEvent) -> Outcome {
        let Some(record_id) = CorrelationResolver::new(self.store).resolve(&event.id).await else {
            info!(event_id = %event.id, "no record found for cancelled event, nothing to archive");
            return Outcome::NothingToArchive;
        };

        match self.store.archive(&record_id).await {
            Ok(()) => {
                info!(event_id = %event.id, record_id = %record_id, "archived record");
                Outcome::Archived(record_id)
            }
            Err(e) => {
                error!(
                    event_id = %event.id,
                    record_id = %record_id,
                    error = %e,
                    "failed to archive record"
                );
                Outcome::Failed
            }
        }
    }
}
