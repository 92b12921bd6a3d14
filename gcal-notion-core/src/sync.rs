//! Sync drivers: the periodic pass and the manual entry points.
//!
//! Every driver walks the calendar source page by page and hands each event
//! to the [`Reconciler`] before the next one is looked at. Nothing here runs
//! concurrently.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::constants::{PROP_GCAL_ID, RESYNC_PAGE_SIZE, SYNC_PAGE_SIZE};
use crate::date_range::DateRange;
use crate::error::GcalNotionResult;
use crate::event::CalendarEvent;
use crate::mapper::RecordMapper;
use crate::ports::{CalendarSource, EventQuery, RecordFilter, RecordStore};
use crate::reconcile::{Outcome, Reconciler, SyncStats};
use crate::record::CollectionInfo;
use crate::state::{StateStore, SyncState};

/// Result of a completed periodic pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// State to persist: same window size, watermark moved to the pass start.
    pub state: SyncState,
    pub stats: SyncStats,
}

pub struct Syncer<'a> {
    source: &'a dyn CalendarSource,
    store: &'a dyn RecordStore,
    reconciler: Reconciler<'a>,
    calendar_id: String,
}

impl<'a> Syncer<'a> {
    pub fn new(
        source: &'a dyn CalendarSource,
        store: &'a dyn RecordStore,
        calendar_id: impl Into<String>,
        collection_id: impl Into<String>,
    ) -> Self {
        Self {
            source,
            store,
            reconciler: Reconciler::new(store, RecordMapper::new(collection_id)),
            calendar_id: calendar_id.into(),
        }
    }

    /// Run one periodic pass starting at `now`.
    ///
    /// Fetches `[now, now + window_days]`, limited to events changed since the
    /// watermark, including deleted entries. A fetch failure on any page aborts
    /// the pass and returns the error; the caller keeps its old state.
    pub async fn run_pass(&self, state: &SyncState, now: DateTime<Utc>) -> GcalNotionResult<PassReport> {
        let window = DateRange::window(now, state.window_days)?;
        let mut query = EventQuery::window(&self.calendar_id, window.from, window.to, SYNC_PAGE_SIZE);
        query.updated_min = state.last_sync;
        query.show_deleted = true;

        info!(
            from = %window.from,
            to = %window.to,
            updated_min = ?state.last_sync,
            "syncing events"
        );

        let mut stats = SyncStats::default();
        let mut pages = Pages::new(self.source, query);

        while let Some(page) = pages.next_page().await {
            let events = page.inspect_err(|e| {
                error!(error = %e, "failed to fetch calendar events, aborting pass");
            })?;

            for event in &events {
                let outcome = self.reconciler.reconcile(event, &window).await;
                stats.record(&outcome);
            }
        }

        info!(
            processed = stats.processed(),
            window_days = state.window_days,
            %stats,
            "sync completed successfully"
        );

        Ok(PassReport {
            state: SyncState {
                last_sync: Some(now),
                window_days: state.window_days,
            },
            stats,
        })
    }

    /// Load state, run a pass, and persist the new state only if the pass
    /// completed.
    pub async fn sync(&self, states: &dyn StateStore, now: DateTime<Utc>) -> GcalNotionResult<PassReport> {
        let state = states.load()?;
        let report = self.run_pass(&state, now).await?;
        states.save(&report.state)?;
        Ok(report)
    }

    /// Create a fresh record for every non-cancelled event in the window,
    /// without looking for existing ones. Meant to rebuild the collection
    /// after its records were cleared; otherwise it produces duplicates.
    pub async fn force_resync(&self, window_days: u32, now: DateTime<Utc>) -> GcalNotionResult<SyncStats> {
        let window = DateRange::window(now, window_days)?;
        let query = EventQuery::window(&self.calendar_id, window.from, window.to, RESYNC_PAGE_SIZE);

        info!(from = %window.from, to = %window.to, "force resyncing events");

        let mut stats = SyncStats::default();
        let mut pages = Pages::new(self.source, query);

        while let Some(page) = pages.next_page().await {
            let events = page.inspect_err(|e| error!(error = %e, "error during force resync"))?;
            debug!(count = events.len(), "found events to resync");

            for event in events.iter().filter(|e| !e.is_cancelled()) {
                info!(event_id = %event.id, title = event.title(), "creating fresh record");
                let outcome = self.reconciler.create(event).await;
                stats.record(&outcome);
            }
        }

        info!(created = stats.created, %stats, "force resync completed");
        Ok(stats)
    }

    /// Create-or-update every non-cancelled event in an arbitrary range.
    /// Cancelled events are counted as skipped. No check against the current
    /// time is made.
    pub async fn sync_range(&self, range: &DateRange) -> GcalNotionResult<SyncStats> {
        let query = EventQuery::window(&self.calendar_id, range.from, range.to, SYNC_PAGE_SIZE);

        info!(from = %range.from, to = %range.to, "syncing date range");

        let mut stats = SyncStats::default();
        let mut fetched = 0;
        let mut pages = Pages::new(self.source, query);

        while let Some(page) = pages.next_page().await {
            let events = page.inspect_err(|e| error!(error = %e, "error syncing date range"))?;
            fetched += events.len();

            for event in &events {
                let outcome = if event.is_cancelled() {
                    debug!(event_id = %event.id, "skipping cancelled event");
                    Outcome::Skipped
                } else {
                    self.reconciler.create_or_update(event).await
                };
                stats.record(&outcome);
            }
        }

        if fetched == 0 {
            info!("no events found in specified date range");
        } else {
            info!(fetched, %stats, "date range sync completed");
        }
        Ok(stats)
    }

    /// Archive every record that carries a calendar event id.
    pub async fn clear_synced_records(&self) -> GcalNotionResult<SyncStats> {
        let filter = RecordFilter::IsNotEmpty {
            property: PROP_GCAL_ID.to_string(),
        };
        let records = self
            .store
            .query(&filter)
            .await
            .inspect_err(|e| error!(error = %e, "error clearing events"))?;

        let mut stats = SyncStats::default();

        if records.is_empty() {
            info!("no synced events found to clear");
            return Ok(stats);
        }

        info!(count = records.len(), "found synced events to archive");

        for record in &records {
            let name = record.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Unnamed");
            match self.store.archive(&record.id).await {
                Ok(()) => {
                    info!(record_id = %record.id, name, "archived");
                    stats.archived += 1;
                }
                Err(e) => {
                    error!(record_id = %record.id, name, error = %e, "failed to archive record");
                    stats.failed += 1;
                }
            }
        }

        info!(%stats, "all synced events have been archived; empty the trash to delete them permanently");
        Ok(stats)
    }

    /// Read the target collection and report its title and columns.
    pub async fn check_connection(&self) -> GcalNotionResult<CollectionInfo> {
        match self.store.describe().await {
            Ok(info) => {
                info!(
                    title = info.title.as_deref().unwrap_or("Untitled"),
                    properties = ?info.property_names,
                    "successfully connected to database"
                );
                Ok(info)
            }
            Err(e) => {
                error!(error = %e, "failed to connect to database");
                Err(e)
            }
        }
    }
}

/// Cursor over the pages of one event query.
struct Pages<'s> {
    source: &'s dyn CalendarSource,
    query: EventQuery,
    done: bool,
}

impl<'s> Pages<'s> {
    fn new(source: &'s dyn CalendarSource, query: EventQuery) -> Self {
        Self {
            source,
            query,
            done: false,
        }
    }

    /// Fetch the next page. Yields `None` after the last page or after an error.
    async fn next_page(&mut self) -> Option<GcalNotionResult<Vec<CalendarEvent>>> {
        if self.done {
            return None;
        }

        match self.source.list_events(&self.query).await {
            Ok(page) => {
                debug!(
                    count = page.events.len(),
                    has_next = page.next_page_token.is_some(),
                    "fetched page of events"
                );
                match page.next_page_token.filter(|t| !t.is_empty()) {
                    Some(token) => self.query.page_token = Some(token),
                    None => self.done = true,
                }
                Some(Ok(page.events))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
