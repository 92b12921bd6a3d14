//! Seams to the two remote collaborators.
//!
//! The calendar source is a paginated, read-only event listing. The record
//! store is addressed through text-property filters and record ids. Both are
//! awaited one call at a time by the sync drivers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::GcalNotionResult;
use crate::event::CalendarEvent;
use crate::record::{CollectionInfo, RecordId, RecordPayload, RemoteRecord};

/// Parameters of one `list events` request.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub calendar_id: String,
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
    /// Only events modified at or after this instant.
    pub updated_min: Option<DateTime<Utc>>,
    /// Include cancelled (deleted) entries.
    pub show_deleted: bool,
    /// Expand recurring events into single occurrences.
    pub single_events: bool,
    pub order_by: OrderBy,
    pub max_results: u32,
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    StartTime,
    Updated,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::StartTime => "startTime",
            OrderBy::Updated => "updated",
        }
    }
}

impl EventQuery {
    /// Query for `[time_min, time_max]`, expanded into single occurrences and
    /// ordered by start time.
    pub fn window(
        calendar_id: impl Into<String>,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
        max_results: u32,
    ) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            time_min,
            time_max,
            updated_min: None,
            show_deleted: false,
            single_events: true,
            order_by: OrderBy::StartTime,
            max_results,
            page_token: None,
        }
    }
}

/// One page of events plus the token of the next page, if any.
#[derive(Debug, Clone, Default)]
pub struct EventPage {
    pub events: Vec<CalendarEvent>,
    pub next_page_token: Option<String>,
}

/// Read-only calendar event listing.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn list_events(&self, query: &EventQuery) -> GcalNotionResult<EventPage>;
}

/// Filter on a text property of the record collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    Equals { property: String, value: String },
    IsNotEmpty { property: String },
}

/// Remote record collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Non-archived records matching `filter`.
    async fn query(&self, filter: &RecordFilter) -> GcalNotionResult<Vec<RemoteRecord>>;

    /// Create a record. The payload must carry a parent.
    async fn create(&self, payload: &RecordPayload) -> GcalNotionResult<RecordId>;

    async fn update(&self, id: &RecordId, payload: &RecordPayload) -> GcalNotionResult<()>;

    /// Logically delete a record.
    async fn archive(&self, id: &RecordId) -> GcalNotionResult<()>;

    async fn describe(&self) -> GcalNotionResult<CollectionInfo>;
}
