//! In-memory fakes for the calendar source and record store.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use gcal_notion_core::ports::{CalendarSource, EventPage, EventQuery, RecordFilter, RecordStore};
use gcal_notion_core::record::CollectionInfo;
use gcal_notion_core::{
    CalendarEvent, EventStatus, EventTime, GcalNotionError, GcalNotionResult, RecordId, RecordPayload,
    RemoteRecord,
};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap()
}

/// Confirmed event starting `hours` after [`now`].
pub fn event_in(id: &str, hours: i64) -> CalendarEvent {
    CalendarEvent::new(id)
        .with_summary(format!("Event {id}"))
        .with_status(EventStatus::Confirmed)
        .with_start(EventTime::DateTime((now() + Duration::hours(hours)).fixed_offset()))
        .with_end(EventTime::DateTime((now() + Duration::hours(hours + 1)).fixed_offset()))
}

pub fn cancelled(id: &str) -> CalendarEvent {
    CalendarEvent::new(id).with_status(EventStatus::Cancelled)
}

/// Calendar source that serves scripted pages in order and records queries.
///
/// Every call consumes the next scripted response; `Err` entries simulate a
/// failed fetch. Once the script runs out, an empty final page is returned.
#[derive(Default)]
pub struct FakeSource {
    pages: Mutex<Vec<GcalNotionResult<EventPage>>>,
    pub queries: Mutex<Vec<EventQuery>>,
}

impl FakeSource {
    /// Source serving `events` as consecutive pages.
    pub fn paged(pages: Vec<Vec<CalendarEvent>>) -> Self {
        let count = pages.len();
        let scripted = pages
            .into_iter()
            .enumerate()
            .map(|(i, events)| {
                Ok(EventPage {
                    events,
                    next_page_token: (i + 1 < count).then(|| format!("page-{}", i + 1)),
                })
            })
            .collect();
        Self {
            pages: Mutex::new(scripted),
            queries: Mutex::default(),
        }
    }

    pub fn single(events: Vec<CalendarEvent>) -> Self {
        Self::paged(vec![events])
    }

    /// First page succeeds and points at a second page, which fails.
    pub fn failing_after(events: Vec<CalendarEvent>) -> Self {
        Self {
            pages: Mutex::new(vec![
                Ok(EventPage {
                    events,
                    next_page_token: Some("page-1".into()),
                }),
                Err(GcalNotionError::SourceApi {
                    status: 500,
                    body: "backend error".into(),
                }),
            ]),
            queries: Mutex::default(),
        }
    }

    pub fn queries(&self) -> Vec<EventQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarSource for FakeSource {
    async fn list_events(&self, query: &EventQuery) -> GcalNotionResult<EventPage> {
        self.queries.lock().unwrap().push(query.clone());
        let mut pages = self.pages.lock().unwrap();
        if pages.is_empty() {
            Ok(EventPage::default())
        } else {
            pages.remove(0)
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub id: RecordId,
    pub payload: RecordPayload,
    pub archived: bool,
}

/// Record store kept in memory. Archived records are hidden from queries.
#[derive(Default)]
pub struct FakeStore {
    pub records: Mutex<Vec<StoredRecord>>,
    /// Operations in call order, e.g. "query", "create", "update:rec-1".
    pub calls: Mutex<Vec<String>>,
    pub fail_queries: bool,
    /// Creates for these event ids are rejected.
    pub reject_creates_for: Vec<String>,
    /// Updates of these record ids are rejected.
    pub reject_updates_for: Vec<String>,
    /// Archives of these record ids are rejected.
    pub reject_archives_for: Vec<String>,
}

impl FakeStore {
    pub fn with_record(self, id: &str, gcal_id: &str) -> Self {
        self.records.lock().unwrap().push(StoredRecord {
            id: RecordId::from(id),
            payload: RecordPayload {
                properties: gcal_notion_core::RecordProperties {
                    name: format!("Existing {gcal_id}"),
                    gcal_id: gcal_id.to_string(),
                    status: "confirmed".into(),
                    date: None,
                    description: None,
                    location: None,
                    event_link: None,
                },
                parent: None,
            },
            archived: false,
        });
        self
    }

    pub fn active(&self) -> Vec<StoredRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !r.archived)
            .cloned()
            .collect()
    }

    pub fn active_for(&self, gcal_id: &str) -> Vec<StoredRecord> {
        self.active()
            .into_iter()
            .filter(|r| r.payload.properties.gcal_id == gcal_id)
            .collect()
    }

    pub fn is_archived(&self, id: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.id.as_str() == id && r.archived)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn query(&self, filter: &RecordFilter) -> GcalNotionResult<Vec<RemoteRecord>> {
        self.log("query".into());
        if self.fail_queries {
            return Err(GcalNotionError::StoreApi {
                status: 502,
                body: "bad gateway".into(),
            });
        }

        let matches = |r: &StoredRecord| match filter {
            RecordFilter::Equals { value, .. } => r.payload.properties.gcal_id == *value,
            RecordFilter::IsNotEmpty { .. } => !r.payload.properties.gcal_id.is_empty(),
        };

        Ok(self
            .active()
            .into_iter()
            .filter(matches)
            .map(|r| RemoteRecord {
                id: r.id,
                name: Some(r.payload.properties.name.clone()),
                gcal_id: Some(r.payload.properties.gcal_id.clone()),
            })
            .collect())
    }

    async fn create(&self, payload: &RecordPayload) -> GcalNotionResult<RecordId> {
        self.log("create".into());
        if payload.parent.is_none() {
            return Err(GcalNotionError::Store("create without parent".into()));
        }
        if self.reject_creates_for.contains(&payload.properties.gcal_id) {
            return Err(GcalNotionError::StoreApi {
                status: 400,
                body: "validation_error".into(),
            });
        }

        let mut records = self.records.lock().unwrap();
        let id = RecordId(format!("rec-{}", records.len() + 1));
        records.push(StoredRecord {
            id: id.clone(),
            payload: payload.clone(),
            archived: false,
        });
        Ok(id)
    }

    async fn update(&self, id: &RecordId, payload: &RecordPayload) -> GcalNotionResult<()> {
        self.log(format!("update:{id}"));
        if self.reject_updates_for.iter().any(|r| r == id.as_str()) {
            return Err(GcalNotionError::StoreApi {
                status: 409,
                body: "conflict_error".into(),
            });
        }
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or_else(|| GcalNotionError::StoreApi {
                status: 404,
                body: "object_not_found".into(),
            })?;
        record.payload.properties = payload.properties.clone();
        Ok(())
    }

    async fn archive(&self, id: &RecordId) -> GcalNotionResult<()> {
        self.log(format!("archive:{id}"));
        if self.reject_archives_for.iter().any(|r| r == id.as_str()) {
            return Err(GcalNotionError::StoreApi {
                status: 403,
                body: "restricted_resource".into(),
            });
        }
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == *id) {
            record.archived = true;
        }
        Ok(())
    }

    async fn describe(&self) -> GcalNotionResult<CollectionInfo> {
        self.log("describe".into());
        Ok(CollectionInfo {
            title: Some("Calendar".into()),
            property_names: vec!["Name".into(), "GCAL ID".into()],
        })
    }
}
