use chrono::{DateTime, NaiveDate, Utc};
use gcal_notion_core::{CalendarEvent, ConferenceData, EntryPoint, EventStatus, EventTime};
use tracing::warn;

use crate::types::{GoogleConferenceData, GoogleEvent, GoogleEventTime};

pub trait FromGoogle<T> {
    fn from_google(value: T) -> Self;
}

impl FromGoogle<GoogleEvent> for CalendarEvent {
    fn from_google(event: GoogleEvent) -> Self {
        let start = event
            .start
            .as_ref()
            .and_then(|t| parse_event_time(t, &event.id, "start"));
        let end = event
            .end
            .as_ref()
            .and_then(|t| parse_event_time(t, &event.id, "end"));

        let updated = event.updated.as_deref().and_then(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .inspect_err(|e| warn!(event_id = %event.id, value = s, error = %e, "unparseable updated time"))
                .ok()
        });

        CalendarEvent {
            status: event.status.as_deref().map(EventStatus::from_provider_str),
            conference: event.conference_data.map(ConferenceData::from_google),
            summary: event.summary,
            start,
            end,
            description: event.description,
            location: event.location,
            hangout_link: event.hangout_link,
            updated,
            id: event.id,
        }
    }
}

impl FromGoogle<GoogleConferenceData> for ConferenceData {
    fn from_google(data: GoogleConferenceData) -> Self {
        let entry_points = data
            .entry_points
            .into_iter()
            .filter_map(|ep| {
                Some(EntryPoint {
                    entry_point_type: ep.entry_point_type?,
                    uri: ep.uri?,
                })
            })
            .collect();

        ConferenceData { entry_points }
    }
}

/// `dateTime` wins over `date`. A value that does not parse is logged and
/// treated as absent.
fn parse_event_time(time: &GoogleEventTime, event_id: &str, which: &str) -> Option<EventTime> {
    if let Some(ref s) = time.date_time {
        return match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Some(EventTime::DateTime(dt)),
            Err(e) => {
                warn!(event_id, which, value = %s, error = %e, "unparseable event time");
                None
            }
        };
    }

    let s = time.date.as_ref()?;
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(d) => Some(EventTime::Date(d)),
        Err(e) => {
            warn!(event_id, which, value = %s, error = %e, "unparseable event date");
            None
        }
    }
}
