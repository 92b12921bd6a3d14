//! Provider-neutral calendar event types.
//!
//! The calendar source converts its API responses into these types; the
//! mapper and reconciler work exclusively with them. Every field except the
//! identifier is optional because deleted entries returned by the provider
//! often carry nothing but an id and a status.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event (read-only input to the sync).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Stable identifier, unique within the source calendar. This is the
    /// correlation key stored on every derived record.
    pub id: String,
    pub summary: Option<String>,
    pub status: Option<EventStatus>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    /// Raw description; may contain HTML markup.
    pub description: Option<String>,
    pub location: Option<String>,
    /// Structured conferencing metadata (entry points).
    pub conference: Option<ConferenceData>,
    /// Generic provider-supplied meeting link.
    pub hangout_link: Option<String>,
    /// Last modification time on the provider side.
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConferenceData {
    pub entry_points: Vec<EntryPoint>,
}

/// One way of joining a conference ("video", "phone", "more", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub entry_point_type: String,
    pub uri: String,
}

/// Start or end of an event: either a timestamp or an all-day date.
///
/// Timestamps keep the offset the provider sent; nothing is normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

impl EventTime {
    /// Instant used for window checks. All-day dates resolve to midnight UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            EventTime::DateTime(dt) => dt.with_timezone(&Utc),
            EventTime::Date(d) => d.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }

    /// Value written to the record store's date property.
    ///
    /// Timestamps are re-serialized from the parsed value: the instant and
    /// offset are kept, but a `Z` suffix is written as `+00:00` and whole
    /// seconds drop any fractional part.
    pub fn to_store_string(&self) -> String {
        match self {
            EventTime::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            EventTime::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_store_string())
    }
}

impl EventStatus {
    /// Parse the provider's status string. Unknown values count as confirmed.
    pub fn from_provider_str(s: &str) -> Self {
        match s {
            "tentative" => EventStatus::Tentative,
            "cancelled" => EventStatus::Cancelled,
            _ => EventStatus::Confirmed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "confirmed",
            EventStatus::Tentative => "tentative",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CalendarEvent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_start(mut self, start: EventTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: EventTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_entry_point(mut self, entry_point_type: &str, uri: &str) -> Self {
        self.conference
            .get_or_insert_with(ConferenceData::default)
            .entry_points
            .push(EntryPoint {
                entry_point_type: entry_point_type.to_string(),
                uri: uri.to_string(),
            });
        self
    }

    pub fn with_hangout_link(mut self, link: impl Into<String>) -> Self {
        self.hangout_link = Some(link.into());
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == Some(EventStatus::Cancelled)
    }

    /// Title for logs and records; empty or missing titles become "No Title".
    pub fn title(&self) -> &str {
        match self.summary.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => crate::constants::DEFAULT_TITLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn date_only_resolves_to_midnight_utc() {
        let time = EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(
            time.to_utc(),
            Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap()
        );
        assert_eq!(time.to_store_string(), "2025-03-20");
    }

    #[test]
    fn utc_suffix_is_written_as_zero_offset() {
        let dt = DateTime::parse_from_rfc3339("2025-03-20T10:00:00Z").unwrap();
        let time = EventTime::DateTime(dt);
        assert_eq!(time.to_store_string(), "2025-03-20T10:00:00+00:00");

        let dt = DateTime::parse_from_rfc3339("2025-03-20T10:00:00.000Z").unwrap();
        assert_eq!(EventTime::DateTime(dt).to_store_string(), "2025-03-20T10:00:00+00:00");
    }

    #[test]
    fn datetime_keeps_provider_offset() {
        let dt = DateTime::parse_from_rfc3339("2025-03-20T10:00:00-07:00").unwrap();
        let time = EventTime::DateTime(dt);
        assert_eq!(time.to_store_string(), "2025-03-20T10:00:00-07:00");
        assert_eq!(
            time.to_utc(),
            Utc.with_ymd_and_hms(2025, 3, 20, 17, 0, 0).unwrap()
        );
    }

    #[test]
    fn unknown_status_counts_as_confirmed() {
        assert_eq!(EventStatus::from_provider_str("cancelled"), EventStatus::Cancelled);
        assert_eq!(EventStatus::from_provider_str("tentative"), EventStatus::Tentative);
        assert_eq!(EventStatus::from_provider_str("weird"), EventStatus::Confirmed);
    }

    #[test]
    fn empty_summary_falls_back_to_default_title() {
        assert_eq!(CalendarEvent::new("a").title(), "No Title");
        assert_eq!(CalendarEvent::new("a").with_summary("").title(), "No Title");
        assert_eq!(CalendarEvent::new("a").with_summary("Standup").title(), "Standup");
    }
}
