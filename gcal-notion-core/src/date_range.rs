//! Time ranges used to query and filter events.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::error::{GcalNotionError, GcalNotionResult};
use crate::event::CalendarEvent;

/// Closed time range `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    /// Forward-looking sync window: `[now, now + days]`.
    pub fn window(now: DateTime<Utc>, days: u32) -> GcalNotionResult<Self> {
        let to = now
            .checked_add_signed(Duration::days(i64::from(days)))
            .ok_or_else(|| {
                GcalNotionError::Config(format!("Sync window of {} days is out of range", days))
            })?;

        Ok(DateRange { from: now, to })
    }

    /// Parse caller-supplied bounds for a manual sync.
    /// Each bound is either YYYY-MM-DD (start/end of day UTC) or RFC 3339.
    pub fn from_args(from: &str, to: &str) -> Result<Self, String> {
        let from = parse_bound(from, NaiveTime::MIN)?;
        let to = parse_bound(to, end_of_day())?;

        if to < from {
            return Err(format!("Range end {} is before its start {}", to, from));
        }

        Ok(DateRange { from, to })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.from && instant <= self.to
    }

    /// Whether an event's resolved start lies outside the range.
    ///
    /// Events without a start (deleted entries often have none) are never
    /// considered outside.
    pub fn excludes(&self, event: &CalendarEvent) -> bool {
        event
            .start
            .as_ref()
            .is_some_and(|start| !self.contains(start.to_utc()))
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

fn parse_bound(s: &str, time_of_day: NaiveTime) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        format!("Invalid date '{}'. Expected YYYY-MM-DD or an RFC 3339 timestamp", s)
    })?;
    Ok(date.and_time(time_of_day).and_utc())
}
