//! Google Calendar event source for gcal-notion.
//!
//! Talks to the Calendar v3 REST API with a bearer token and converts the
//! `events.list` response into provider-neutral [`gcal_notion_core::CalendarEvent`]s.

pub mod api;
pub mod google_event;
pub mod types;

pub use api::{GOOGLE_CALENDAR_API_BASE, GoogleCalendar};
