use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use gcal_notion_core::ports::{CalendarSource, EventPage, EventQuery};
use gcal_notion_core::{CalendarEvent, GcalNotionError, GcalNotionResult};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::google_event::from_google::FromGoogle;
use crate::types::EventsResponse;

pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Calendar v3 client authenticated with a static OAuth access token.
pub struct GoogleCalendar {
    http: Client,
    base_url: Url,
    access_token: String,
}

impl GoogleCalendar {
    pub fn new(access_token: impl Into<String>) -> GcalNotionResult<Self> {
        Self::with_base_url(GOOGLE_CALENDAR_API_BASE, access_token)
    }

    /// Point the client at another API root (a proxy or a test server).
    pub fn with_base_url(base_url: &str, access_token: impl Into<String>) -> GcalNotionResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GcalNotionError::Config(format!("Invalid Google API base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            http: Client::new(),
            base_url,
            access_token: access_token.into(),
        })
    }

    fn events_url(&self, calendar_id: &str) -> GcalNotionResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GcalNotionError::Config(format!("Google API base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["calendars", calendar_id, "events"]);
        Ok(url)
    }
}

/// RFC 3339, UTC, millisecond precision (`2025-03-20T12:00:00.000Z`).
fn api_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn query_params(query: &EventQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("timeMin", api_timestamp(query.time_min)),
        ("timeMax", api_timestamp(query.time_max)),
        ("singleEvents", query.single_events.to_string()),
        ("orderBy", query.order_by.as_str().to_string()),
        ("maxResults", query.max_results.to_string()),
    ];

    if let Some(updated_min) = query.updated_min {
        params.push(("updatedMin", api_timestamp(updated_min)));
    }
    if query.show_deleted {
        params.push(("showDeleted", "true".to_string()));
    }
    if let Some(ref token) = query.page_token {
        params.push(("pageToken", token.clone()));
    }

    params
}

#[async_trait]
impl CalendarSource for GoogleCalendar {
    async fn list_events(&self, query: &EventQuery) -> GcalNotionResult<EventPage> {
        let url = self.events_url(&query.calendar_id)?;

        debug!(calendar_id = %query.calendar_id, page_token = ?query.page_token, "listing events");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&query_params(query))
            .send()
            .await
            .map_err(|e| GcalNotionError::Source(format!("Google API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GcalNotionError::SourceApi {
                status: status.as_u16(),
                body,
            });
        }

        let body: EventsResponse = response
            .json()
            .await
            .map_err(|e| GcalNotionError::Source(format!("Failed to parse Google response: {}", e)))?;

        Ok(EventPage {
            events: body.items.into_iter().map(CalendarEvent::from_google).collect(),
            next_page_token: body.next_page_token,
        })
    }
}
