//! Wire types of the Calendar v3 `events.list` response.
//!
//! Only the fields the sync reads are declared. Everything is optional:
//! deleted entries (`showDeleted=true`) usually carry just `id` and `status`.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEvent {
    pub id: String,
    pub summary: Option<String>,
    pub status: Option<String>,
    pub start: Option<GoogleEventTime>,
    pub end: Option<GoogleEventTime>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub conference_data: Option<GoogleConferenceData>,
    pub hangout_link: Option<String>,
    pub updated: Option<String>,
}

/// `dateTime` for timed events, `date` for all-day events.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventTime {
    pub date_time: Option<String>,
    pub date: Option<String>,
    pub time_zone: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleConferenceData {
    #[serde(default)]
    pub entry_points: Vec<GoogleEntryPoint>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEntryPoint {
    pub entry_point_type: Option<String>,
    pub uri: Option<String>,
}
