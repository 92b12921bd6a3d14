//! Meeting link extraction.
//!
//! Sources are searched in priority order and the first hit wins:
//! 1. Conferencing entry points (first "video" entry pointing at Zoom)
//! 2. Zoom URLs embedded in the description
//! 3. A Zoom URL in the location field
//! 4. The provider's generic meeting link, if it points at Zoom

use std::sync::LazyLock;

use regex::Regex;

use crate::event::CalendarEvent;

/// Description patterns, tried in order: join links, links ending in a
/// meeting id, personal rooms, webinar/start links.
static DESCRIPTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)https?://[a-zA-Z0-9\-.]*zoom\.us/j/\d+[^\s<>"']*"#,
        r#"(?i)https?://[a-zA-Z0-9\-.]*zoom\.us/[^\s<>"']*/\d{9,11}[^\s<>"']*"#,
        r#"(?i)https?://[a-zA-Z0-9\-.]*zoom\.us/my/[^\s<>"']*"#,
        r#"(?i)https?://[a-zA-Z0-9\-.]*zoom\.us/[ws]/\d+[^\s<>"']*"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("regex is compile-time constant"))
    .collect()
});

static LOCATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://[a-zA-Z0-9\-.]*zoom\.us/\S*").expect("regex is compile-time constant")
});

/// Where a meeting link was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    Conference,
    Description,
    Location,
    HangoutLink,
}

/// Result of scanning an event for a meeting link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingLink {
    Found { url: String, source: LinkSource },
    /// No link was extracted although the description talks about Zoom.
    MentionedButMissing,
    NotFound,
}

impl MeetingLink {
    pub fn url(&self) -> Option<&str> {
        match self {
            MeetingLink::Found { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Find the single most relevant meeting link for an event.
pub fn extract_meeting_link(event: &CalendarEvent) -> MeetingLink {
    let found = from_conference(event)
        .map(|url| (url, LinkSource::Conference))
        .or_else(|| from_description(event).map(|url| (url, LinkSource::Description)))
        .or_else(|| from_location(event).map(|url| (url, LinkSource::Location)))
        .or_else(|| from_hangout_link(event).map(|url| (url, LinkSource::HangoutLink)));

    match found {
        Some((url, source)) => MeetingLink::Found {
            url: ensure_scheme(url),
            source,
        },
        None if mentions_zoom(event) => MeetingLink::MentionedButMissing,
        None => MeetingLink::NotFound,
    }
}

fn from_conference(event: &CalendarEvent) -> Option<String> {
    event
        .conference
        .as_ref()?
        .entry_points
        .iter()
        .find(|ep| ep.entry_point_type == "video" && ep.uri.contains("zoom"))
        .map(|ep| ep.uri.clone())
}

fn from_description(event: &CalendarEvent) -> Option<String> {
    let description = event.description.as_deref()?;

    // Only the entities that can hide URL characters are decoded here
    let searchable = description
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">");

    DESCRIPTION_PATTERNS
        .iter()
        .find_map(|re| re.find(&searchable))
        .map(|m| {
            m.as_str()
                .trim_end_matches(|c: char| matches!(c, '<' | '>' | '"') || c.is_whitespace())
                .replace("&amp;", "&")
        })
}

fn from_location(event: &CalendarEvent) -> Option<String> {
    let location = event.location.as_deref()?;
    LOCATION_PATTERN.find(location).map(|m| m.as_str().to_string())
}

fn from_hangout_link(event: &CalendarEvent) -> Option<String> {
    event
        .hangout_link
        .as_ref()
        .filter(|link| link.contains("zoom"))
        .cloned()
}

fn mentions_zoom(event: &CalendarEvent) -> bool {
    event
        .description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains("zoom"))
}

fn ensure_scheme(url: String) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        format!("https://{url}")
    }
}
