//! Calendar event → record property mapping.

use tracing::{debug, warn};

use crate::event::{CalendarEvent, EventStatus};
use crate::meeting_link::{MeetingLink, extract_meeting_link};
use crate::record::{DateProperty, Parent, RecordId, RecordPayload, RecordProperties};
use crate::sanitize::sanitize_description;

/// Builds store payloads for one target collection.
#[derive(Debug, Clone)]
pub struct RecordMapper {
    collection_id: String,
}

impl RecordMapper {
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
        }
    }

    /// Map an event to a payload. With no `existing` record the payload
    /// targets the collection as parent (creation); otherwise it has none.
    pub fn map(&self, event: &CalendarEvent, existing: Option<&RecordId>) -> RecordPayload {
        let parent = match existing {
            Some(_) => None,
            None => Some(Parent {
                collection_id: self.collection_id.clone(),
            }),
        };

        RecordPayload {
            properties: map_properties(event),
            parent,
        }
    }
}

fn map_properties(event: &CalendarEvent) -> RecordProperties {
    let date = event.start.as_ref().map(|start| DateProperty {
        start: start.clone(),
        end: event.end.clone().unwrap_or_else(|| start.clone()),
    });

    let description = event
        .description
        .as_deref()
        .map(sanitize_description)
        .filter(|d| !d.is_empty());

    let location = event.location.clone().filter(|l| !l.is_empty());

    let event_link = match extract_meeting_link(event) {
        MeetingLink::Found { url, source } => {
            debug!(event_id = %event.id, title = event.title(), %url, ?source, "found meeting link");
            Some(url)
        }
        MeetingLink::MentionedButMissing => {
            warn!(
                event_id = %event.id,
                title = event.title(),
                "event mentions Zoom but no link could be extracted"
            );
            None
        }
        MeetingLink::NotFound => None,
    };

    RecordProperties {
        name: event.title().to_string(),
        gcal_id: event.id.clone(),
        status: event.status.unwrap_or(EventStatus::Confirmed).as_str().to_string(),
        date,
        description,
        location,
        event_link,
    }
}
