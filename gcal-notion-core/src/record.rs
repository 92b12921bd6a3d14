//! Record store types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::EventTime;

/// Store-assigned, opaque record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

/// A record as returned by a store query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub id: RecordId,
    pub name: Option<String>,
    pub gcal_id: Option<String>,
}

/// Date property value. `end` equals `start` when the event has no end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateProperty {
    pub start: EventTime,
    pub end: EventTime,
}

/// The fixed property set written for every synced event.
///
/// Optional properties are omitted from the payload entirely when `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordProperties {
    pub name: String,
    /// Calendar event identifier; the correlation key.
    pub gcal_id: String,
    pub status: String,
    pub date: Option<DateProperty>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_link: Option<String>,
}

/// Collection that new records are created in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    pub collection_id: String,
}

/// Properties ready to send to the store. `parent` is only set on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub properties: RecordProperties,
    pub parent: Option<Parent>,
}

/// Summary of the target collection, used by the connection check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub title: Option<String>,
    pub property_names: Vec<String>,
}
