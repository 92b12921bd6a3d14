//! Core types and reconciliation logic for gcal-notion.
//!
//! This crate is shared by the CLI and the collaborator crates:
//! - `event` holds the provider-neutral calendar event types
//! - `sanitize`, `meeting_link` and `mapper` turn an event into record properties
//! - `resolver`, `reconcile` and `sync` drive create/update/archive decisions
//! - `ports` defines the calendar source and record store seams
//! - `state` persists the watermark and window size between passes

pub mod constants;
pub mod date_range;
pub mod error;
pub mod event;
pub mod mapper;
pub mod meeting_link;
pub mod ports;
pub mod reconcile;
pub mod record;
pub mod resolver;
pub mod sanitize;
pub mod state;
pub mod sync;

// Re-export the types most callers need at crate root
pub use error::{GcalNotionError, GcalNotionResult};
pub use event::{CalendarEvent, ConferenceData, EntryPoint, EventStatus, EventTime};
pub use record::{Parent, RecordId, RecordPayload, RecordProperties, RemoteRecord};
