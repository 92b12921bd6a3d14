//! Constants shared across the gcal-notion crates.

/// Forward look-ahead of a sync pass when no window size has been persisted.
pub const DEFAULT_SYNC_WINDOW_DAYS: u32 = 7;

/// Largest window size accepted by `window set`.
pub const MAX_SYNC_WINDOW_DAYS: u32 = 3650;

/// Events requested per page during the periodic pass.
pub const SYNC_PAGE_SIZE: u32 = 100;

/// Events requested per page during a forced resync.
pub const RESYNC_PAGE_SIZE: u32 = 250;

/// Longest description stored on a record, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Title used when the calendar event has none.
pub const DEFAULT_TITLE: &str = "No Title";

/// Google's alias for the user's main calendar.
pub const DEFAULT_CALENDAR_ID: &str = "primary";

// Column titles of the target database. These must match exactly.
pub const PROP_NAME: &str = "Name";
pub const PROP_DATE: &str = "Date";
pub const PROP_GCAL_ID: &str = "GCAL ID";
pub const PROP_STATUS: &str = "Status";
pub const PROP_DESCRIPTION: &str = "Description";
pub const PROP_LOCATION: &str = "Location";
pub const PROP_EVENT_LINK: &str = "Event Link";
