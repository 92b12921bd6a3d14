//! Notion database record store for gcal-notion.
//!
//! Every synced calendar event is one page in the configured database,
//! correlated through its "GCAL ID" rich-text property.

pub mod api;
pub mod to_notion;
pub mod types;

pub use api::{NOTION_API_BASE, NOTION_VERSION, NotionStore};
