//! Notion API response shapes, reduced to what the sync reads.

use gcal_notion_core::constants::{PROP_GCAL_ID, PROP_NAME};
use gcal_notion_core::record::CollectionInfo;
use gcal_notion_core::{RecordId, RemoteRecord};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<NotionPage>,
    #[serde(default)]
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotionPage {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct NotionDatabase {
    #[serde(default)]
    pub title: Vec<RichText>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct RichText {
    pub plain_text: Option<String>,
}

impl NotionPage {
    /// Concatenated text of a title or rich_text property, if non-empty.
    fn text_of(&self, name: &str) -> Option<String> {
        let prop = self.properties.get(name)?;
        let fragments = prop
            .get("title")
            .or_else(|| prop.get("rich_text"))?
            .as_array()?;

        let text: String = fragments
            .iter()
            .filter_map(|f| {
                f.get("plain_text")
                    .or_else(|| f.get("text").and_then(|t| t.get("content")))
                    .and_then(Value::as_str)
            })
            .collect();

        (!text.is_empty()).then_some(text)
    }

    pub fn into_record(self) -> RemoteRecord {
        RemoteRecord {
            name: self.text_of(PROP_NAME),
            gcal_id: self.text_of(PROP_GCAL_ID),
            id: RecordId(self.id),
        }
    }
}

impl NotionDatabase {
    pub fn into_info(self) -> CollectionInfo {
        let title: String = self.title.into_iter().filter_map(|t| t.plain_text).collect();

        CollectionInfo {
            title: (!title.is_empty()).then_some(title),
            property_names: self.properties.into_iter().map(|(k, _)| k).collect(),
        }
    }
}
