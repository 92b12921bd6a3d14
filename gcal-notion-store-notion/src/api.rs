use async_trait::async_trait;
use gcal_notion_core::ports::{RecordFilter, RecordStore};
use gcal_notion_core::record::CollectionInfo;
use gcal_notion_core::{GcalNotionError, GcalNotionResult, RecordId, RecordPayload, RemoteRecord};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::to_notion::{filter_json, page_body};
use crate::types::{NotionDatabase, NotionPage, QueryResponse};

pub const NOTION_API_BASE: &str = "https://api.notion.com";
pub const NOTION_VERSION: &str = "2022-06-28";

/// A Notion database used as the record collection.
pub struct NotionStore {
    http: Client,
    base_url: Url,
    token: String,
    database_id: String,
}

impl NotionStore {
    pub fn new(token: impl Into<String>, database_id: impl Into<String>) -> GcalNotionResult<Self> {
        Self::with_base_url(NOTION_API_BASE, token, database_id)
    }

    pub fn with_base_url(
        base_url: &str,
        token: impl Into<String>,
        database_id: impl Into<String>,
    ) -> GcalNotionResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GcalNotionError::Config(format!("Invalid Notion API base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            http: Client::new(),
            base_url,
            token: token.into(),
            database_id: database_id.into(),
        })
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    fn url(&self, segments: &[&str]) -> GcalNotionResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GcalNotionError::Config(format!("Notion API base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push("v1")
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
    }

    async fn send(&self, request: RequestBuilder) -> GcalNotionResult<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| GcalNotionError::Store(format!("Notion API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GcalNotionError::StoreApi {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> GcalNotionResult<T> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| GcalNotionError::Store(format!("Failed to parse Notion response: {}", e)))
    }
}

#[async_trait]
impl RecordStore for NotionStore {
    async fn query(&self, filter: &RecordFilter) -> GcalNotionResult<Vec<RemoteRecord>> {
        let url = self.url(&["databases", &self.database_id, "query"])?;
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({ "filter": filter_json(filter) });
            if let Some(ref c) = cursor {
                body["start_cursor"] = json!(c);
            }

            let page: QueryResponse = self.send_json(self.http.post(url.clone()).json(&body)).await?;
            debug!(count = page.results.len(), has_more = page.has_more, "queried database");
            records.extend(page.results.into_iter().map(NotionPage::into_record));

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        Ok(records)
    }

    async fn create(&self, payload: &RecordPayload) -> GcalNotionResult<RecordId> {
        if payload.parent.is_none() {
            return Err(GcalNotionError::Store("Cannot create a page without a parent database".into()));
        }

        let url = self.url(&["pages"])?;
        let page: NotionPage = self.send_json(self.http.post(url).json(&page_body(payload))).await?;
        Ok(RecordId(page.id))
    }

    async fn update(&self, id: &RecordId, payload: &RecordPayload) -> GcalNotionResult<()> {
        let url = self.url(&["pages", id.as_str()])?;
        self.send(self.http.patch(url).json(&page_body(payload))).await?;
        Ok(())
    }

    async fn archive(&self, id: &RecordId) -> GcalNotionResult<()> {
        let url = self.url(&["pages", id.as_str()])?;
        self.send(self.http.patch(url).json(&json!({ "archived": true })))
            .await?;
        Ok(())
    }

    async fn describe(&self) -> GcalNotionResult<CollectionInfo> {
        let url = self.url(&["databases", &self.database_id])?;
        let database: NotionDatabase = self.send_json(self.http.get(url)).await?;
        Ok(database.into_info())
    }
}
