//! REST client for the Notion API.
//!
//! Uses reqwest with Bearer token auth plus the `Notion-Version` header.
//! Endpoints are resolved against the configured API base
//! (`https://api.notion.com` by default).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use super::{ContentBlock, DocumentStore, MemoDocument, NotionConfig, RichText};
use crate::error::RemoteError;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<PageObject>,
}

#[derive(Debug, Deserialize)]
struct PageObject {
    id: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    properties: HashMap<String, PropertyValue>,
}

#[derive(Debug, Default, Deserialize)]
struct PropertyValue {
    #[serde(default)]
    title: Vec<RichText>,
    #[serde(default)]
    rich_text: Vec<RichText>,
    #[serde(default)]
    date: Option<DateValue>,
}

#[derive(Debug, Deserialize)]
struct DateValue {
    #[serde(default)]
    start: String,
}

#[derive(Debug, Deserialize)]
struct ChildrenResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
}

fn joined(runs: &[RichText]) -> String {
    runs.iter().map(|r| r.plain_text.as_str()).collect()
}

impl PageObject {
    /// Convert to a memo, using `fallback_date` when the page has no usable `Date`.
    fn into_document(self, fallback_date: NaiveDate) -> MemoDocument {
        let property = |name: &str| self.properties.get(name);

        let title = property("Title").map(|p| joined(&p.title)).unwrap_or_default();
        let content = property("Content")
            .map(|p| joined(&p.rich_text))
            .unwrap_or_default();
        // Date-only pages store "2026-10-19"; timed ones append "T..".
        let date = property("Date")
            .and_then(|p| p.date.as_ref())
            .and_then(|d| d.start.get(..10))
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .unwrap_or(fallback_date);

        MemoDocument {
            id: self.id,
            date,
            title,
            url: self.url,
            content,
        }
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

fn query_body(date: NaiveDate) -> Value {
    json!({
        "filter": {
            "property": "Date",
            "date": { "equals": date.format("%Y-%m-%d").to_string() }
        }
    })
}

fn create_body(database_id: &str, date: NaiveDate, title: &str, blocks: &[ContentBlock]) -> Value {
    let children: Vec<Value> = blocks.iter().filter_map(ContentBlock::to_api).collect();
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "Title": { "title": [{ "text": { "content": title } }] },
            "Date": { "date": { "start": date.format("%Y-%m-%d").to_string() } },
            "Content": { "rich_text": [] }
        },
        "children": children
    })
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct NotionClient {
    client: reqwest::Client,
    base: Url,
    token: String,
    notion_version: String,
    database_id: String,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Result<Self, RemoteError> {
        let mut base = Url::parse(&config.api_base)?;
        // Url::join drops the last segment unless the base ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base,
            token: config.token.clone(),
            notion_version: config.notion_version.clone(),
            database_id: config.database_id.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        Ok(self.base.join(path)?)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, RemoteError> {
        let url = self.endpoint(path)?;
        log::debug!("Notion {} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.notion_version);
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl DocumentStore for NotionClient {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<MemoDocument>, RemoteError> {
        let path = format!("v1/databases/{}/query", self.database_id);
        let resp: QueryResponse = self
            .call(Method::POST, &path, Some(&query_body(date)))
            .await?;

        if resp.results.len() > 1 {
            log::warn!(
                "{} memos match {}; using the first",
                resp.results.len(),
                date
            );
        }

        Ok(resp
            .results
            .into_iter()
            .next()
            .map(|page| page.into_document(date)))
    }

    async fn create_document(
        &self,
        date: NaiveDate,
        title: &str,
        blocks: &[ContentBlock],
    ) -> Result<MemoDocument, RemoteError> {
        let body = create_body(&self.database_id, date, title, blocks);
        let page: PageObject = self.call(Method::POST, "v1/pages", Some(&body)).await?;
        Ok(page.into_document(date))
    }

    async fn list_blocks(&self, document_id: &str) -> Result<Vec<ContentBlock>, RemoteError> {
        let path = format!("v1/blocks/{}/children", document_id);
        let resp: ChildrenResponse = self.call(Method::GET, &path, None).await?;

        if resp.has_more {
            log::warn!(
                "Memo {} has more than {} blocks; only the first page is read",
                document_id,
                resp.results.len()
            );
        }

        Ok(resp.results.iter().map(ContentBlock::from_api).collect())
    }
}
