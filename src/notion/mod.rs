//! Notion workspace-database integration.
//!
//! The memo database holds one page per day, keyed by its `Date` property.
//! Workflows talk to it through [`DocumentStore`] so they can run against an
//! in-memory store in tests.

pub mod blocks;
pub mod client;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;
pub use blocks::{ContentBlock, RichText};
pub use client::NotionClient;

/// Notion connection settings stored in ~/.daily-memo/config.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotionConfig {
    /// Integration secret; usually supplied via NOTION_TOKEN instead.
    #[serde(default, skip_serializing)]
    pub token: String,
    #[serde(default)]
    pub database_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_notion_version")]
    pub notion_version: String,
}

fn default_api_base() -> String {
    "https://api.notion.com".to_string()
}

fn default_notion_version() -> String {
    "2022-06-28".to_string()
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            database_id: String::new(),
            api_base: default_api_base(),
            notion_version: default_notion_version(),
        }
    }
}

/// A dated memo page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoDocument {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub url: String,
    /// Text of the legacy `Content` rich-text property, empty when unset.
    pub content: String,
}

/// The three operations the memo workflows need from the database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// First page whose `Date` equals `date`, if any.
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<MemoDocument>, RemoteError>;

    /// Create a page; does not check for an existing one.
    async fn create_document(
        &self,
        date: NaiveDate,
        title: &str,
        blocks: &[ContentBlock],
    ) -> Result<MemoDocument, RemoteError>;

    /// Direct child blocks of a page in stored order (first page of results only).
    async fn list_blocks(&self, document_id: &str) -> Result<Vec<ContentBlock>, RemoteError>;
}
