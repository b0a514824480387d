//! Error types for the memo workflows
//!
//! Errors are grouped by where they come from:
//! - Remote: Notion API or mail server failures
//! - Config: missing or invalid configuration, caught before any remote call
//! - Dispatch: why a summary run sent nothing (or stopped part-way)

use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the document database or the mail server.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Mail transport: {0}")]
    Mail(String),
}

impl RemoteError {
    /// Get a short hint for the log line that accompanies this error
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RemoteError::Api { status: 401, .. } => "Check NOTION_TOKEN.",
            RemoteError::Api { status: 403, .. } | RemoteError::Api { status: 404, .. } => {
                "Share the database with the integration and check NOTION_DATABASE_ID."
            }
            RemoteError::Api { .. } => "Check the Notion API response above.",
            RemoteError::Http(_) => "Check your internet connection and try again.",
            RemoteError::Json(_) => "The Notion response did not have the expected shape.",
            RemoteError::Url(_) => "Check notion.apiBase in the config file.",
            RemoteError::Mail(_) => "Check EMAIL_HOST, EMAIL_PORT and the mail credentials.",
        }
    }
}

impl From<lettre::transport::smtp::Error> for RemoteError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        RemoteError::Mail(err.to_string())
    }
}

/// Configuration could not be loaded or is incomplete.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Why a summary dispatch did not complete.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No memo found for {0}")]
    NoMemo(chrono::NaiveDate),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
