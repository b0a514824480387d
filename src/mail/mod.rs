//! Outgoing mail for the summary dispatcher.
//!
//! A [`Mailer`] opens one authenticated [`MailSession`]; the dispatcher sends
//! every recipient's email through it and closes it when done.

pub mod smtp;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;
pub use smtp::SmtpMailer;

/// SMTP settings stored in ~/.daily-memo/config.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    /// Usually supplied via EMAIL_PASSWORD instead.
    #[serde(default, skip_serializing)]
    pub password: String,
    /// Sender, either `addr@host` or `Name <addr@host>`.
    #[serde(default)]
    pub from: String,
}

fn default_port() -> u16 {
    587
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            from: String::new(),
        }
    }
}

/// One recipient's summary, composed per run and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEmail {
    pub from: String,
    pub to_name: String,
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Connect and authenticate.
    async fn open(&self) -> Result<Box<dyn MailSession>, RemoteError>;
}

#[async_trait]
pub trait MailSession: Send {
    async fn send(&mut self, email: &SummaryEmail) -> Result<(), RemoteError>;

    /// Release the connection. Called exactly once, after the last send.
    async fn close(&mut self);
}
