//! SMTP delivery via lettre.
//!
//! STARTTLS relay on the configured host/port with login credentials. The
//! pool is capped at one connection so every send in a session reuses it.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::PoolConfig;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailConfig, MailSession, Mailer, SummaryEmail};
use crate::error::RemoteError;

pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn open(&self) -> Result<Box<dyn MailSession>, RemoteError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .pool_config(PoolConfig::new().max_size(1))
            .build();

        // Connects and authenticates up front so a bad login fails before any send.
        if !transport.test_connection().await? {
            return Err(RemoteError::Mail(format!(
                "{}:{} did not accept the connection",
                self.config.host, self.config.port
            )));
        }
        log::info!(
            "SMTP session open to {}:{}",
            self.config.host,
            self.config.port
        );

        Ok(Box::new(SmtpSession {
            transport: Some(transport),
        }))
    }
}

struct SmtpSession {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

#[async_trait]
impl MailSession for SmtpSession {
    async fn send(&mut self, email: &SummaryEmail) -> Result<(), RemoteError> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| RemoteError::Mail("session already closed".to_string()))?;

        let message = build_message(email)?;
        transport.send(message).await?;
        Ok(())
    }

    async fn close(&mut self) {
        if self.transport.take().is_some() {
            log::debug!("SMTP session closed");
        }
    }
}

fn build_message(email: &SummaryEmail) -> Result<Message, RemoteError> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|e| RemoteError::Mail(format!("invalid sender '{}': {}", email.from, e)))?;
    let address: Address = email
        .to_email
        .parse()
        .map_err(|e| RemoteError::Mail(format!("invalid recipient '{}': {}", email.to_email, e)))?;
    let to = Mailbox::new(Some(email.to_name.clone()), address);

    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())
        .map_err(|e| RemoteError::Mail(format!("failed to build message: {}", e)))
}
