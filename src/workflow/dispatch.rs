//! Summary dispatcher
//!
//! Reads today's memo, flattens it to text and emails it to every roster
//! member over a single mail session. The first failed send stops the batch.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc, Weekday};

use crate::error::DispatchError;
use crate::flatten::flatten;
use crate::mail::{MailSession, Mailer, SummaryEmail};
use crate::notion::{ContentBlock, DocumentStore, MemoDocument};
use crate::roster::TeamMember;
use crate::types::Config;

/// Body text used when nobody wrote anything in the memo.
pub const EMPTY_MEMO_TEXT: &str = "No updates were added to today's memo.";

const WEEKEND_NOTE: &str = "It's the weekend, so there's no need to reply. Enjoy your time off!";

/// Text that goes into the email: flattened blocks, else the legacy
/// `Content` property, else [`EMPTY_MEMO_TEXT`].
pub fn memo_text(doc: &MemoDocument, blocks: &[ContentBlock]) -> String {
    let text = flatten(blocks);
    if !text.trim().is_empty() {
        text
    } else if !doc.content.trim().is_empty() {
        doc.content.clone()
    } else {
        EMPTY_MEMO_TEXT.to_string()
    }
}

/// Build one recipient's email.
pub fn compose(
    from: &str,
    member: &TeamMember,
    doc: &MemoDocument,
    content: &str,
    now: DateTime<Utc>,
) -> SummaryEmail {
    let local = member.local_time(now);
    let mut body = format!("Hi {},\n\n", member.name);

    if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
        body.push_str(WEEKEND_NOTE);
        body.push_str("\n\n");
    }

    body.push_str(&format!(
        "Here is the team memo for {}:\n\n{}\n\n",
        doc.date.format("%A, %B %-d, %Y"),
        content
    ));
    if !doc.url.is_empty() {
        body.push_str(&format!("Open the memo: {}\n\n", doc.url));
    }
    body.push_str(&format!(
        "Your local time: {} ({})\nGenerated at {} UTC\n",
        local.format("%Y-%m-%d %H:%M"),
        member.utc_offset,
        now.format("%Y-%m-%d %H:%M:%S")
    ));

    SummaryEmail {
        from: from.to_string(),
        to_name: member.name.clone(),
        to_email: member.email.clone(),
        subject: format!("Daily Memo Summary - {}", doc.date.format("%Y-%m-%d")),
        body,
    }
}

pub struct Dispatcher {
    store: Arc<dyn DocumentStore>,
    mailer: Arc<dyn Mailer>,
    roster: Vec<TeamMember>,
    from: String,
}

impl Dispatcher {
    pub fn new(config: &Config, store: Arc<dyn DocumentStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            store,
            mailer,
            roster: config.roster.clone(),
            from: config.mail.from.clone(),
        }
    }

    /// Email today's (UTC) memo to the roster; returns how many were sent.
    pub async fn send_today_summary(&self) -> Result<usize, DispatchError> {
        self.send_summary_at(Utc::now()).await
    }

    pub async fn send_summary_at(&self, now: DateTime<Utc>) -> Result<usize, DispatchError> {
        let result = self.run(now).await;
        match &result {
            Ok(sent) => log::info!("Daily memo summary sent to {} recipient(s)", sent),
            Err(DispatchError::Remote(e)) => {
                log::error!("Summary dispatch failed: {}. {}", e, e.recovery_suggestion())
            }
            Err(e) => log::error!("Summary dispatch failed: {}", e),
        }
        result
    }

    async fn run(&self, now: DateTime<Utc>) -> Result<usize, DispatchError> {
        let date = now.date_naive();
        let doc = self
            .store
            .find_by_date(date)
            .await?
            .ok_or(DispatchError::NoMemo(date))?;

        let blocks = self.store.list_blocks(&doc.id).await?;
        let content = memo_text(&doc, &blocks);
        log::debug!(
            "Memo {} flattened from {} block(s) to {} chars",
            doc.id,
            blocks.len(),
            content.len()
        );

        let mut session = self.mailer.open().await?;
        let result = self.send_all(session.as_mut(), &doc, &content, now).await;
        session.close().await;
        result
    }

    async fn send_all(
        &self,
        session: &mut dyn MailSession,
        doc: &MemoDocument,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<usize, DispatchError> {
        let mut sent = 0;
        for member in &self.roster {
            let email = compose(&self.from, member, doc, content, now);
            if let Err(e) = session.send(&email).await {
                log::error!(
                    "Sending to {} failed after {} of {} sent; stopping",
                    member.email,
                    sent,
                    self.roster.len()
                );
                return Err(e.into());
            }
            log::info!("Summary sent to {}", member.email);
            sent += 1;
        }
        Ok(sent)
    }
}
