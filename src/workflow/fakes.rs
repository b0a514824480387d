//! In-memory stand-ins for Notion and SMTP used by workflow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::RemoteError;
use crate::mail::{MailSession, Mailer, SummaryEmail};
use crate::notion::{ContentBlock, DocumentStore, MemoDocument};

fn api_error(status: u16, message: &str) -> RemoteError {
    RemoteError::Api {
        status,
        message: message.to_string(),
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pages: Mutex<Vec<(MemoDocument, Vec<ContentBlock>)>>,
    creates: AtomicUsize,
    fail_find: bool,
    fail_create: bool,
    fail_list: bool,
}

impl MemoryStore {
    pub fn failing_find(mut self) -> Self {
        self.fail_find = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Add a page directly, bypassing the create counter. Returns its ID.
    pub fn insert(&self, date: NaiveDate, blocks: Vec<ContentBlock>) -> String {
        self.insert_document(
            MemoDocument {
                id: String::new(),
                date,
                title: format!("Memo {}", date),
                url: String::new(),
                content: String::new(),
            },
            blocks,
        )
    }

    pub fn insert_document(&self, mut doc: MemoDocument, blocks: Vec<ContentBlock>) -> String {
        let mut pages = self.pages.lock().unwrap();
        if doc.id.is_empty() {
            doc.id = format!("page-{}", pages.len() + 1);
        }
        if doc.url.is_empty() {
            doc.url = format!("https://www.notion.so/{}", doc.id);
        }
        let id = doc.id.clone();
        pages.push((doc, blocks));
        id
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn document(&self, id: &str) -> Option<MemoDocument> {
        let pages = self.pages.lock().unwrap();
        pages.iter().find(|(d, _)| d.id == id).map(|(d, _)| d.clone())
    }

    pub fn blocks(&self, id: &str) -> Option<Vec<ContentBlock>> {
        let pages = self.pages.lock().unwrap();
        pages.iter().find(|(d, _)| d.id == id).map(|(_, b)| b.clone())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<MemoDocument>, RemoteError> {
        if self.fail_find {
            return Err(api_error(500, "find failed"));
        }
        let pages = self.pages.lock().unwrap();
        Ok(pages.iter().find(|(d, _)| d.date == date).map(|(d, _)| d.clone()))
    }

    async fn create_document(
        &self,
        date: NaiveDate,
        title: &str,
        blocks: &[ContentBlock],
    ) -> Result<MemoDocument, RemoteError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(api_error(400, "validation_error"));
        }
        let id = self.insert_document(
            MemoDocument {
                id: String::new(),
                date,
                title: title.to_string(),
                url: String::new(),
                content: String::new(),
            },
            blocks.to_vec(),
        );
        self.document(&id)
            .ok_or_else(|| api_error(500, "created page vanished"))
    }

    async fn list_blocks(&self, document_id: &str) -> Result<Vec<ContentBlock>, RemoteError> {
        if self.fail_list {
            return Err(api_error(502, "list failed"));
        }
        self.blocks(document_id)
            .ok_or_else(|| api_error(404, "object_not_found"))
    }
}

/// Records sessions and sends; optionally fails `open` or the nth send.
#[derive(Default)]
pub struct RecordingMailer {
    opens: AtomicUsize,
    closes: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<SummaryEmail>>>,
    fail_open: bool,
    fail_on_send: Option<usize>,
}

impl RecordingMailer {
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Fail the send with this zero-based index (counted across the session).
    pub fn failing_send(mut self, index: usize) -> Self {
        self.fail_on_send = Some(index);
        self
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<SummaryEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn open(&self) -> Result<Box<dyn MailSession>, RemoteError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(RemoteError::Mail("535 authentication failed".to_string()));
        }
        Ok(Box::new(RecordingSession {
            closes: self.closes.clone(),
            sent: self.sent.clone(),
            fail_on_send: self.fail_on_send,
            attempts: 0,
        }))
    }
}

struct RecordingSession {
    closes: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<SummaryEmail>>>,
    fail_on_send: Option<usize>,
    attempts: usize,
}

#[async_trait]
impl MailSession for RecordingSession {
    async fn send(&mut self, email: &SummaryEmail) -> Result<(), RemoteError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_on_send == Some(attempt) {
            return Err(RemoteError::Mail("connection reset".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }

    async fn close(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
