//! Memo provisioner
//!
//! Looks for a page dated today and creates one from the section template
//! when there is none. Running it twice on the same day is a no-op.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::notion::{ContentBlock, DocumentStore};

/// Sections of a new memo, in page order.
pub const TEMPLATE_SECTIONS: &[&str] = &["Goals", "Completed", "In Progress", "Blockers", "Notes"];

/// "Daily Memo - 2026-10-19 (Monday)"
pub fn memo_title(date: NaiveDate) -> String {
    format!("Daily Memo - {} ({})", date.format("%Y-%m-%d"), date.format("%A"))
}

/// A level-2 heading per section, each followed by an empty bullet to type into.
pub fn memo_template() -> Vec<ContentBlock> {
    TEMPLATE_SECTIONS
        .iter()
        .flat_map(|section| [ContentBlock::heading(2, section), ContentBlock::bulleted("")])
        .collect()
}

pub struct Provisioner {
    store: Arc<dyn DocumentStore>,
}

impl Provisioner {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Ensure a memo exists for the current UTC date.
    pub async fn ensure_today_exists(&self) -> Option<String> {
        self.ensure_exists_for(Utc::now().date_naive()).await
    }

    /// Returns the memo's page ID, or `None` if it could not be looked up or created.
    pub async fn ensure_exists_for(&self, date: NaiveDate) -> Option<String> {
        match self.store.find_by_date(date).await {
            Ok(Some(doc)) => {
                log::info!("Memo for {} already exists: {}", date, doc.id);
                return Some(doc.id);
            }
            Ok(None) => {}
            Err(e) => {
                log::error!(
                    "Failed to look up memo for {}: {}. {}",
                    date,
                    e,
                    e.recovery_suggestion()
                );
                return None;
            }
        }

        let title = memo_title(date);
        match self.store.create_document(date, &title, &memo_template()).await {
            Ok(doc) => {
                log::info!("Created memo '{}': {}", title, doc.id);
                Some(doc.id)
            }
            Err(e) => {
                log::error!(
                    "Failed to create memo '{}': {}. {}",
                    title,
                    e,
                    e.recovery_suggestion()
                );
                None
            }
        }
    }
}
