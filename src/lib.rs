//! Daily memo automation: provision a dated Notion page each day and email
//! its contents to the team.

pub mod error;
pub mod flatten;
pub mod mail;
pub mod notion;
pub mod roster;
pub mod state;
pub mod types;
pub mod util;
pub mod workflow;

use std::sync::Arc;

use mail::SmtpMailer;
use notion::NotionClient;
use types::{Config, WorkflowId};
use workflow::{Dispatcher, Provisioner};

/// Run one workflow to completion.
///
/// Failures are logged by the workflow itself; the return value only says
/// whether it succeeded, so the caller can still exit cleanly.
pub async fn run_workflow(id: WorkflowId, config: &Config) -> bool {
    let store = match NotionClient::new(&config.notion) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::error!("Cannot build Notion client: {}. {}", e, e.recovery_suggestion());
            return false;
        }
    };

    log::info!("Running '{}' workflow", id);
    match id {
        WorkflowId::Create => Provisioner::new(store).ensure_today_exists().await.is_some(),
        WorkflowId::Send => {
            let mailer = Arc::new(SmtpMailer::new(&config.mail));
            Dispatcher::new(config, store, mailer)
                .send_today_summary()
                .await
                .is_ok()
        }
    }
}
