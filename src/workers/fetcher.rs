//! Record fetching
//!
//! Each load runs as its own task and reports back through the message
//! channel tagged with the ticket it was issued. Superseded loads are not
//! cancelled; the controller discards their results.

use super::core::MessageSender;
use crate::api::PrSource;
use crate::controller::LoadTicket;
use crate::events::EventType;
use crate::logging::LogLevel;
use crate::network::ErrorHandler;
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct RecordFetcher {
    source: Arc<dyn PrSource>,
    sender: MessageSender,
    error_handler: ErrorHandler,
}

impl RecordFetcher {
    pub fn new(source: Arc<dyn PrSource>, sender: MessageSender) -> Self {
        Self {
            source,
            sender,
            error_handler: ErrorHandler::new(),
        }
    }

    /// Starts a fetch in the background.
    pub fn spawn(&self, ticket: LoadTicket) -> JoinHandle<()> {
        let fetcher = self.clone();
        tokio::spawn(async move { fetcher.fetch(ticket).await })
    }

    /// Fetches once and posts the outcome.
    pub async fn fetch(&self, ticket: LoadTicket) {
        self.sender
            .send_loader_event(
                format!(
                    "Load #{}: fetching {}",
                    ticket.number(),
                    self.source.endpoint()
                ),
                EventType::Waiting,
                LogLevel::Debug,
            )
            .await;

        let result = self.source.fetch_records().await;
        match &result {
            Ok(records) => {
                log::debug!("load #{} returned {} records", ticket.number(), records.len());
            }
            Err(e) => {
                self.sender
                    .send_loader_event(
                        format!("Load #{} failed: {}", ticket.number(), e),
                        EventType::Error,
                        self.error_handler.classify_api_error(e),
                    )
                    .await;
            }
        }
        self.sender.finish_load(ticket, result).await;
    }
}
