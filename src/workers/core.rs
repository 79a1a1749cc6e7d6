//! Messages flowing into the view task, and the sender workers use to post them

use crate::api::{ApiError, PullRequestRecord};
use crate::channel::ChannelStatus;
use crate::controller::LoadTicket;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// What asked for a reload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum ReloadTrigger {
    Startup,
    Manual,
    Push,
    Reconnect,
}

#[derive(Debug)]
pub enum DashboardMessage {
    /// Line for the activity log.
    Activity(Event),
    /// Someone wants fresh data.
    ReloadRequested(ReloadTrigger),
    /// A fetch finished, successfully or not.
    LoadFinished {
        ticket: LoadTicket,
        result: Result<Vec<PullRequestRecord>, ApiError>,
    },
    /// The push channel changed state.
    ChannelStatus(ChannelStatus),
}

/// Common message sending utilities for workers
#[derive(Clone, Debug)]
pub struct MessageSender {
    sender: mpsc::Sender<DashboardMessage>,
}

impl MessageSender {
    pub fn new(sender: mpsc::Sender<DashboardMessage>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, message: DashboardMessage) {
        // The receiver only goes away during shutdown
        let _ = self.sender.send(message).await;
    }

    pub async fn send_event(&self, event: Event) {
        self.send(DashboardMessage::Activity(event)).await;
    }

    pub async fn send_loader_event(
        &self,
        message: impl Into<String>,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::loader(message, event_type, log_level))
            .await;
    }

    pub async fn send_channel_event(
        &self,
        message: impl Into<String>,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::channel(message, event_type, log_level))
            .await;
    }

    pub async fn request_reload(&self, trigger: ReloadTrigger) {
        self.send(DashboardMessage::ReloadRequested(trigger)).await;
    }

    pub async fn send_status(&self, status: ChannelStatus) {
        self.send(DashboardMessage::ChannelStatus(status)).await;
    }

    pub async fn finish_load(
        &self,
        ticket: LoadTicket,
        result: Result<Vec<PullRequestRecord>, ApiError>,
    ) {
        self.send(DashboardMessage::LoadFinished { ticket, result })
            .await;
    }
}
