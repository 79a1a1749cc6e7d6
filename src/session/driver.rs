//! Glue between the message channel and the controller.
//!
//! Both front ends own a [`Driver`]: it turns reload requests into fetches
//! and applies finished fetches to the controller.

use crate::channel::ChannelStatus;
use crate::controller::{DashboardController, FilterCriteria, LoadOutcome, LoadTicket};
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use crate::workers::{DashboardMessage, RecordFetcher, ReloadTrigger};

/// What handling one message changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// An activity line to show; nothing else changed.
    Activity(Event),
    /// A new load was started; the view is loading.
    LoadStarted {
        ticket: LoadTicket,
        trigger: ReloadTrigger,
    },
    /// A finished load was applied or discarded.
    LoadCompleted { ticket: LoadTicket, outcome: LoadOutcome },
    /// The push channel changed state.
    Status(ChannelStatus),
}

pub struct Driver {
    controller: DashboardController,
    fetcher: RecordFetcher,
}

impl Driver {
    pub fn new(controller: DashboardController, fetcher: RecordFetcher) -> Self {
        Self {
            controller,
            fetcher,
        }
    }

    pub fn controller(&self) -> &DashboardController {
        &self.controller
    }

    /// Puts the view in the loading state and starts a fetch.
    pub fn reload(&mut self, trigger: ReloadTrigger) -> LoadTicket {
        let ticket = self.controller.begin_load();
        log::debug!("starting load #{} ({})", ticket.number(), trigger);
        self.fetcher.spawn(ticket);
        ticket
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.controller.set_criteria(criteria);
    }

    pub fn handle(&mut self, message: DashboardMessage) -> Handled {
        match message {
            DashboardMessage::Activity(event) => Handled::Activity(event),
            DashboardMessage::ReloadRequested(trigger) => {
                let ticket = self.reload(trigger);
                Handled::LoadStarted { ticket, trigger }
            }
            DashboardMessage::LoadFinished { ticket, result } => {
                let outcome = self.controller.complete_load(ticket, result);
                Handled::LoadCompleted { ticket, outcome }
            }
            DashboardMessage::ChannelStatus(status) => Handled::Status(status),
        }
    }
}

impl Handled {
    /// Activity line describing this change, if it deserves one.
    pub fn describe(&self) -> Option<Event> {
        match self {
            Handled::Activity(event) => Some(event.clone()),
            Handled::LoadStarted { ticket, trigger } => Some(Event::view(
                format!("Load #{} started ({})", ticket.number(), trigger),
                EventType::Refresh,
                LogLevel::Debug,
            )),
            Handled::LoadCompleted { ticket, outcome } => match outcome {
                LoadOutcome::Applied { count } => Some(Event::loader(
                    format!("Loaded {} pull requests", count),
                    EventType::Success,
                    LogLevel::Info,
                )),
                LoadOutcome::Failed { message } => Some(Event::loader(
                    message.clone(),
                    EventType::Error,
                    LogLevel::Error,
                )),
                LoadOutcome::Stale => Some(Event::loader(
                    format!("Discarded stale load #{}", ticket.number()),
                    EventType::Info,
                    LogLevel::Debug,
                )),
            },
            Handled::Status(_) => None,
        }
    }

    /// True when the rendered records may have changed.
    pub fn changes_view(&self) -> bool {
        !matches!(self, Handled::Activity(_) | Handled::Status(_))
    }
}
