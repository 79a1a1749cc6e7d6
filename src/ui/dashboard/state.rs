//! Dashboard state management
//!
//! The terminal view of the controller: activity log, filter editing,
//! scroll position and push channel status.

use crate::channel::ChannelStatus;
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::controller::DashboardController;
use crate::environment::Environment;
use crate::events::Event;
use crate::session::Driver;
use crate::ui::app::UIConfig;
use crate::workers::DashboardMessage;

use std::collections::VecDeque;

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box.
    Search,
}

pub struct DashboardState {
    /// The server the dashboard talks to.
    pub environment: Environment,
    /// Messages waiting to be processed
    pub pending_messages: VecDeque<DashboardMessage>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Last known push channel state
    pub channel_status: ChannelStatus,
    pub input_mode: InputMode,
    /// First card line shown
    pub scroll: u16,
    /// Animation tick counter
    pub tick: usize,

    driver: Driver,
}

impl DashboardState {
    pub fn new(
        environment: Environment,
        driver: Driver,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            environment,
            pending_messages: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            channel_status: ChannelStatus::default(),
            input_mode: InputMode::default(),
            scroll: 0,
            tick: 0,
            driver,
        }
    }

    pub fn controller(&self) -> &DashboardController {
        self.driver.controller()
    }

    pub(super) fn driver_mut(&mut self) -> &mut Driver {
        &mut self.driver
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Queue a message for the next update
    pub fn add_message(&mut self, message: DashboardMessage) {
        self.pending_messages.push_back(message);
    }
}
