//! Event System
//!
//! Activity events emitted by the loader, the push listener and the view.

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    /// Fetches the record list from the backend.
    Loader,
    /// Listens on the push channel for change notifications.
    Channel,
    /// The dashboard view itself (filters, manual reloads).
    View,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn loader(msg: impl Into<String>, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Loader, msg.into(), event_type, log_level)
    }

    pub fn channel(msg: impl Into<String>, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Channel, msg.into(), event_type, log_level)
    }

    pub fn view(msg: impl Into<String>, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::View, msg.into(), event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_info_events_are_always_displayed() {
        let ok = Event::loader("Loaded 3 pull requests", EventType::Success, LogLevel::Debug);
        let info = Event::channel("Connected", EventType::Info, LogLevel::Info);
        assert!(ok.should_display());
        assert!(info.should_display());
    }

    #[test]
    fn display_includes_source_and_message() {
        let event = Event::view("Filters cleared", EventType::Info, LogLevel::Info);
        let text = event.to_string();
        assert!(text.starts_with("Info ["));
        assert!(text.ends_with("View: Filters cleared"));
    }
}
