//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::api::PrState;
use crate::events::Source;
use chrono::NaiveDateTime;
use ratatui::prelude::Color;

/// Get a ratatui color for an event source
pub fn get_source_color(source: Source) -> Color {
    match source {
        Source::Loader => Color::Cyan,
        Source::Channel => Color::Magenta,
        Source::View => Color::Gray,
    }
}

/// Badge color for a record state
pub fn get_state_color(state: PrState) -> Color {
    match state {
        PrState::Open => Color::Green,
        PrState::Closed => Color::Red,
        PrState::Merged => Color::Magenta,
        PrState::Unknown => Color::DarkGray,
    }
}

/// Shortens "YYYY-MM-DD HH:MM:SS" to "MM-DD HH:MM:SS".
pub fn format_compact_timestamp(timestamp: &str) -> String {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
        .map(|t| t.format("%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Drops control characters so server text cannot drive the terminal.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Next value of a cycling filter: any, then each value in order, then any again.
pub fn cycle_value(values: &[String], current: Option<&str>) -> Option<String> {
    let next = match current.and_then(|c| values.iter().position(|v| v == c)) {
        None => 0,
        Some(index) => index + 1,
    };
    values.get(next).cloned()
}

/// Same as [`cycle_value`] for the state filter.
pub fn cycle_state(current: Option<PrState>) -> Option<PrState> {
    let next = match current.and_then(|c| PrState::FILTERABLE.iter().position(|s| *s == c)) {
        None => 0,
        Some(index) => index + 1,
    };
    PrState::FILTERABLE.get(next).copied()
}

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}
