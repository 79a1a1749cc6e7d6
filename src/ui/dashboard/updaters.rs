//! Dashboard state update logic
//!
//! Applies queued messages and key presses to the dashboard state

use super::state::{DashboardState, InputMode};
use super::utils::{cycle_state, cycle_value};

use crate::controller::FilterCriteria;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use crate::session::Handled;
use crate::workers::ReloadTrigger;
use crossterm::event::{KeyCode, KeyEvent};

/// What the app loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

impl DashboardState {
    /// Update the dashboard state with new tick and queued messages.
    pub fn update(&mut self) {
        self.tick += 1;
        while let Some(message) = self.pending_messages.pop_front() {
            let handled = self.driver_mut().handle(message);
            self.apply(handled);
        }
    }

    fn apply(&mut self, handled: Handled) {
        if let Handled::Status(status) = &handled {
            self.channel_status = *status;
        }
        if let Some(event) = handled.describe() {
            self.add_to_activity_log(event);
        }
        if handled.changes_view() {
            self.clamp_scroll();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match self.input_mode {
            InputMode::Search => {
                self.handle_search_key(key);
                KeyOutcome::Continue
            }
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char('r') => self.cycle_repo(),
            KeyCode::Char('s') => self.cycle_state(),
            KeyCode::Char('a') => self.cycle_author(),
            KeyCode::Char('c') => self.clear_filters(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('R') | KeyCode::F(5) => self.reload(),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                self.clamp_scroll();
            }
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(10);
                self.clamp_scroll();
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => self.edit_criteria(|criteria| {
                criteria.search.pop();
            }),
            KeyCode::Char(c) => self.edit_criteria(|criteria| criteria.search.push(c)),
            _ => {}
        }
    }

    fn edit_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        let mut criteria = self.controller().criteria().clone();
        edit(&mut criteria);
        self.driver_mut().set_criteria(criteria);
        self.scroll = 0;
    }

    fn cycle_repo(&mut self) {
        let repos = self.controller().options().repos.clone();
        self.edit_criteria(|criteria| {
            criteria.repo = cycle_value(&repos, criteria.repo.as_deref());
        });
    }

    fn cycle_author(&mut self) {
        let authors = self.controller().options().authors.clone();
        self.edit_criteria(|criteria| {
            criteria.author = cycle_value(&authors, criteria.author.as_deref());
        });
    }

    fn cycle_state(&mut self) {
        self.edit_criteria(|criteria| criteria.state = cycle_state(criteria.state));
    }

    fn clear_filters(&mut self) {
        if self.controller().criteria().is_empty() {
            self.add_to_activity_log(Event::view(
                "No filters to clear",
                EventType::Info,
                LogLevel::Debug,
            ));
            return;
        }
        self.edit_criteria(|criteria| *criteria = FilterCriteria::default());
        self.add_to_activity_log(Event::view(
            "Filters cleared",
            EventType::Info,
            LogLevel::Info,
        ));
    }

    fn reload(&mut self) {
        let ticket = self.driver_mut().reload(ReloadTrigger::Manual);
        self.add_to_activity_log(Event::view(
            format!("Manual reload (load #{})", ticket.number()),
            EventType::Refresh,
            LogLevel::Info,
        ));
    }

    /// Keeps the scroll offset within the card list.
    fn clamp_scroll(&mut self) {
        let max = self.card_line_count().saturating_sub(1);
        self.scroll = self.scroll.min(max);
    }

    /// Lines the card list takes when rendered.
    pub fn card_line_count(&self) -> u16 {
        let cards = self.controller().filtered().len();
        u16::try_from(cards.saturating_mul(super::components::cards::LINES_PER_CARD))
            .unwrap_or(u16::MAX)
    }
}
