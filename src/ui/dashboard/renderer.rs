//! Dashboard main renderer

use super::components::{cards, filters, footer, header, logs};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(main_chunks[1]);

    filters::render_filters_panel(f, content_chunks[0], state);
    cards::render_cards_panel(f, content_chunks[1], state);
    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockPrSource, PrState};
    use crate::controller::DashboardController;
    use crate::controller::filter::tests::record;
    use crate::environment::Environment;
    use crate::session::Driver;
    use crate::ui::app::UIConfig;
    use crate::workers::{MessageSender, RecordFetcher};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn dashboard_state(controller: DashboardController) -> DashboardState {
        let (tx, _rx) = mpsc::channel(1);
        let fetcher = RecordFetcher::new(Arc::new(MockPrSource::new()), MessageSender::new(tx));
        DashboardState::new(
            Environment::Local,
            Driver::new(controller, fetcher),
            UIConfig::new(false),
        )
    }

    fn screen_text(controller: DashboardController) -> String {
        draw(&dashboard_state(controller), 140, 40)
    }

    fn draw(state: &DashboardState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn loaded_dashboard_shows_counters_and_cards() {
        let mut controller = DashboardController::default();
        let ticket = controller.begin_load();
        controller.complete_load(
            ticket,
            Ok(vec![
                record(7, "Fix login bug", "alice", "web", PrState::Open),
                record(8, "Add cache", "bob", "api", PrState::Merged),
            ]),
        );
        let text = screen_text(controller);

        assert!(text.contains("PULL REQUEST DASHBOARD"));
        assert!(text.contains("Fix login bug"));
        assert!(text.contains("acme/api"));
        assert!(text.contains("Showing 2 of 2"));
        assert!(text.contains("PULL REQUESTS (2)"));
    }

    #[test]
    fn long_titles_do_not_shift_cards_in_narrow_terminal() {
        let records: Vec<_> = (1..=5)
            .map(|n| {
                let title = format!(
                    "Card {}: refactor the session handling so reconnects reload everything",
                    n
                );
                record(n, &title, "alice", "web", PrState::Open)
            })
            .collect();
        let mut controller = DashboardController::default();
        let ticket = controller.begin_load();
        controller.complete_load(ticket, Ok(records));

        let mut state = dashboard_state(controller);
        let last_card = cards::LINES_PER_CARD * 4;
        state.scroll = last_card as u16;
        assert!(state.scroll < state.card_line_count());

        let text = draw(&state, 60, 40);
        assert!(text.contains("Card 5:"));
        assert!(!text.contains("Card 4:"));
    }

    #[test]
    fn error_view_shows_message() {
        let mut controller = DashboardController::default();
        let ticket = controller.begin_load();
        controller.complete_load(ticket, Err(crate::api::ApiError::MissingData));
        let text = screen_text(controller);

        assert!(text.contains("Error loading data"));
        assert!(text.contains("No data received from server"));
    }
}
