//! Dashboard footer component
//!
//! Key help, which changes while the search box has focus

use super::super::state::{DashboardState, InputMode};
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer_text = match state.input_mode {
        InputMode::Normal => {
            "[R] Repo  [S] Status  [A] Author  [/] Search  [C] Clear  [Shift+R/F5] Reload  [Up/Down] Scroll  [Q] Quit"
        }
        InputMode::Search => "Type to search  [Backspace] Delete  [Enter/Esc] Done",
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
