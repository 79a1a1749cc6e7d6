//! Dashboard card list component
//!
//! One block of lines per filtered record, or the loading, empty and error
//! panels.

use super::super::state::DashboardState;
use super::super::utils::{get_state_color, sanitize, spinner_frame};
use crate::api::PullRequestRecord;
use crate::controller::{UNKNOWN_REPO, ViewState};
use crate::markup::format::format_date;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

/// Lines each card occupies, including the separator.
pub const LINES_PER_CARD: usize = 4;

fn card_lines(record: &PullRequestRecord) -> [Line<'static>; LINES_PER_CARD] {
    let state = record.state();
    let number = record
        .pr_num
        .map(|n| format!("#{}", n))
        .unwrap_or_else(|| "#N/A".to_string());

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", state),
            Style::default()
                .fg(Color::Black)
                .bg(get_state_color(state)),
        ),
        Span::raw(" "),
        Span::styled(
            sanitize(record.title().unwrap_or("Untitled PR")),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", number), Style::default().fg(Color::DarkGray)),
    ]);

    let meta = Line::from(vec![
        Span::styled(
            format!(
                "{}/{}",
                sanitize(record.repo_owner().unwrap_or("Unknown")),
                sanitize(record.repo_name().unwrap_or(UNKNOWN_REPO))
            ),
            Style::default().fg(Color::LightBlue),
        ),
        Span::styled("  by ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            sanitize(record.author().unwrap_or("Unknown")),
            Style::default().fg(Color::LightYellow),
        ),
        Span::styled("  created ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format_date(record.created_at.as_deref()),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let url = Line::from(Span::styled(
        sanitize(record.url().unwrap_or("")),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::UNDERLINED),
    ));

    [title, meta, url, Line::from("")]
}

fn centered(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).alignment(Alignment::Center)
}

pub fn render_cards_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let controller = state.controller();
    let paragraph = match controller.view() {
        ViewState::Loading => centered(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} Loading pull requests...", spinner_frame(state.tick)),
                Style::default().fg(Color::LightBlue),
            )),
        ]),
        ViewState::Error(message) => centered(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Error loading data",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                sanitize(message),
                Style::default().fg(Color::Red),
            )),
        ]),
        ViewState::Loaded if controller.filtered().is_empty() => centered(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No pull requests found",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Try adjusting your filters or check back later.",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        ViewState::Loaded => {
            // Unwrapped, so every card is exactly LINES_PER_CARD rows for scrolling
            let lines: Vec<Line> = controller.filtered().iter().flat_map(card_lines).collect();
            Paragraph::new(lines).scroll((state.scroll, 0))
        }
    };

    let block = Block::default()
        .title(format!("PULL REQUESTS ({})", controller.filtered().len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(paragraph.block(block), area);
}
