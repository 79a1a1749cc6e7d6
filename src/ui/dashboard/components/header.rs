//! Dashboard header component
//!
//! Renders the title, the counters and the push channel status

use super::super::state::DashboardState;
use crate::channel::ChannelStatus;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn status_color(status: &ChannelStatus) -> Color {
    match status {
        ChannelStatus::Connected => Color::LightGreen,
        ChannelStatus::Connecting => Color::LightYellow,
        ChannelStatus::Disconnected { .. } => Color::LightRed,
        ChannelStatus::Stopped => Color::DarkGray,
    }
}

pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title = Paragraph::new(format!(
        "PULL REQUEST DASHBOARD v{}",
        env!("CARGO_PKG_VERSION")
    ))
    .alignment(Alignment::Center)
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, header_chunks[0]);

    let stats = state.controller().stats();
    let counter = |label: &str, value: usize, color: Color| {
        vec![
            Span::styled(format!("{} ", label), Style::default().fg(Color::Gray)),
            Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(counter("Total", stats.total, Color::White));
    spans.extend(counter("Open", stats.open, Color::Green));
    spans.extend(counter("Closed", stats.closed, Color::Red));
    spans.extend(counter("Merged", stats.merged, Color::Magenta));
    spans.push(Span::styled(
        format!("[{}]", state.channel_status),
        Style::default().fg(status_color(&state.channel_status)),
    ));
    if let Some(loaded_at) = state.controller().last_loaded_at() {
        spans.push(Span::styled(
            format!("  updated {}", loaded_at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let counters = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(counters, header_chunks[1]);
}
