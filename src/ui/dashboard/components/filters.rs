//! Dashboard filter panel component
//!
//! Shows the active filters, the search box and the server

use super::super::state::{DashboardState, InputMode};
use super::super::utils::{get_state_color, sanitize, spinner_frame};

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn filter_line(key: &str, label: &str, value: Option<String>, color: Color) -> Line<'static> {
    let (text, style) = match value {
        Some(value) => (
            sanitize(&value),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        None => ("Any".to_string(), Style::default().fg(Color::DarkGray)),
    };
    Line::from(vec![
        Span::styled(format!("[{}] ", key), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::styled(text, style),
    ])
}

pub fn render_filters_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let controller = state.controller();
    let criteria = controller.criteria();

    let mut lines = vec![
        filter_line("r", "Repository", criteria.repo.clone(), Color::LightBlue),
        filter_line(
            "s",
            "Status",
            criteria.state.map(|s| s.to_string()),
            criteria.state.map(get_state_color).unwrap_or(Color::Gray),
        ),
        filter_line("a", "Author", criteria.author.clone(), Color::LightYellow),
    ];

    let editing = state.input_mode == InputMode::Search;
    let mut search = sanitize(&criteria.search);
    if editing {
        search.push('_');
    }
    let search_style = if editing {
        Style::default().fg(Color::Black).bg(Color::LightCyan)
    } else if criteria.search.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(vec![
        Span::styled("[/] ", Style::default().fg(Color::Cyan)),
        Span::styled("Search: ", Style::default().fg(Color::Gray)),
        Span::styled(
            if search.is_empty() {
                "none".to_string()
            } else {
                search
            },
            search_style,
        ),
    ]));

    lines.push(Line::from(""));
    let mut showing = format!(
        "Showing {} of {}",
        controller.filtered().len(),
        controller.records().len()
    );
    if controller.has_pending_load() {
        showing.push_str(&format!(" {}", spinner_frame(state.tick)));
    }
    lines.push(Line::from(Span::styled(
        showing,
        Style::default().fg(Color::LightGreen),
    )));
    lines.push(Line::from(Span::styled(
        format!("Server: {}", state.environment.server_url()),
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title("FILTERS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
