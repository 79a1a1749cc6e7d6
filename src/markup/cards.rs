//! Card, option and state-panel markup.
//!
//! Every piece of record data passes through [`escape_html`] before it is
//! interpolated.

use super::escape::{escape_html, safe_href};
use super::format::format_date_in;
use super::icons::Icon;
use crate::api::{PrState, PullRequestRecord};
use crate::controller::UNKNOWN_REPO;
use chrono::TimeZone;
use std::fmt::Display;

const UNTITLED: &str = "Untitled PR";
const UNKNOWN: &str = "Unknown";

/// Renders the filtered list: one card per record, or the empty state.
pub fn render_records<Tz>(records: &[PullRequestRecord], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if records.is_empty() {
        return empty_state();
    }
    let cards: String = records.iter().map(|record| render_card(record, tz)).collect();
    format!(r#"<div class="pr-grid">{}</div>"#, cards)
}

fn meta_item(icon: Icon, label: &str, value_html: &str) -> String {
    format!(
        r#"<div class="meta-item">{}<div><div class="meta-label">{}</div><div class="meta-value">{}</div></div></div>"#,
        icon.svg(),
        label,
        value_html
    )
}

/// Renders a single card.
pub fn render_card<Tz>(record: &PullRequestRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let state = record.state();
    let title = escape_html(record.title().unwrap_or(UNTITLED));
    let owner = escape_html(record.repo_owner().unwrap_or(UNKNOWN));
    let repo = escape_html(record.repo_name().unwrap_or(UNKNOWN_REPO));
    let author = escape_html(record.author().unwrap_or(UNKNOWN));
    let created = escape_html(&format_date_in(record.created_at.as_deref(), tz));
    let number = record
        .pr_num
        .map(|n| n.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut card = String::from(r#"<div class="pr-card">"#);
    card.push_str(&format!(
        r#"<div class="pr-header"><h3 class="pr-title"><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></h3><div class="pr-status status-{}">{}</div></div>"#,
        safe_href(record.url()),
        title,
        state,
        state
    ));
    card.push_str(r#"<div class="pr-meta">"#);
    card.push_str(&meta_item(
        Icon::Repository,
        "Repository",
        &format!(r#"<span class="repo-badge">{}/{}</span>"#, owner, repo),
    ));
    card.push_str(&meta_item(Icon::User, "Author", &author));
    card.push_str(&meta_item(Icon::Clock, "Created", &created));
    card.push_str(&meta_item(Icon::Message, "PR Number", &format!("#{}", number)));
    card.push_str("</div></div>");
    card
}

/// Placeholder shown while a load is in flight.
pub fn loading_state() -> String {
    r#"<div class="loading"><div class="spinner"></div>Loading pull requests...</div>"#.to_string()
}

/// Shown when no record passes the filters.
pub fn empty_state() -> String {
    format!(
        r#"<div class="empty-state">{}<h3>No pull requests found</h3><p>Try adjusting your filters or check back later.</p></div>"#,
        Icon::Empty.svg()
    )
}

/// Shown when the last load failed.
pub fn error_state(message: &str) -> String {
    format!(
        r#"<div class="empty-state error-state">{}<h3>Error loading data</h3><p>{}</p></div>"#,
        Icon::Error.svg(),
        escape_html(message)
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

/// Option list for a text-valued filter, with the "any" entry first.
pub fn options_markup(any_label: &str, values: &[String], selected: Option<&str>) -> String {
    let mut html = option("", any_label, selected.is_none());
    for value in values {
        html.push_str(&option(value, value, selected == Some(value.as_str())));
    }
    html
}

/// Option list for the state filter.
pub fn state_options_markup(selected: Option<PrState>) -> String {
    let mut html = option("", "All statuses", selected.is_none());
    for state in PrState::FILTERABLE {
        let value = state.to_string();
        let mut label = value.clone();
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        html.push_str(&option(&value, &label, selected == Some(state)));
    }
    html
}
