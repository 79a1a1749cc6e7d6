//! Markup rendering of the dashboard.

pub mod cards;
pub mod escape;
pub mod format;
pub mod icons;
pub mod page;

pub use page::{HtmlPage, Page};

use crate::consts::cli_consts::elements;
use crate::controller::{DashboardController, FilterCriteria, ViewState};
use chrono::{Local, TimeZone};
use std::fmt::Display;

/// Title of standalone documents.
pub const DOCUMENT_TITLE: &str = "Pull Request Dashboard";

/// Reads the filter criteria from the page's controls.
pub fn read_criteria(page: &impl Page) -> FilterCriteria {
    FilterCriteria::from_values(
        &page.value(elements::REPO_FILTER),
        &page.value(elements::STATUS_FILTER),
        &page.value(elements::AUTHOR_FILTER),
        &page.value(elements::SEARCH_INPUT),
    )
}

/// Writes the criteria back into the page's controls.
pub fn write_criteria(page: &mut impl Page, criteria: &FilterCriteria) {
    page.set_value(elements::REPO_FILTER, criteria.repo.as_deref().unwrap_or(""));
    page.set_value(
        elements::STATUS_FILTER,
        &criteria.state.map(|s| s.to_string()).unwrap_or_default(),
    );
    page.set_value(
        elements::AUTHOR_FILTER,
        criteria.author.as_deref().unwrap_or(""),
    );
    page.set_value(elements::SEARCH_INPUT, &criteria.search);
}

/// Brings every element of the page in line with the controller.
pub fn sync_page<Tz>(controller: &DashboardController, page: &mut impl Page, tz: &Tz)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let stats = controller.stats();
    page.set_text(elements::TOTAL_COUNT, &stats.total.to_string());
    page.set_text(elements::OPEN_COUNT, &stats.open.to_string());
    page.set_text(elements::CLOSED_COUNT, &stats.closed.to_string());
    page.set_text(elements::MERGED_COUNT, &stats.merged.to_string());

    let criteria = controller.criteria();
    let options = controller.options();
    page.set_html(
        elements::REPO_FILTER,
        &cards::options_markup("All repositories", &options.repos, criteria.repo.as_deref()),
    );
    page.set_html(
        elements::STATUS_FILTER,
        &cards::state_options_markup(criteria.state),
    );
    page.set_html(
        elements::AUTHOR_FILTER,
        &cards::options_markup("All authors", &options.authors, criteria.author.as_deref()),
    );
    write_criteria(&mut *page, criteria);

    let content = match controller.view() {
        ViewState::Loading => cards::loading_state(),
        ViewState::Error(message) => cards::error_state(message),
        ViewState::Loaded => cards::render_records(controller.filtered(), tz),
    };
    page.set_html(elements::CONTAINER, &content);
}

/// Applies the page's current control values, as a change or input listener would.
pub fn on_filter_input<Tz>(controller: &mut DashboardController, page: &mut impl Page, tz: &Tz)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    controller.set_criteria(read_criteria(&*page));
    sync_page(controller, page, tz);
}

/// The whole document, or only the content container.
pub fn page_output(page: &HtmlPage, fragment: bool) -> String {
    if fragment {
        page.html(elements::CONTAINER).to_string()
    } else {
        page.document(DOCUMENT_TITLE)
    }
}

/// Renders the controller in local time.
pub fn render_page(controller: &DashboardController, fragment: bool) -> String {
    let mut page = HtmlPage::new();
    sync_page(controller, &mut page, &Local);
    page_output(&page, fragment)
}
