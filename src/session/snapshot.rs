//! One-shot render: fetch once, render once, exit.

use chrono::Local;
use crate::api::{ApiClient, PrSource};
use crate::controller::{DashboardController, FilterCriteria, LoadOutcome};
use crate::environment::Environment;
use crate::markup::{HtmlPage, on_filter_input, page_output, sync_page, write_criteria};
use crate::print_cmd_success;
use std::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct SnapshotOptions {
    pub criteria: FilterCriteria,
    /// Write here instead of stdout
    pub output: Option<PathBuf>,
    /// Only the content container, not a whole document
    pub fragment: bool,
}

/// Fetches from `source`, then applies `criteria` through the page's filter
/// controls the way a user would, and renders the result.
pub async fn take_snapshot(
    source: &dyn PrSource,
    criteria: FilterCriteria,
    fragment: bool,
) -> Result<String, Box<dyn Error>> {
    let mut controller = DashboardController::default();
    let ticket = controller.begin_load();
    let result = source.fetch_records().await;
    let detail = result.as_ref().err().map(|e| e.to_string());

    if let LoadOutcome::Failed { message } = controller.complete_load(ticket, result) {
        return match detail {
            Some(detail) if detail != message => Err(format!("{} ({})", message, detail).into()),
            _ => Err(message.into()),
        };
    }

    let mut page = HtmlPage::new();
    sync_page(&controller, &mut page, &Local);
    write_criteria(&mut page, &criteria);
    on_filter_input(&mut controller, &mut page, &Local);
    Ok(page_output(&page, fragment))
}

pub async fn run_snapshot(env: Environment, options: SnapshotOptions) -> Result<(), Box<dyn Error>> {
    let client = ApiClient::new(env)?;
    let html = take_snapshot(&client, options.criteria, options.fragment).await?;
    match options.output {
        Some(path) => {
            std::fs::write(&path, html)?;
            print_cmd_success!("Snapshot written", "{}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}
