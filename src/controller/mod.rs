//! Dashboard controller
//!
//! Owns the loaded records, the filter state and the view state. Both the
//! markup page and the terminal dashboard are rendered from this value.

pub mod filter;
pub mod sequence;

pub use filter::{FilterCriteria, FilterOptions, Stats, UNKNOWN_REPO};
pub use sequence::{LoadTicket, RequestSequence};

use crate::api::{ApiError, PullRequestRecord};
use crate::network::ErrorHandler;
use chrono::{DateTime, Local};

/// What the content container currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// A load is in flight and nothing newer has been rendered since it started.
    Loading,
    /// Cards (or the empty state) for the filtered records.
    Loaded,
    /// The last load failed; the message stays until a load succeeds.
    Error(String),
}

/// Result of handing a finished load to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The records replaced the previous list.
    Applied { count: usize },
    /// The load failed and the error panel is shown.
    Failed { message: String },
    /// A newer load was already applied; the result was dropped.
    Stale,
}

#[derive(Debug)]
pub struct DashboardController {
    records: Vec<PullRequestRecord>,
    filtered: Vec<PullRequestRecord>,
    criteria: FilterCriteria,
    options: FilterOptions,
    stats: Stats,
    view: ViewState,
    sequence: RequestSequence,
    last_loaded_at: Option<DateTime<Local>>,
}

impl Default for DashboardController {
    fn default() -> Self {
        Self::new(FilterCriteria::default())
    }
}

impl DashboardController {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            records: Vec::new(),
            filtered: Vec::new(),
            criteria,
            options: FilterOptions::default(),
            stats: Stats::default(),
            view: ViewState::Loading,
            sequence: RequestSequence::new(),
            last_loaded_at: None,
        }
    }

    pub fn records(&self) -> &[PullRequestRecord] {
        &self.records
    }

    pub fn filtered(&self) -> &[PullRequestRecord] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn last_loaded_at(&self) -> Option<DateTime<Local>> {
        self.last_loaded_at
    }

    /// True while a load newer than the last applied one is outstanding.
    pub fn has_pending_load(&self) -> bool {
        self.sequence.has_pending()
    }

    /// Marks a load as started and returns its ticket.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.view = ViewState::Loading;
        self.sequence.issue()
    }

    /// Applies a finished load unless a newer one already completed.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<PullRequestRecord>, ApiError>,
    ) -> LoadOutcome {
        if !self.sequence.accept(ticket) {
            return LoadOutcome::Stale;
        }

        match result {
            Ok(records) => {
                let count = records.len();
                self.replace_records(records);
                self.view = ViewState::Loaded;
                self.last_loaded_at = Some(Local::now());
                LoadOutcome::Applied { count }
            }
            Err(err) => {
                let message = ErrorHandler::user_message(&err);
                self.view = ViewState::Error(message.clone());
                LoadOutcome::Failed { message }
            }
        }
    }

    /// Replaces the criteria and recomputes the filtered view.
    ///
    /// Filtering never blocks on a load: while one is in flight the previous
    /// records are shown. An error panel stays up until a load succeeds.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
        if self.view == ViewState::Loading && self.last_loaded_at.is_some() {
            self.view = ViewState::Loaded;
        }
    }

    fn replace_records(&mut self, records: Vec<PullRequestRecord>) {
        self.records = records;
        self.stats = Stats::from_records(&self.records);
        self.options = FilterOptions::from_records(&self.records);
        self.criteria.retain_available(&self.options);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = self.criteria.apply(&self.records);
    }
}

#[cfg(test)]
mod tests {
    use super::filter::tests::record;
    use super::*;
    use crate::api::PrState;

    fn two_repos() -> Vec<PullRequestRecord> {
        vec![
            record(1, "Same", "alice", "web", PrState::Open),
            record(2, "Same", "alice", "api", PrState::Open),
        ]
    }

    #[test]
    fn starts_loading_and_empty() {
        let controller = DashboardController::default();
        assert_eq!(controller.view(), &ViewState::Loading);
        assert!(controller.records().is_empty());
        assert_eq!(controller.stats(), Stats::default());
    }

    #[test]
    fn successful_load_replaces_records_and_derived_state() {
        let mut controller = DashboardController::default();
        let ticket = controller.begin_load();
        let outcome = controller.complete_load(ticket, Ok(two_repos()));

        assert_eq!(outcome, LoadOutcome::Applied { count: 2 });
        assert_eq!(controller.view(), &ViewState::Loaded);
        assert_eq!(controller.stats().open, 2);
        assert_eq!(controller.options().repos, vec!["web", "api"]);
        assert_eq!(controller.filtered().len(), 2);
        assert!(controller.last_loaded_at().is_some());
    }

    #[test]
    fn missing_data_shows_error_and_keeps_list_empty() {
        let mut controller = DashboardController::default();
        let ticket = controller.begin_load();
        let outcome = controller.complete_load(ticket, Err(ApiError::MissingData));

        assert_eq!(
            outcome,
            LoadOutcome::Failed {
                message: "No data received from server".to_string()
            }
        );
        assert_eq!(
            controller.view(),
            &ViewState::Error("No data received from server".to_string())
        );
        assert!(controller.records().is_empty());
    }

    #[test]
    fn failed_load_keeps_previous_records() {
        let mut controller = DashboardController::default();
        let first = controller.begin_load();
        controller.complete_load(first, Ok(two_repos()));

        let second = controller.begin_load();
        controller.complete_load(
            second,
            Err(ApiError::Http {
                status: 502,
                message: "Bad Gateway".to_string(),
            }),
        );

        assert_eq!(controller.records().len(), 2);
        assert_eq!(
            controller.view(),
            &ViewState::Error("Failed to load pull requests: Bad Gateway".to_string())
        );
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut controller = DashboardController::default();
        let slow = controller.begin_load();
        let fast = controller.begin_load();

        controller.complete_load(fast, Ok(two_repos()));
        let outcome = controller.complete_load(slow, Ok(Vec::new()));

        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(controller.records().len(), 2);
    }

    #[test]
    fn stale_error_does_not_replace_newer_data() {
        let mut controller = DashboardController::default();
        let slow = controller.begin_load();
        let fast = controller.begin_load();

        controller.complete_load(fast, Ok(two_repos()));
        let outcome = controller.complete_load(slow, Err(ApiError::MissingData));

        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(controller.view(), &ViewState::Loaded);
    }

    #[test]
    fn selecting_a_repository_yields_only_its_records() {
        let mut controller = DashboardController::default();
        let ticket = controller.begin_load();
        controller.complete_load(ticket, Ok(two_repos()));

        controller.set_criteria(FilterCriteria::from_values("api", "", "", ""));
        assert_eq!(controller.filtered().len(), 1);
        assert_eq!(controller.filtered()[0].pr_num, Some(2));
        // The source list is untouched by filtering.
        assert_eq!(controller.records().len(), 2);
    }

    #[test]
    fn reload_keeps_selection_that_still_exists() {
        let mut controller = DashboardController::default();
        let ticket = controller.begin_load();
        controller.complete_load(ticket, Ok(two_repos()));
        controller.set_criteria(FilterCriteria::from_values("api", "", "alice", ""));

        let ticket = controller.begin_load();
        controller.complete_load(ticket, Ok(two_repos()));
        assert_eq!(controller.criteria().repo.as_deref(), Some("api"));

        let ticket = controller.begin_load();
        controller.complete_load(
            ticket,
            Ok(vec![record(3, "Other", "bob", "web", PrState::Closed)]),
        );
        assert_eq!(controller.criteria().repo, None);
        assert_eq!(controller.criteria().author, None);
        assert_eq!(controller.filtered().len(), 1);
    }

    #[test]
    fn filtering_during_reload_shows_previous_data() {
        let mut controller = DashboardController::default();
        let ticket = controller.begin_load();
        controller.complete_load(ticket, Ok(two_repos()));

        controller.begin_load();
        controller.set_criteria(FilterCriteria::from_values("web", "", "", ""));
        assert_eq!(controller.view(), &ViewState::Loaded);
        assert_eq!(controller.filtered().len(), 1);
        assert!(controller.has_pending_load());
    }

    #[test]
    fn filtering_before_first_load_keeps_loading() {
        let mut controller = DashboardController::default();
        controller.begin_load();
        controller.set_criteria(FilterCriteria::from_values("", "", "", "x"));
        assert_eq!(controller.view(), &ViewState::Loading);
    }

    #[test]
    fn error_panel_persists_across_filter_changes() {
        let mut controller = DashboardController::default();
        let ticket = controller.begin_load();
        controller.complete_load(ticket, Err(ApiError::MissingData));

        controller.set_criteria(FilterCriteria::from_values("", "open", "", ""));
        assert!(matches!(controller.view(), ViewState::Error(_)));
    }
}
