//! Filter engine
//!
//! Pure projections over the loaded record list: criteria matching, the
//! option lists offered by the filter controls, and the state counters.

use crate::api::{PrState, PullRequestRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Label used for records that carry no repository name.
pub const UNKNOWN_REPO: &str = "Unknown";

/// The four independent filter criteria. `None` or an empty search means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub repo: Option<String>,
    pub state: Option<PrState>,
    pub author: Option<String>,
    pub search: String,
}

fn selected(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl FilterCriteria {
    /// Builds criteria from raw control values, where an empty string selects "any".
    pub fn from_values(repo: &str, state: &str, author: &str, search: &str) -> Self {
        Self {
            repo: selected(repo),
            state: state.parse().ok(),
            author: selected(author),
            search: search.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_none() && self.state.is_none() && self.author.is_none() && self.search.is_empty()
    }

    /// True when the record satisfies every active criterion.
    pub fn matches(&self, record: &PullRequestRecord) -> bool {
        self.matches_repo(record)
            && self.matches_state(record)
            && self.matches_author(record)
            && self.matches_search(record)
    }

    fn matches_repo(&self, record: &PullRequestRecord) -> bool {
        match &self.repo {
            Some(repo) => record.repo_name().unwrap_or(UNKNOWN_REPO) == repo,
            None => true,
        }
    }

    fn matches_state(&self, record: &PullRequestRecord) -> bool {
        match self.state {
            Some(state) => record.state() == state,
            None => true,
        }
    }

    fn matches_author(&self, record: &PullRequestRecord) -> bool {
        match &self.author {
            Some(author) => record.author() == Some(author.as_str()),
            None => true,
        }
    }

    fn matches_search(&self, record: &PullRequestRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        [record.title(), record.author(), record.repo_name()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term))
    }

    /// Recomputes the filtered view over the whole list.
    pub fn apply(&self, records: &[PullRequestRecord]) -> Vec<PullRequestRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }

    /// Drops repository and author selections that no longer exist in `options`.
    pub fn retain_available(&mut self, options: &FilterOptions) {
        if let Some(repo) = &self.repo {
            if !options.repos.contains(repo) {
                self.repo = None;
            }
        }
        if let Some(author) = &self.author {
            if !options.authors.contains(author) {
                self.author = None;
            }
        }
    }
}

/// Distinct values offered by the repository and author controls, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub repos: Vec<String>,
    pub authors: Vec<String>,
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

impl FilterOptions {
    pub fn from_records(records: &[PullRequestRecord]) -> Self {
        Self {
            repos: distinct(
                records
                    .iter()
                    .map(|r| r.repo_name().unwrap_or(UNKNOWN_REPO)),
            ),
            authors: distinct(records.iter().filter_map(|r| r.author())),
        }
    }
}

/// Counters shown above the filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    pub merged: usize,
}

impl Stats {
    pub fn from_records(records: &[PullRequestRecord]) -> Self {
        records.iter().fold(
            Stats {
                total: records.len(),
                ..Stats::default()
            },
            |mut stats, record| {
                match record.state() {
                    PrState::Open => stats.open += 1,
                    PrState::Closed => stats.closed += 1,
                    PrState::Merged => stats.merged += 1,
                    PrState::Unknown => {}
                }
                stats
            },
        )
    }
}
