//! Wire types of the record list endpoint.

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a pull request.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PrState {
    Open,
    Closed,
    Merged,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PrState {
    /// States a user can filter on, in display order.
    pub const FILTERABLE: [PrState; 3] = [PrState::Open, PrState::Closed, PrState::Merged];
}

/// Repository a record belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub owner: Option<String>,
    pub name: Option<String>,
    pub full_name: Option<String>,
}

/// One pull request row as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestRecord {
    pub id: Option<serde_json::Value>,
    pub pr_num: Option<u64>,
    pub pr_title: Option<String>,
    pub pr_state: Option<PrState>,
    pub pr_author: Option<String>,
    pub pr_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub repositories: Option<Repository>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl PullRequestRecord {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.pr_title)
    }

    pub fn author(&self) -> Option<&str> {
        non_empty(&self.pr_author)
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(&self.pr_url)
    }

    pub fn state(&self) -> PrState {
        self.pr_state.unwrap_or_default()
    }

    pub fn repo_name(&self) -> Option<&str> {
        self.repositories.as_ref().and_then(|r| non_empty(&r.name))
    }

    pub fn repo_owner(&self) -> Option<&str> {
        self.repositories.as_ref().and_then(|r| non_empty(&r.owner))
    }
}

/// Body of `GET /api/prs`. Rows stay raw so one bad row cannot sink the list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrListResponse {
    #[serde(default)]
    pub data: Option<Vec<serde_json::Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_row() {
        let json = r#"{
            "id": 7,
            "pr_num": 42,
            "pr_title": "Fix flaky test",
            "pr_state": "merged",
            "pr_author": "octocat",
            "pr_url": "https://github.com/acme/widgets/pull/42",
            "created_at": "2024-03-01T12:00:00Z",
            "updated_at": "2024-03-02T08:30:00Z",
            "repositories": {"owner": "acme", "name": "widgets", "full_name": "acme/widgets"}
        }"#;
        let record: PullRequestRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.pr_num, Some(42));
        assert_eq!(record.state(), PrState::Merged);
        assert_eq!(record.repo_name(), Some("widgets"));
        assert_eq!(record.repo_owner(), Some("acme"));
    }

    #[test]
    fn unknown_and_missing_states_map_to_unknown() {
        let odd: PullRequestRecord = serde_json::from_str(r#"{"pr_state": "draft"}"#).unwrap();
        assert_eq!(odd.state(), PrState::Unknown);

        let missing: PullRequestRecord = serde_json::from_str(r#"{"pr_state": null}"#).unwrap();
        assert_eq!(missing.state(), PrState::Unknown);
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let record: PullRequestRecord =
            serde_json::from_str(r#"{"pr_title": "", "repositories": {}}"#).unwrap();
        assert_eq!(record.title(), None);
        assert_eq!(record.repo_name(), None);
    }

    #[test]
    fn state_parses_case_insensitively() {
        assert_eq!("Open".parse::<PrState>().unwrap(), PrState::Open);
        assert_eq!(PrState::Merged.to_string(), "merged");
        assert!("reopened".parse::<PrState>().is_err());
    }

    #[test]
    fn response_without_data_key_has_no_data() {
        let response: PrListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_none());
    }
}
