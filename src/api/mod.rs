pub(crate) mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{PrState, PullRequestRecord};

#[cfg(test)]
use mockall::automock;

/// Anything that can produce the full record set.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PrSource: Send + Sync {
    /// URL the records are read from, for log messages.
    fn endpoint(&self) -> String;

    /// Fetch every record the backend knows about.
    async fn fetch_records(&self) -> Result<Vec<PullRequestRecord>, ApiError>;
}
