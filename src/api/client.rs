//! Record list client
//!
//! Fetches the full pull-request list from the backend.

use crate::api::PrSource;
use crate::api::error::ApiError;
use crate::api::types::{PrListResponse, PullRequestRecord};
use crate::consts::cli_consts::http;
use crate::environment::Environment;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};

// Build timestamp in milliseconds since epoch
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP", "Build timestamp not available");

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("pr-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
}

impl ApiClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    /// Turns a response body into the record list. A body without `data` is an error.
    /// Rows that do not decode are skipped.
    fn decode_records(bytes: &[u8]) -> Result<Vec<PullRequestRecord>, ApiError> {
        let body: PrListResponse = serde_json::from_slice(bytes)?;
        let rows = body.data.ok_or(ApiError::MissingData)?;
        Ok(rows
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("skipping pull request row {}: {}", index, e);
                    None
                }
            })
            .collect())
    }
}

#[async_trait]
impl PrSource for ApiClient {
    fn endpoint(&self) -> String {
        self.environment.api_url()
    }

    async fn fetch_records(&self) -> Result<Vec<PullRequestRecord>, ApiError> {
        let response = self
            .client
            .get(self.endpoint())
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Self::decode_records(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on a random local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> Environment {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut read = Vec::new();
            while !read.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                read.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        Environment::Custom {
            server_url: format!("http://{}", addr),
        }
    }

    #[test]
    fn decode_rejects_body_without_data() {
        let err = ApiClient::decode_records(b"{}").unwrap_err();
        assert!(matches!(err, ApiError::MissingData));

        let err = ApiClient::decode_records(br#"{"data": null}"#).unwrap_err();
        assert!(matches!(err, ApiError::MissingData));
    }

    #[test]
    fn decode_accepts_empty_list() {
        let records = ApiClient::decode_records(br#"{"data": []}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn decode_skips_rows_that_do_not_fit() {
        let body = br#"{"data": [
            {"pr_num": 1, "pr_title": "Good"},
            {"pr_num": "7", "pr_title": "String number"},
            {"pr_num": -3, "pr_title": "Negative number"},
            "not an object",
            {"pr_num": 2, "pr_title": "Also good"}
        ]}"#;
        let records = ApiClient::decode_records(body).unwrap();
        let titles: Vec<_> = records.iter().filter_map(|r| r.title()).collect();
        assert_eq!(titles, ["Good", "Also good"]);
    }

    #[test]
    fn decode_reports_malformed_json() {
        let err = ApiClient::decode_records(b"<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn fetches_records_from_server() {
        let env = serve_once(
            "200 OK",
            r#"{"data": [{"pr_num": 1, "pr_title": "One", "pr_state": "open"}]}"#,
        )
        .await;
        let client = ApiClient::new(env).unwrap();

        let records = client.fetch_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), Some("One"));
    }

    #[tokio::test]
    async fn server_error_surfaces_status_and_message() {
        let env = serve_once(
            "500 Internal Server Error",
            r#"{"error": "Database not available"}"#,
        )
        .await;
        let client = ApiClient::new(env).unwrap();

        match client.fetch_records().await {
            Err(ApiError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Database not available");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }
}
