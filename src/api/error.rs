//! Error handling for the record list endpoint

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The body could not be parsed as the expected JSON document.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The server answered successfully but without a `data` field.
    #[error("No data received from server")]
    MissingData,
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http {
            status,
            message: Self::extract_message(&text),
        }
    }

    /// Pulls the `error` field out of a JSON error body, falling back to the raw text.
    fn extract_message(text: &str) -> String {
        serde_json::from_str::<serde_json::Value>(text)
            .ok()
            .and_then(|value| value.get("error")?.as_str().map(str::to_string))
            .unwrap_or_else(|| text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_error_field_from_json_body() {
        assert_eq!(
            ApiError::extract_message(r#"{"error": "Database not available"}"#),
            "Database not available"
        );
    }

    #[test]
    fn falls_back_to_raw_text() {
        assert_eq!(
            ApiError::extract_message("  Bad Gateway\n"),
            "Bad Gateway"
        );
    }

    #[test]
    fn missing_data_message_matches_the_error_panel() {
        assert_eq!(
            ApiError::MissingData.to_string(),
            "No data received from server"
        );
    }
}
