//! Centralized error handling and classification

use crate::api::ApiError;
use crate::channel::ChannelError;
use crate::logging::LogLevel;

/// Centralized error handler for all network operations
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn new() -> Self {
        Self
    }

    /// Classify a load error and determine the appropriate log level
    pub fn classify_api_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Server errors - temporary issues
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Authentication errors - critical
            ApiError::Http { status, .. } if *status == 401 || *status == 403 => LogLevel::Error,

            // Wrong endpoint or backend contract broken
            ApiError::Http { .. } => LogLevel::Error,
            ApiError::Decode(_) | ApiError::MissingData => LogLevel::Error,

            // Network issues - usually temporary
            ApiError::Reqwest(_) => LogLevel::Warn,
        }
    }

    /// Classify a push channel error
    pub fn classify_channel_error(&self, error: &ChannelError) -> LogLevel {
        match error {
            // Bad configuration never fixes itself
            ChannelError::Url(_) => LogLevel::Error,
            ChannelError::Protocol(_) => LogLevel::Warn,
            ChannelError::WebSocket(_) | ChannelError::HandshakeTimeout | ChannelError::Closed => {
                LogLevel::Warn
            }
        }
    }

    /// Determine whether reconnecting can help
    pub fn should_reconnect(&self, error: &ChannelError) -> bool {
        !matches!(error, ChannelError::Url(_))
    }

    /// Text shown in the error panel for a failed load.
    pub fn user_message(error: &ApiError) -> String {
        match error {
            ApiError::MissingData => "No data received from server".to_string(),
            ApiError::Http { message, .. } if !message.is_empty() => {
                format!("Failed to load pull requests: {}", message)
            }
            _ => "Failed to load pull requests".to_string(),
        }
    }
}
