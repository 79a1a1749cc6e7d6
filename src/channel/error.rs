//! Error types for the push channel

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Invalid channel URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Timed out waiting for the server handshake")]
    HandshakeTimeout,

    #[error("Connection closed by server")]
    Closed,
}

impl ChannelError {
    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        ChannelError::Protocol(message.into())
    }
}
