use crate::consts::cli_consts::{DEFAULT_SERVER_URL, PRS_ENDPOINT, SOCKET_IO_PATH};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use url::Url;

/// The backend the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Development server on localhost.
    #[default]
    Local,
    /// Any other server, identified by its base URL.
    Custom { server_url: String },
}

impl Environment {
    /// Base URL of the server, without a trailing slash.
    pub fn server_url(&self) -> String {
        match self {
            Environment::Local => DEFAULT_SERVER_URL.to_string(),
            Environment::Custom { server_url } => server_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the record list endpoint.
    pub fn api_url(&self) -> String {
        format!("{}{}", self.server_url(), PRS_ENDPOINT)
    }

    /// WebSocket URL of the Socket.IO endpoint.
    pub fn socket_url(&self) -> String {
        let server = self.server_url();
        let ws_base = if let Some(rest) = server.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = server.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            server
        };
        format!("{}{}?EIO=4&transport=websocket", ws_base, SOCKET_IO_PATH)
    }
}

impl FromStr for Environment {
    type Err = ();

    /// Accepts `local` or an http(s) URL. URLs are stored normalized, so the
    /// scheme and host are lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        let url = Url::parse(trimmed).map_err(|_| ())?;
        match url.scheme() {
            "http" | "https" if url.has_host() => Ok(Environment::Custom {
                server_url: url.as_str().trim_end_matches('/').to_string(),
            }),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { server_url } => write!(f, "{}", server_url),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.server_url())
    }
}
