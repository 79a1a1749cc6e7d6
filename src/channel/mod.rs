//! Push channel: change notifications from the server

pub mod error;
pub mod listener;
pub mod packet;

pub use error::ChannelError;
pub use listener::PushListener;

use std::fmt::Display;
use std::time::Duration;

/// Connection state of the push channel, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected {
        retry_in: Duration,
    },
    Stopped,
}

impl Display for ChannelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelStatus::Connecting => write!(f, "Connecting"),
            ChannelStatus::Connected => write!(f, "Live"),
            ChannelStatus::Disconnected { retry_in } => {
                write!(f, "Offline, retry in {}s", retry_in.as_secs().max(1))
            }
            ChannelStatus::Stopped => write!(f, "Stopped"),
        }
    }
}
