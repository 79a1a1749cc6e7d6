//! Engine.IO / Socket.IO text packet codec.
//!
//! Only the subset a listening client needs: the open handshake, ping/pong,
//! namespace connect and event packets. Binary packets are ignored.

use super::error::ChannelError;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Sent after the open packet to join the default namespace.
pub const CONNECT_NAMESPACE: &str = "40";

/// Engine.IO transport-level packet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(String),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    pub fn parse(text: &str) -> Result<Self, ChannelError> {
        let mut chars = text.chars();
        let kind = chars
            .next()
            .ok_or_else(|| ChannelError::protocol("empty packet"))?;
        let data = chars.as_str().to_string();
        match kind {
            '0' => Ok(EnginePacket::Open(data)),
            '1' => Ok(EnginePacket::Close),
            '2' => Ok(EnginePacket::Ping(data)),
            '3' => Ok(EnginePacket::Pong(data)),
            '4' => Ok(EnginePacket::Message(data)),
            '5' => Ok(EnginePacket::Upgrade),
            '6' => Ok(EnginePacket::Noop),
            other => Err(ChannelError::protocol(format!(
                "unknown packet type '{}'",
                other
            ))),
        }
    }

    /// Reply to a ping, echoing its probe data.
    pub fn pong_for(ping_data: &str) -> String {
        format!("3{}", ping_data)
    }
}

/// Payload of the Engine.IO open packet.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OpenHandshake {
    pub sid: String,
    #[serde(default = "default_ping_interval")]
    pub ping_interval: u64,
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout: u64,
}

fn default_ping_interval() -> u64 {
    25_000
}

fn default_ping_timeout() -> u64 {
    20_000
}

impl OpenHandshake {
    pub fn parse(data: &str) -> Result<Self, ChannelError> {
        serde_json::from_str(data)
            .map_err(|e| ChannelError::protocol(format!("bad open packet: {}", e)))
    }

    /// Longest silence tolerated before the connection is considered dead.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_interval.saturating_add(self.ping_timeout))
    }
}

/// Socket.IO packet carried inside an Engine.IO message.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect,
    Disconnect,
    Event { name: String, payload: Value },
    ConnectError(String),
    Other,
}

impl SocketPacket {
    pub fn parse(text: &str) -> Result<Self, ChannelError> {
        let mut chars = text.chars();
        let kind = chars
            .next()
            .ok_or_else(|| ChannelError::protocol("empty socket packet"))?;
        let body = strip_namespace_and_ack(chars.as_str());
        match kind {
            '0' => Ok(SocketPacket::Connect),
            '1' => Ok(SocketPacket::Disconnect),
            '2' => parse_event(body),
            '4' => {
                let message = serde_json::from_str::<Value>(body)
                    .ok()
                    .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                    .unwrap_or_else(|| body.to_string());
                Ok(SocketPacket::ConnectError(message))
            }
            _ => Ok(SocketPacket::Other),
        }
    }
}

/// Drops an optional `/namespace,` prefix and an optional numeric ack id.
fn strip_namespace_and_ack(body: &str) -> &str {
    let body = match body.strip_prefix('/') {
        Some(rest) => rest.split_once(',').map(|(_, tail)| tail).unwrap_or(""),
        None => body,
    };
    body.trim_start_matches(|c: char| c.is_ascii_digit())
}

fn parse_event(body: &str) -> Result<SocketPacket, ChannelError> {
    let items: Vec<Value> = serde_json::from_str(body)
        .map_err(|e| ChannelError::protocol(format!("bad event packet: {}", e)))?;
    let mut items = items.into_iter();
    let name = match items.next() {
        Some(Value::String(name)) => name,
        _ => return Err(ChannelError::protocol("event packet without a name")),
    };
    let payload = items.next().unwrap_or(Value::Null);
    Ok(SocketPacket::Event { name, payload })
}

/// Events the dashboard understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    Connected { message: Option<String> },
    PrUpdate,
    Other(String),
}

impl PushEvent {
    pub fn from_event(name: &str, payload: &Value) -> Self {
        match name {
            "connected" => PushEvent::Connected {
                message: payload
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            "pr_update" => PushEvent::PrUpdate,
            other => PushEvent::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_engine_packets() {
        assert_eq!(
            EnginePacket::parse("0{\"sid\":\"x\"}").unwrap(),
            EnginePacket::Open("{\"sid\":\"x\"}".to_string())
        );
        assert_eq!(
            EnginePacket::parse("2").unwrap(),
            EnginePacket::Ping(String::new())
        );
        assert_eq!(
            EnginePacket::parse("2probe").unwrap(),
            EnginePacket::Ping("probe".to_string())
        );
        assert_eq!(
            EnginePacket::parse("42[\"a\"]").unwrap(),
            EnginePacket::Message("2[\"a\"]".to_string())
        );
        assert!(EnginePacket::parse("").is_err());
        assert!(EnginePacket::parse("9").is_err());
    }

    #[test]
    fn pong_echoes_probe() {
        assert_eq!(EnginePacket::pong_for(""), "3");
        assert_eq!(EnginePacket::pong_for("probe"), "3probe");
    }

    #[test]
    fn open_handshake_defaults_and_idle_timeout() {
        let open = OpenHandshake::parse(
            r#"{"sid":"abc","upgrades":[],"pingInterval":1000,"pingTimeout":500}"#,
        )
        .unwrap();
        assert_eq!(open.sid, "abc");
        assert_eq!(open.idle_timeout(), Duration::from_millis(1500));

        let bare = OpenHandshake::parse(r#"{"sid":"abc"}"#).unwrap();
        assert_eq!(bare.idle_timeout(), Duration::from_millis(45_000));
        assert!(OpenHandshake::parse("nope").is_err());
    }

    #[test]
    fn parses_events_with_namespace_and_ack() {
        let plain = SocketPacket::parse(r#"2["pr_update",{"id":1}]"#).unwrap();
        assert_eq!(
            plain,
            SocketPacket::Event {
                name: "pr_update".to_string(),
                payload: json!({"id": 1})
            }
        );

        let namespaced = SocketPacket::parse(r#"2/admin,12["connected"]"#).unwrap();
        assert_eq!(
            namespaced,
            SocketPacket::Event {
                name: "connected".to_string(),
                payload: Value::Null
            }
        );
        assert!(SocketPacket::parse("2[]").is_err());
        assert!(SocketPacket::parse("2[1]").is_err());
    }

    #[test]
    fn parses_connect_and_errors() {
        assert_eq!(
            SocketPacket::parse(r#"0{"sid":"s"}"#).unwrap(),
            SocketPacket::Connect
        );
        assert_eq!(SocketPacket::parse("1").unwrap(), SocketPacket::Disconnect);
        assert_eq!(
            SocketPacket::parse(r#"4{"message":"Not authorized"}"#).unwrap(),
            SocketPacket::ConnectError("Not authorized".to_string())
        );
        assert_eq!(SocketPacket::parse("3[]").unwrap(), SocketPacket::Other);
    }

    #[test]
    fn maps_known_events() {
        assert_eq!(
            PushEvent::from_event("connected", &json!({"message": "Connected to server"})),
            PushEvent::Connected {
                message: Some("Connected to server".to_string())
            }
        );
        assert_eq!(
            PushEvent::from_event("pr_update", &Value::Null),
            PushEvent::PrUpdate
        );
        assert_eq!(
            PushEvent::from_event("typing", &Value::Null),
            PushEvent::Other("typing".to_string())
        );
    }
}
