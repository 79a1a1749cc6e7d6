//! Push listener
//!
//! Keeps a Socket.IO session open against the server and turns `pr_update`
//! notifications into reload requests. Dropped connections are retried
//! forever with exponential backoff; the first successful handshake after a
//! drop asks for a reload, since notifications may have been missed.

use super::ChannelStatus;
use super::error::ChannelError;
use super::packet::{CONNECT_NAMESPACE, EnginePacket, OpenHandshake, PushEvent, SocketPacket};
use crate::consts::cli_consts::reconnect;
use crate::environment::Environment;
use crate::events::EventType;
use crate::logging::LogLevel;
use crate::network::{BackoffConfig, ErrorHandler, ReconnectTimer};
use crate::workers::{MessageSender, ReloadTrigger};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

struct Connection {
    write: SplitSink<Socket, Message>,
    read: SplitStream<Socket>,
    handshake: OpenHandshake,
}

/// How a connected session ended without an error.
enum SessionEnd {
    Shutdown,
}

pub struct PushListener {
    environment: Environment,
    sender: MessageSender,
    error_handler: ErrorHandler,
    timer: ReconnectTimer,
}

impl PushListener {
    pub fn new(environment: Environment, sender: MessageSender) -> Self {
        Self::with_backoff(
            environment,
            sender,
            BackoffConfig::new(reconnect::initial_backoff(), reconnect::max_backoff()),
        )
    }

    pub fn with_backoff(
        environment: Environment,
        sender: MessageSender,
        backoff: BackoffConfig,
    ) -> Self {
        Self {
            environment,
            sender,
            error_handler: ErrorHandler::new(),
            timer: ReconnectTimer::new(backoff),
        }
    }

    /// Runs until shutdown or an error reconnecting cannot fix.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        let mut has_connected = false;
        loop {
            if !self.timer.can_proceed() {
                let delay = self.timer.time_until_next();
                tokio::select! {
                    _ = shutdown.recv() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            self.sender.send_status(ChannelStatus::Connecting).await;
            let attempt = tokio::select! {
                _ = shutdown.recv() => break,
                attempt = self.connect() => attempt,
            };
            let connection = match attempt {
                Ok(connection) => connection,
                Err(e) => {
                    if self.handle_failure(e).await {
                        continue;
                    }
                    break;
                }
            };

            self.timer.record_success();
            self.sender.send_status(ChannelStatus::Connected).await;
            self.sender
                .send_channel_event(
                    format!("Connected (session {})", connection.handshake.sid),
                    EventType::Success,
                    LogLevel::Info,
                )
                .await;
            if has_connected {
                self.sender.request_reload(ReloadTrigger::Reconnect).await;
            }
            has_connected = true;

            match self.listen(connection, &mut shutdown).await {
                Ok(SessionEnd::Shutdown) => break,
                Err(e) => {
                    if !self.handle_failure(e).await {
                        break;
                    }
                }
            }
        }
        self.sender.send_status(ChannelStatus::Stopped).await;
    }

    /// Logs the failure and schedules the next attempt. Returns false when retrying is pointless.
    async fn handle_failure(&mut self, error: ChannelError) -> bool {
        let level = self.error_handler.classify_channel_error(&error);
        if !self.error_handler.should_reconnect(&error) {
            self.sender
                .send_channel_event(
                    format!("Push channel disabled: {}", error),
                    EventType::Error,
                    level,
                )
                .await;
            return false;
        }

        let retry_in = self.timer.record_failure();
        self.sender
            .send_channel_event(
                format!(
                    "Push channel lost ({}), retry {} in {}ms",
                    error,
                    self.timer.consecutive_failures(),
                    retry_in.as_millis()
                ),
                EventType::Error,
                level,
            )
            .await;
        self.sender
            .send_status(ChannelStatus::Disconnected { retry_in })
            .await;
        true
    }

    async fn connect(&self) -> Result<Connection, ChannelError> {
        let url = Url::parse(&self.environment.socket_url())?;
        log::debug!("connecting push channel to {}", url);
        let (socket, _) = connect_async(url.as_str()).await?;
        let (mut write, mut read) = socket.split();

        let handshake = timeout(reconnect::handshake_timeout(), Self::read_open(&mut read))
            .await
            .map_err(|_| ChannelError::HandshakeTimeout)??;
        write.send(Message::Text(CONNECT_NAMESPACE.into())).await?;

        Ok(Connection {
            write,
            read,
            handshake,
        })
    }

    async fn read_open(read: &mut SplitStream<Socket>) -> Result<OpenHandshake, ChannelError> {
        while let Some(message) = read.next().await {
            match message? {
                Message::Text(text) => {
                    return match EnginePacket::parse(text.as_str())? {
                        EnginePacket::Open(data) => OpenHandshake::parse(&data),
                        other => Err(ChannelError::protocol(format!(
                            "expected open packet, got {:?}",
                            other
                        ))),
                    };
                }
                Message::Close(_) => return Err(ChannelError::Closed),
                _ => {}
            }
        }
        Err(ChannelError::Closed)
    }

    async fn listen(
        &self,
        connection: Connection,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Result<SessionEnd, ChannelError> {
        let Connection {
            mut write,
            mut read,
            handshake,
        } = connection;
        let idle = handshake.idle_timeout();

        loop {
            let next = tokio::select! {
                _ = shutdown.recv() => {
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(SessionEnd::Shutdown);
                }
                next = timeout(idle, read.next()) => next,
            };
            let message = match next {
                Err(_) => return Err(ChannelError::protocol("ping timeout")),
                Ok(None) => return Err(ChannelError::Closed),
                Ok(Some(message)) => message?,
            };

            match message {
                Message::Text(text) => {
                    if let Some(reply) = self.handle_text(text.as_str()).await? {
                        write.send(Message::Text(reply.into())).await?;
                    }
                }
                Message::Close(_) => return Err(ChannelError::Closed),
                _ => {}
            }
        }
    }

    /// Handles one text frame. Returns the frame to send back, if any.
    async fn handle_text(&self, text: &str) -> Result<Option<String>, ChannelError> {
        match EnginePacket::parse(text)? {
            EnginePacket::Ping(data) => Ok(Some(EnginePacket::pong_for(&data))),
            EnginePacket::Close => Err(ChannelError::Closed),
            EnginePacket::Message(body) => {
                self.handle_socket_packet(SocketPacket::parse(&body)?)
                    .await?;
                Ok(None)
            }
            EnginePacket::Open(_)
            | EnginePacket::Pong(_)
            | EnginePacket::Upgrade
            | EnginePacket::Noop => Ok(None),
        }
    }

    async fn handle_socket_packet(&self, packet: SocketPacket) -> Result<(), ChannelError> {
        match packet {
            SocketPacket::Connect => {
                log::debug!("joined default namespace");
                Ok(())
            }
            SocketPacket::Disconnect => Err(ChannelError::Closed),
            SocketPacket::ConnectError(message) => Err(ChannelError::Protocol(message)),
            SocketPacket::Event { name, payload } => {
                match PushEvent::from_event(&name, &payload) {
                    PushEvent::Connected { message } => {
                        self.sender
                            .send_channel_event(
                                message.unwrap_or_else(|| "Connected".to_string()),
                                EventType::Info,
                                LogLevel::Info,
                            )
                            .await;
                    }
                    PushEvent::PrUpdate => {
                        self.sender
                            .send_channel_event(
                                "Pull requests changed on the server",
                                EventType::Refresh,
                                LogLevel::Info,
                            )
                            .await;
                        self.sender.request_reload(ReloadTrigger::Push).await;
                    }
                    PushEvent::Other(name) => {
                        log::debug!("ignoring push event '{}'", name);
                    }
                }
                Ok(())
            }
            SocketPacket::Other => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workers::DashboardMessage;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;
    use tokio_tungstenite::accept_async;

    const OPEN: &str = r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#;

    async fn handshake(stream: TcpStream) -> WebSocketStream<TcpStream> {
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(Message::Text(OPEN.into())).await.unwrap();
        let joined = ws.next().await.unwrap().unwrap();
        assert_eq!(joined.to_text().unwrap(), "40");
        ws
    }

    fn environment(addr: std::net::SocketAddr) -> Environment {
        Environment::Custom {
            server_url: format!("http://{}", addr),
        }
    }

    async fn next_message(rx: &mut mpsc::Receiver<DashboardMessage>) -> DashboardMessage {
        timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("listener stalled")
            .expect("listener dropped its sender")
    }

    #[tokio::test]
    async fn pr_update_requests_reload_and_pings_are_answered() {
        let server_socket = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = server_socket.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (stream, _) = server_socket.accept().await.unwrap();
            let mut ws = handshake(stream).await;
            ws.send(Message::Text(
                r#"42["connected",{"message":"Connected to server"}]"#.into(),
            ))
            .await
            .unwrap();
            ws.send(Message::Text("2".into())).await.unwrap();
            let pong = ws.next().await.unwrap().unwrap();
            assert_eq!(pong.to_text().unwrap(), "3");
            ws.send(Message::Text(r#"42["pr_update",{"action":"opened"}]"#.into()))
                .await
                .unwrap();
            while let Some(Ok(message)) = ws.next().await {
                if message.is_close() {
                    break;
                }
            }
        });

        let (tx, mut rx) = mpsc::channel(32);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let listener = PushListener::new(environment(addr), MessageSender::new(tx));
        let handle = tokio::spawn(listener.run(shutdown_rx));

        let mut greeted = false;
        loop {
            match next_message(&mut rx).await {
                DashboardMessage::Activity(event) if event.msg == "Connected to server" => {
                    greeted = true;
                }
                DashboardMessage::ReloadRequested(trigger) => {
                    assert_eq!(trigger, ReloadTrigger::Push);
                    break;
                }
                _ => {}
            }
        }
        assert!(greeted);

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn reconnect_after_drop_requests_reload() {
        let server_socket = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = server_socket.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (first, _) = server_socket.accept().await.unwrap();
            let mut ws = handshake(first).await;
            ws.close(None).await.unwrap();

            let (second, _) = server_socket.accept().await.unwrap();
            let mut ws = handshake(second).await;
            while let Some(Ok(message)) = ws.next().await {
                if message.is_close() {
                    break;
                }
            }
        });

        let (tx, mut rx) = mpsc::channel(64);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let listener = PushListener::with_backoff(
            environment(addr),
            MessageSender::new(tx),
            BackoffConfig::new(Duration::from_millis(50), Duration::from_millis(200)),
        );
        let handle = tokio::spawn(listener.run(shutdown_rx));

        let mut saw_disconnect = false;
        loop {
            match next_message(&mut rx).await {
                DashboardMessage::ChannelStatus(ChannelStatus::Disconnected { .. }) => {
                    saw_disconnect = true;
                }
                DashboardMessage::ReloadRequested(trigger) => {
                    assert_eq!(trigger, ReloadTrigger::Reconnect);
                    break;
                }
                _ => {}
            }
        }
        assert!(saw_disconnect);

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn invalid_url_stops_without_retrying() {
        let (tx, mut rx) = mpsc::channel(16);
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let listener = PushListener::new(
            Environment::Custom {
                server_url: "not a url".to_string(),
            },
            MessageSender::new(tx),
        );
        timeout(Duration::from_secs(2), listener.run(shutdown_rx))
            .await
            .expect("listener should give up");

        let mut last_status = None;
        while let Ok(message) = rx.try_recv() {
            if let DashboardMessage::ChannelStatus(status) = message {
                last_status = Some(status);
            }
        }
        assert_eq!(last_status, Some(ChannelStatus::Stopped));
    }
}
