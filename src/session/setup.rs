//! Session setup and initialization

use super::driver::Driver;
use crate::api::{ApiClient, PrSource};
use crate::channel::PushListener;
use crate::consts::cli_consts::MESSAGE_QUEUE_SIZE;
use crate::controller::{DashboardController, FilterCriteria};
use crate::environment::Environment;
use crate::workers::{DashboardMessage, MessageSender, RecordFetcher, ReloadTrigger};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Applies messages to the controller
    pub driver: Driver,
    /// Messages from the fetcher and the push listener
    pub message_receiver: mpsc::Receiver<DashboardMessage>,
    /// Join handles for background tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all background tasks
    pub shutdown_sender: broadcast::Sender<()>,
    /// Server the session talks to
    pub environment: Environment,
}

/// Sets up a live session
///
/// 1. Creates the HTTP client and the fetcher
/// 2. Starts the push listener
/// 3. Queues the initial load
pub async fn setup_session(
    env: Environment,
    criteria: FilterCriteria,
) -> Result<SessionData, Box<dyn Error>> {
    let client = ApiClient::new(env.clone())?;
    let source: Arc<dyn PrSource> = Arc::new(client);

    let (message_sender, message_receiver) = mpsc::channel(MESSAGE_QUEUE_SIZE);
    let sender = MessageSender::new(message_sender);
    let (shutdown_sender, _) = broadcast::channel(1);

    let fetcher = RecordFetcher::new(source, sender.clone());
    let driver = Driver::new(DashboardController::new(criteria), fetcher);

    let listener = PushListener::new(env.clone(), sender.clone());
    let join_handles = vec![tokio::spawn(listener.run(shutdown_sender.subscribe()))];

    sender.request_reload(ReloadTrigger::Startup).await;

    Ok(SessionData {
        driver,
        message_receiver,
        join_handles,
        shutdown_sender,
        environment: env,
    })
}
