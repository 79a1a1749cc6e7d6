//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::ui::dashboard::{DashboardState, KeyOutcome, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::DashboardMessage;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// UI configuration data
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub splash_duration: Duration,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
            splash_duration: Duration::from_secs(2),
        }
    }
}

/// The different screens in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The pull request dashboard.
    Dashboard,
}

/// Application state
pub struct App {
    /// When the splash screen was first shown.
    started_at: Instant,

    splash_duration: Duration,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Dashboard state; it keeps processing messages behind the splash screen.
    state: DashboardState,

    /// Receives messages from the fetcher and the push listener.
    message_receiver: mpsc::Receiver<DashboardMessage>,

    /// Broadcasts shutdown signal to background tasks.
    shutdown_sender: broadcast::Sender<()>,
}

impl App {
    pub fn new(
        state: DashboardState,
        message_receiver: mpsc::Receiver<DashboardMessage>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            started_at: Instant::now(),
            splash_duration: ui_config.splash_duration,
            current_screen: Screen::Splash,
            state,
            message_receiver,
            shutdown_sender,
        }
    }

    fn quit(&self) {
        let _ = self.shutdown_sender.send(());
    }
}

/// Runs the application UI in a loop, handling messages and keys and rendering the current screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        while let Ok(message) = app.message_receiver.try_recv() {
            app.state.add_message(message);
        }
        app.state.update();
        terminal.draw(|f| render(f, &app))?;

        if app.current_screen == Screen::Splash && app.started_at.elapsed() >= app.splash_duration
        {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == event::KeyEventKind::Release {
            continue;
        }

        match app.current_screen {
            Screen::Splash => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    app.quit();
                    return Ok(());
                }
                // Any other key skips the splash screen
                app.current_screen = Screen::Dashboard;
            }
            Screen::Dashboard => {
                if app.state.handle_key(key) == KeyOutcome::Quit {
                    app.quit();
                    return Ok(());
                }
            }
        }
    }
}

fn render(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, &app.state),
    }
}
