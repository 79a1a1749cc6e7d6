//! Headless mode execution

use super::{
    Handled, SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::controller::LoadOutcome;
use crate::markup::render_page;
use crate::print_cmd_info;
use std::error::Error;
use std::path::PathBuf;

/// Runs without a terminal UI
///
/// Prints the activity log to stdout and, with `html_out`, rewrites the
/// document after every applied or failed load. Ctrl+C stops.
pub async fn run_headless_mode(
    mut session: SessionData,
    html_out: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.environment);
    if let Some(path) = &html_out {
        print_cmd_info!("HTML output", "{}", path.display());
    }

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();
    loop {
        tokio::select! {
            Some(message) = session.message_receiver.recv() => {
                let handled = session.driver.handle(message);
                if let Some(event) = handled.describe() {
                    if event.should_display() {
                        println!("{}", event);
                    }
                }
                if let (Some(path), true) = (&html_out, settles_view(&handled)) {
                    std::fs::write(path, render_page(session.driver.controller(), false))?;
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}

/// A load that reached the page, either as records or as the error panel.
fn settles_view(handled: &Handled) -> bool {
    matches!(
        handled,
        Handled::LoadCompleted {
            outcome: LoadOutcome::Applied { .. } | LoadOutcome::Failed { .. },
            ..
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RequestSequence;
    use crate::workers::ReloadTrigger;

    #[test]
    fn only_applied_or_failed_loads_settle_the_view() {
        let ticket = RequestSequence::new().issue();
        let completed = |outcome| Handled::LoadCompleted { ticket, outcome };

        assert!(settles_view(&completed(LoadOutcome::Applied { count: 3 })));
        assert!(settles_view(&completed(LoadOutcome::Failed {
            message: "Failed to load pull requests".to_string()
        })));
        assert!(!settles_view(&completed(LoadOutcome::Stale)));
        assert!(!settles_view(&Handled::LoadStarted {
            ticket,
            trigger: ReloadTrigger::Push
        }));
    }
}
