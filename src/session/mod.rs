pub mod driver;
pub mod headless_mode;
pub mod messages;
pub mod setup;
pub mod snapshot;
pub mod tui_mode;

pub use driver::{Driver, Handled};
pub use headless_mode::run_headless_mode;
pub use setup::{SessionData, setup_session};
pub use snapshot::{SnapshotOptions, run_snapshot};
pub use tui_mode::run_tui_mode;
