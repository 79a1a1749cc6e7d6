pub mod backoff;
pub mod error_handler;

pub use backoff::{BackoffConfig, ReconnectTimer};
pub use error_handler::ErrorHandler;
