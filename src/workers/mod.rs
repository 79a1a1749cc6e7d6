//! Background workers: record fetches and their message plumbing

pub mod core;
pub mod fetcher;

pub use core::{DashboardMessage, MessageSender, ReloadTrigger};
pub use fetcher::RecordFetcher;
