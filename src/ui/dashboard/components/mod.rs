//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod cards;
pub mod filters;
pub mod footer;
pub mod header;
pub mod logs;
