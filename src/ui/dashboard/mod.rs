//! Terminal dashboard
//!
//! State, update logic and rendering live in separate modules

pub mod components;
pub mod renderer;
pub mod state;
pub mod updaters;
pub mod utils;

pub use renderer::render_dashboard;
pub use state::DashboardState;
pub use updaters::KeyOutcome;
