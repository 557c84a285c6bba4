//! Selfitch - A state-managed HTTP server for work-session countdown timing
//!
//! This library provides a clock-in ("fichar") countdown timer: configure a
//! session length in minutes, start the one-second countdown, pause, resume,
//! and stop, with completion and cancellation notifications for clients.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::CommandError;
pub use state::{AppState, SessionEvent, SessionPhase, TimerController, TimerSnapshot};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
