//! State management module
//!
//! This module contains the timer state machine and its surrounding
//! application state.

pub mod session;
pub mod controller;
pub mod app_state;

// Re-export main types
pub use session::{format_clock, SessionPhase, TimerSnapshot, MAX_SESSION_MINUTES};
pub use controller::{SessionEvent, TickOutcome, TimerController};
pub use app_state::AppState;
