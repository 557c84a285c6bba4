//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::CommandError;
use super::controller::TimerController;
use super::session::{SessionPhase, TimerSnapshot};

/// Shared application state: the timer controller plus server metadata
#[derive(Debug)]
pub struct AppState {
    /// The single countdown session controller
    pub controller: TimerController,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a new AppState with an idle controller
    pub fn new(port: u16, host: String) -> Self {
        Self {
            controller: TimerController::new(),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Convenience constructor for sharing across tasks and handlers
    pub fn shared(port: u16, host: String) -> Arc<Self> {
        Arc::new(Self::new(port, host))
    }

    /// Set the pending session length from raw client text
    pub fn configure(&self, raw: &str) -> Result<TimerSnapshot, CommandError> {
        let minutes = self.controller.configure(raw)?;
        info!("Session length set to {} minutes", minutes);
        self.record_action("configure");
        Ok(self.controller.snapshot())
    }

    /// Start the countdown for the pending configuration
    pub fn start(&self) -> Result<TimerSnapshot, CommandError> {
        let snapshot = self.controller.start()?;
        self.record_action("start");
        Ok(snapshot)
    }

    /// Flip between running and paused
    pub fn toggle_pause(&self) -> Result<TimerSnapshot, CommandError> {
        let phase = self.controller.toggle_pause()?;
        self.record_action(match phase {
            SessionPhase::Paused => "pause",
            _ => "resume",
        });
        Ok(self.controller.snapshot())
    }

    /// Stop the session, returning the reset state
    pub fn stop(&self) -> TimerSnapshot {
        let snapshot = self.controller.stop();
        self.record_action("stop");
        snapshot
    }

    /// Current observable timer state
    pub fn get_timer_snapshot(&self) -> TimerSnapshot {
        self.controller.snapshot()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_tracked_as_last_action() {
        let state = AppState::new(20553, "127.0.0.1".to_string());
        assert_eq!(state.get_last_action().0, None);

        state.configure("25").unwrap();
        assert_eq!(state.get_last_action().0.as_deref(), Some("configure"));

        state.start().unwrap();
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));

        state.toggle_pause().unwrap();
        assert_eq!(state.get_last_action().0.as_deref(), Some("pause"));

        state.toggle_pause().unwrap();
        assert_eq!(state.get_last_action().0.as_deref(), Some("resume"));

        state.stop();
        assert_eq!(state.get_last_action().0.as_deref(), Some("stop"));
    }

    #[test]
    fn rejected_commands_do_not_update_last_action() {
        let state = AppState::new(20553, "127.0.0.1".to_string());
        assert!(state.configure("oops").is_err());
        assert_eq!(state.get_last_action().0, None);
    }

    #[test]
    fn uptime_formats_without_hours_when_fresh() {
        let state = AppState::new(20553, "127.0.0.1".to_string());
        assert!(state.get_uptime().ends_with('s'));
    }
}
