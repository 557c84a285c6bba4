//! Session phases, observable snapshot, and clock formatting

use serde::{Deserialize, Serialize};

/// Longest session that can be configured, in minutes (8 hours)
pub const MAX_SESSION_MINUTES: u32 = 480;

/// Where a session currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No countdown in progress; a pending configuration may exist
    Idle,
    /// Countdown actively decrementing once per second
    Running,
    /// Countdown frozen; remaining time preserved
    Paused,
    /// Countdown reached zero; waiting for a stop to acknowledge
    Finished,
}

impl SessionPhase {
    /// Human-readable label used in status output
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Running => "working",
            SessionPhase::Paused => "paused",
            SessionPhase::Finished => "finished",
        }
    }
}

/// Observable timer state published after every command and every tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: SessionPhase,
    pub remaining_seconds: u64,
    pub configured_minutes: Option<u32>,
    pub has_started: bool,
}

impl TimerSnapshot {
    /// Snapshot for a controller that has never started a session
    pub fn idle() -> Self {
        Self {
            phase: SessionPhase::Idle,
            remaining_seconds: 0,
            configured_minutes: None,
            has_started: false,
        }
    }

    /// Check if the countdown is actively decrementing
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Check if the session ran to completion and has not been acknowledged
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    /// Remaining time formatted as a clock string
    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}

/// Format seconds as `MM:SS`. Each component is zero-padded to at least two
/// digits; the minutes component grows past two digits rather than truncate
/// (480 minutes renders as "480:00").
pub fn format_clock(seconds: u64) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// A suggested session length shown to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionPreset {
    pub minutes: u32,
    pub label: &'static str,
}

/// Suggested session lengths offered alongside free-form input
pub const SUGGESTED_PRESETS: [SessionPreset; 3] = [
    SessionPreset { minutes: 25, label: "Pomodoro" },
    SessionPreset { minutes: 60, label: "One hour" },
    SessionPreset { minutes: 90, label: "Long session" },
];
