//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::session::{SessionPreset, TimerSnapshot, MAX_SESSION_MINUTES};

/// API response structure for timer command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response for an accepted command
    pub fn ok(message: String, timer: TimerSnapshot) -> Self {
        Self::new("ok".to_string(), message, timer)
    }

    /// Create a response for a rejected command
    pub fn error(message: String, timer: TimerSnapshot) -> Self {
        Self::new("error".to_string(), message, timer)
    }
}

/// Request body for the configure endpoint; minutes arrive as raw text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigureRequest {
    pub minutes: String,
}

/// Enhanced status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    /// Remaining time formatted as MM:SS
    pub display: String,
    /// Human-readable phase label
    pub phase_label: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Suggested session lengths and the accepted input range
#[derive(Debug, Clone, Serialize)]
pub struct PresetsResponse {
    pub presets: Vec<SessionPreset>,
    pub max_minutes: u32,
}

impl PresetsResponse {
    pub fn suggested() -> Self {
        Self {
            presets: crate::state::session::SUGGESTED_PRESETS.to_vec(),
            max_minutes: MAX_SESSION_MINUTES,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
