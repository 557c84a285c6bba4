//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{error::CommandError, state::AppState};
use super::responses::{
    ApiResponse, ConfigureRequest, HealthResponse, PresetsResponse, StatusResponse,
};

/// Map a rejected command onto the error response envelope
fn rejected(state: &AppState, err: CommandError) -> (StatusCode, Json<ApiResponse>) {
    warn!("Command rejected: {}", err);
    let status = match err {
        CommandError::InvalidInput { .. } | CommandError::ExceedsMaximum { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CommandError::NoConfig | CommandError::InvalidTransition { .. } => StatusCode::CONFLICT,
    };
    (
        status,
        Json(ApiResponse::error(err.to_string(), state.get_timer_snapshot())),
    )
}

/// Handle POST /configure - Set the pending session length
pub async fn configure_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigureRequest>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    match state.configure(&request.minutes) {
        Ok(timer) => {
            info!("Configure endpoint called - session length accepted");
            Ok(Json(ApiResponse::ok(
                format!(
                    "Session length set to {} minutes",
                    timer.configured_minutes.unwrap_or_default()
                ),
                timer,
            )))
        }
        Err(e) => Err(rejected(&state, e)),
    }
}

/// Handle POST /start - Begin the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    match state.start() {
        Ok(timer) => {
            info!("Start endpoint called - countdown running");
            Ok(Json(ApiResponse::ok(
                format!("Session started, {} remaining", timer.display()),
                timer,
            )))
        }
        Err(e) => Err(rejected(&state, e)),
    }
}

/// Handle POST /pause - Toggle between running and paused
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    match state.toggle_pause() {
        Ok(timer) => {
            info!("Pause endpoint called - session now {}", timer.phase.label());
            Ok(Json(ApiResponse::ok(
                format!("Session {}", timer.phase.label()),
                timer,
            )))
        }
        Err(e) => Err(rejected(&state, e)),
    }
}

/// Handle POST /stop - Reset the session
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.stop();
    info!("Stop endpoint called - session reset");
    Json(ApiResponse::ok("Session stopped".to_string(), timer))
}

/// Handle GET /status - Return current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timer = state.get_timer_snapshot();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        display: timer.display(),
        phase_label: timer.phase.label().to_string(),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /presets - Suggested session lengths
pub async fn presets_handler() -> Json<PresetsResponse> {
    Json(PresetsResponse::suggested())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
