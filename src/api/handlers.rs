//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{Stream, StreamExt};
use tracing::{error, info, warn};

use crate::{
    error::CountdownError,
    state::{AppState, TimerSnapshot},
};
use super::responses::{ApiResponse, HealthResponse};

fn internal_error(context: &str, e: CountdownError) -> StatusCode {
    error!("{}: {}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let status = state
        .engine
        .start()
        .map_err(|e| internal_error("Failed to start countdown", e))?;

    info!("Start endpoint called - {}", status.as_str());
    Ok(Json(ApiResponse::started(status)))
}

/// Handle POST /stop - Stop the countdown
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    state
        .engine
        .stop()
        .map_err(|e| internal_error("Failed to stop countdown", e))?;

    Ok(Json(ApiResponse::stopped()))
}

/// Handle POST /reset - Reset the countdown to its configured duration
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    state
        .engine
        .reset()
        .map_err(|e| internal_error("Failed to reset countdown", e))?;

    Ok(Json(ApiResponse::reset()))
}

/// Handle POST /set_time/:seconds - Configure the countdown duration
pub async fn set_time_handler(
    State(state): State<Arc<AppState>>,
    Path(seconds): Path<u64>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.engine.configure(seconds) {
        Ok(seconds) => Ok(Json(ApiResponse::time_set(seconds))),
        Err(CountdownError::Running) => {
            warn!("Set time rejected: countdown is running");
            Ok(Json(ApiResponse::error(CountdownError::Running.to_string())))
        }
        Err(e) => Err(internal_error("Failed to set countdown time", e)),
    }
}

/// Handle GET /status - Return a snapshot of the countdown
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerSnapshot>, StatusCode> {
    state
        .engine
        .snapshot()
        .map(Json)
        .map_err(|e| internal_error("Failed to read countdown state", e))
}

/// Handle GET /stream - Server-sent live updates until the client leaves
pub async fn stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = state.engine.subscribe().filter_map(|update| async move {
        match Event::default().json_data(update) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                warn!("Failed to encode live update: {}", e);
                None
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}
