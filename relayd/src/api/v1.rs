//! API endpoints.

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::hw_trait::ControlTransfer;
use crate::relay::RelayController;
use crate::tracing::prelude::*;

/// Shared application state for API endpoints.
pub struct AppState<T> {
    /// The single relay controller. The mutex serializes transfers because
    /// the board's control channel is not safe for concurrent use.
    pub controller: Arc<Mutex<RelayController<T>>>,
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
        }
    }
}

impl<T: ControlTransfer + Send + 'static> AppState<T> {
    pub fn new(controller: RelayController<T>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
        }
    }
}

/// Relay control request payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlRelayRequest {
    /// Desired state; `true` switches the relay on. Optional so that a
    /// missing field maps to a descriptive 400 instead of a generic
    /// deserialization rejection.
    pub actif: Option<bool>,
}

/// Relay control response payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlRelayResponse {
    /// Human-readable confirmation naming the relay and its new state.
    pub message: String,
}

/// API error response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// What went wrong, for the caller.
    pub message: String,
    /// Underlying error description, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint handler.
///
/// Returns a simple OK status to verify the API is running.
async fn health() -> &'static str {
    "OK"
}

/*  Relay control endpoint handler.

    Switches one channel of the relay board on or off. The transfer is
    blocking and runs on the blocking pool; concurrent requests queue on
    the controller mutex.

    # Example

    curl -X POST http://localhost:2500/control-relay/3 \
       -H "Content-Type: application/json" \
       -d '{"actif": true}'
*/
async fn control_relay<T>(
    State(state): State<AppState<T>>,
    Path(relay_id): Path<u8>,
    Json(req): Json<ControlRelayRequest>,
) -> Response
where
    T: ControlTransfer + Send + 'static,
{
    let Some(actif) = req.actif else {
        let error = ErrorResponse {
            message: "The 'actif' state must be specified.".to_string(),
            error: None,
        };
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    };

    debug!(relay_id, actif, "API request to switch relay");

    let controller = state.controller.clone();
    let result =
        tokio::task::spawn_blocking(move || controller.lock().set_relay(relay_id, actif)).await;

    match result {
        Ok(Ok(())) => {
            let response = ControlRelayResponse {
                message: format!(
                    "Relay {} switched {} successfully.",
                    relay_id,
                    if actif { "on" } else { "off" }
                ),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(Err(e)) => {
            error!(relay_id, error = %e, "Failed to control relay");
            let error = ErrorResponse {
                message: "Error while controlling the relay.".to_string(),
                error: Some(e.to_string()),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
        Err(e) => {
            error!(relay_id, error = %e, "Relay control task failed");
            let error = ErrorResponse {
                message: "Error while controlling the relay.".to_string(),
                error: Some(e.to_string()),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}

/// Build the API routes.
pub fn routes<T>(state: AppState<T>) -> Router
where
    T: ControlTransfer + Send + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/control-relay/:relay_id", post(control_relay::<T>))
        .with_state(state)
}
