//! HTTP API server.
//!
//! Axum-based surface translating inbound requests into relay controller
//! calls and mapping controller errors back to HTTP status codes.

pub mod v1;

pub use v1::{routes, AppState};

use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::hw_trait::ControlTransfer;
use crate::tracing::prelude::*;

/// Task serving the HTTP API until cancellation.
pub async fn task<T>(config: ApiConfig, state: AppState<T>, running: CancellationToken)
where
    T: ControlTransfer + Send + 'static,
{
    trace!("Task started.");

    let listener = match tokio::net::TcpListener::bind(config.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {e}", config.listen);
            running.cancel();
            return;
        }
    };
    info!("API listening on {}", config.listen);

    let router = routes(state).layer(TraceLayer::new_for_http());

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(running.clone().cancelled_owned())
        .await
    {
        error!("API server error: {e}");
    }

    trace!("Task stopped.");
}
