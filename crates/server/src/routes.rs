//! Router and handlers for the relay HTTP surface

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use tower_http::trace::TraceLayer;

use esocial_core::RelayRequest;
use esocial_relay::RelayService;

/// Shared handler state: one stateless relay service for all calls.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/relay", post(relay))
        .route("/healthcheck", get(healthcheck))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `POST /relay`
///
/// Status mapping: 200 when the remote call succeeded, 400 when
/// validation rejected the request before any network activity, 500 for
/// transport and remote failures. The body is the relay result either way.
async fn relay(
    State(state): State<AppState>,
    Json(request): Json<RelayRequest>,
) -> impl IntoResponse {
    let result = state.relay.relay(request).await;

    let status = if result.success {
        StatusCode::OK
    } else if result.client_error {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(result))
}

/// `GET /healthcheck` — liveness only, checks nothing downstream.
async fn healthcheck() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
