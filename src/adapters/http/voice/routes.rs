//! Axum router configuration for the voice webhook endpoints.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{handle_input, health, voice, VoiceAppState};

/// Create the voice routes.
///
/// # Routes
/// - `POST /voice` - greeting TwiML
/// - `POST /handle-input` - reply TwiML for the caller's speech
/// - `GET /health` - liveness JSON
pub fn voice_routes() -> Router<VoiceAppState> {
    Router::new()
        .route("/voice", post(voice))
        .route("/handle-input", post(handle_input))
        .route("/health", get(health))
}

/// Create the complete service router with its middleware stack.
///
/// Each request gets an `x-request-id` (generated if absent) that is echoed on
/// the response, a trace span, and an overall timeout.
pub fn voice_router(state: VoiceAppState, request_timeout: Duration) -> Router {
    voice_routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}
