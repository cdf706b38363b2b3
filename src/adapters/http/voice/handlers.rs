//! HTTP handlers for the voice webhook endpoints.
//!
//! Webhook handlers always answer `200 text/xml`: a body the provider cannot
//! read would drop the call, so malformed requests are turned into turns the
//! controller already knows how to recover from.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::{IntoResponse, Json, Response};
use http::header;

use crate::adapters::twiml::TwimlRenderer;
use crate::application::DialogueController;
use crate::domain::dialogue::{CallTurn, DialogueResponse};
use crate::domain::foundation::Timestamp;

use super::dto::{HealthResponse, VoiceWebhookForm};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for voice handlers.
#[derive(Clone)]
pub struct VoiceAppState {
    pub controller: Arc<DialogueController>,
    pub renderer: Arc<TwimlRenderer>,
}

impl VoiceAppState {
    pub fn new(controller: DialogueController, renderer: TwimlRenderer) -> Self {
        Self {
            controller: Arc::new(controller),
            renderer: Arc::new(renderer),
        }
    }

    fn twiml(&self, response: &DialogueResponse) -> Response {
        let body = self.renderer.render(response);
        tracing::debug!(state = ?response.state, bytes = body.len(), "Sending TwiML");
        ([(header::CONTENT_TYPE, "text/xml")], body).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /voice - call start.
pub async fn voice(
    State(state): State<VoiceAppState>,
    form: Result<Form<VoiceWebhookForm>, FormRejection>,
) -> Response {
    let turn = match form {
        Ok(Form(form)) => form.into_call_start(),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable call-start form, greeting anyway");
            CallTurn::call_started(None)
        }
    };
    let response = state.controller.greet(&turn);
    state.twiml(&response)
}

/// POST /handle-input - speech result.
pub async fn handle_input(
    State(state): State<VoiceAppState>,
    form: Result<Form<VoiceWebhookForm>, FormRejection>,
) -> Response {
    let turn = match form {
        Ok(Form(form)) => form.into_speech_turn(),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable speech form");
            CallTurn::new(None, None)
        }
    };
    let response = state.controller.interpret(&turn).await;
    state.twiml(&response)
}

/// GET /health - liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok(Timestamp::now().as_unix_secs_f64()))
}
