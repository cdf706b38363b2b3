//! DialogueController - drives one webhook turn through the dialogue state
//! machine and produces the response to speak.
//!
//! Every path returns a `DialogueResponse`. Extraction failures become spoken
//! messages, and a panic inside the extraction path is caught and turned into
//! an apology that sends the caller back to the greeting.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::Instrument;

use crate::domain::dialogue::{
    script, CallTurn, DialogueError, DialogueEvent, DialogueResponse, DialogueState,
};
use crate::domain::triage::ResponseComposer;
use crate::ports::SymptomExtractor;

/// Handles greeting and interpretation turns.
pub struct DialogueController {
    extractor: Arc<dyn SymptomExtractor>,
    composer: ResponseComposer,
}

impl DialogueController {
    pub fn new(extractor: Arc<dyn SymptomExtractor>, composer: ResponseComposer) -> Self {
        Self {
            extractor,
            composer,
        }
    }

    pub fn extractor(&self) -> &Arc<dyn SymptomExtractor> {
        &self.extractor
    }

    /// Answers a call start with the welcome announcement.
    pub fn greet(&self, turn: &CallTurn) -> DialogueResponse {
        let span = turn_span(turn, DialogueState::Greeting);
        let _entered = span.enter();

        tracing::info!("New call received");
        match DialogueState::Greeting.on(DialogueEvent::CallConnected) {
            Ok(_) => script::greeting(),
            Err(e) => self.recover(DialogueState::Greeting, DialogueError::from(e)),
        }
    }

    /// Interprets the caller's speech and builds the reply.
    pub async fn interpret(&self, turn: &CallTurn) -> DialogueResponse {
        let span = turn_span(turn, DialogueState::AwaitingSpeech);
        let response = self.interpret_turn(turn).instrument(span.clone()).await;
        span.in_scope(|| {
            tracing::info!(
                elapsed_ms = turn.received_at().elapsed_millis(),
                next_state = ?response.state,
                "Turn complete"
            )
        });
        response
    }

    async fn interpret_turn(&self, turn: &CallTurn) -> DialogueResponse {
        let from = DialogueState::AwaitingSpeech;
        let Some(utterance) = turn.transcript() else {
            tracing::warn!("No speech result in request");
            return self.recover(from, DialogueError::MalformedSpeechEvent);
        };

        tracing::info!(
            confidence = turn.confidence(),
            chars = utterance.len(),
            "Received speech"
        );
        tracing::debug!(transcript = utterance, "Caller transcript");

        let responding = match from.on(turn.speech_event()) {
            Ok(state) => state,
            Err(e) => return self.recover(from, DialogueError::from(e)),
        };

        match AssertUnwindSafe(self.respond(utterance)).catch_unwind().await {
            Ok(response) => response,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(panic = %message, "Turn processing panicked");
                self.recover(responding, DialogueError::internal(message))
            }
        }
    }

    /// Responding: extract, compose, and frame the reply.
    async fn respond(&self, utterance: &str) -> DialogueResponse {
        let extraction = self.extractor.extract(utterance).await;
        match &extraction {
            Err(e) if e.is_service_failure() => {
                tracing::warn!(code = e.code(), error = %e, "Symptom extraction failed")
            }
            Err(e) => tracing::info!(code = e.code(), "No symptoms in utterance"),
            Ok(_) => {}
        }

        let blocks = self.composer.compose(utterance, &extraction);
        let mut response = script::reply(utterance, &blocks);
        match DialogueState::Responding.on(DialogueEvent::ReplyComposed) {
            Ok(next) => response.state = next,
            Err(e) => return self.recover(DialogueState::Responding, DialogueError::from(e)),
        }
        tracing::info!(blocks = blocks.len(), "Reply composed");
        response
    }

    fn recover(&self, from: DialogueState, error: DialogueError) -> DialogueResponse {
        let mut response = script::recovery(&error);
        let event = match &error {
            DialogueError::MalformedSpeechEvent => DialogueEvent::NoSpeech,
            DialogueError::InternalFault(_) => DialogueEvent::Fault,
        };
        if let Ok(next) = from.on(event) {
            response.state = next;
        }
        tracing::warn!(error = %error, from = ?from, to = ?response.state, "Recovering turn");
        response
    }
}

fn turn_span(turn: &CallTurn, state: DialogueState) -> tracing::Span {
    tracing::info_span!(
        "dialogue_turn",
        turn_id = %turn.id(),
        call_sid = turn.call_sid().unwrap_or("-"),
        state = ?state,
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
