//! The fixed voice script: greeting, reply framing, and recovery prompts.

use std::time::Duration;

use super::{
    DialogueError, DialogueResponse, DialogueState, Directive, Endpoint, Gather, SilenceFallback,
    SpokenSegment,
};

/// Pause that splits "Triage" from "Flow" so the name is not run together.
const NAME_SPLIT_PAUSE: Duration = Duration::from_millis(300);
const ECHO_PAUSE: Duration = Duration::from_secs(1);
const BLOCK_PAUSE: Duration = Duration::from_millis(500);
const REPROMPT_LEAD_IN: Duration = Duration::from_secs(1);

const GREETING_PROMPT: &str = "Please speak now.";
const GREETING_SILENCE: &str = "I didn't hear anything. Please try again.";
const FOLLOW_UP_PROMPT: &str = "Do you have another question? If yes, please speak now.";
const FAREWELL: &str = "Thank you for using Triageflow Medical Information. Goodbye!";

/// Welcome announcement followed by a listen directive.
///
/// If the caller says nothing the provider speaks a notice and replays this
/// greeting.
pub fn greeting() -> DialogueResponse {
    DialogueResponse {
        segments: vec![
            SpokenSegment::new("Welcome to"),
            SpokenSegment::new("Triage").with_pause(NAME_SPLIT_PAUSE),
            SpokenSegment::new("Flow Medical Information. Please describe your symptoms."),
        ],
        directive: Directive::Listen {
            gather: Gather {
                action: Endpoint::Interpret,
                prompt: SpokenSegment::new(GREETING_PROMPT),
                pause_before: None,
            },
            on_silence: SilenceFallback::Replay {
                notice: SpokenSegment::new(GREETING_SILENCE),
                target: Endpoint::Greeting,
            },
        },
        state: DialogueState::AwaitingSpeech,
    }
}

/// Echo of the caller's words, the composed blocks, and a follow-up prompt.
///
/// Blank blocks are skipped. If the caller stays silent after the follow-up
/// prompt the farewell is spoken and the call ends.
pub fn reply(utterance: &str, blocks: &[String]) -> DialogueResponse {
    let mut segments = Vec::with_capacity(blocks.len() + 1);
    segments.push(SpokenSegment::new(format!("You said: {}", utterance)).with_pause(ECHO_PAUSE));
    segments.extend(
        blocks
            .iter()
            .map(|block| block.trim())
            .filter(|block| !block.is_empty())
            .map(|block| SpokenSegment::new(block).with_pause(BLOCK_PAUSE)),
    );

    DialogueResponse {
        segments,
        directive: Directive::Listen {
            gather: Gather {
                action: Endpoint::Interpret,
                prompt: SpokenSegment::new(FOLLOW_UP_PROMPT),
                pause_before: Some(REPROMPT_LEAD_IN),
            },
            on_silence: SilenceFallback::Farewell(SpokenSegment::new(FAREWELL)),
        },
        state: DialogueState::AwaitingSpeech,
    }
}

/// Apology for a failed turn, then back to the greeting.
pub fn recovery(error: &DialogueError) -> DialogueResponse {
    DialogueResponse {
        segments: vec![SpokenSegment::new(error.apology())],
        directive: Directive::Redirect(Endpoint::Greeting),
        state: DialogueState::Greeting,
    }
}
