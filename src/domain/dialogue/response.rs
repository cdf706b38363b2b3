//! Outbound dialogue artifacts: spoken segments and continuation directives.

use std::time::Duration;

use super::DialogueState;

/// Prosody settings applied to spoken text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prosody {
    pub rate: String,
    pub pitch: String,
    pub volume: String,
}

/// A voice identity plus optional prosody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceProfile {
    pub voice: String,
    pub prosody: Option<Prosody>,
}

impl VoiceProfile {
    /// Creates a profile with no prosody adjustments.
    pub fn new(voice: impl Into<String>) -> Self {
        Self {
            voice: voice.into(),
            prosody: None,
        }
    }

    /// Sets the prosody.
    pub fn with_prosody(
        mut self,
        rate: impl Into<String>,
        pitch: impl Into<String>,
        volume: impl Into<String>,
    ) -> Self {
        self.prosody = Some(Prosody {
            rate: rate.into(),
            pitch: pitch.into(),
            volume: volume.into(),
        });
        self
    }
}

/// One ordered unit of speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenSegment {
    pub text: String,
    /// Replaces the renderer's default voice for this segment only.
    pub voice: Option<VoiceProfile>,
    /// Silence after the segment.
    pub pause_after: Option<Duration>,
}

impl SpokenSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            pause_after: None,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause_after = Some(pause);
        self
    }

    pub fn with_voice(mut self, voice: VoiceProfile) -> Self {
        self.voice = Some(voice);
        self
    }
}

/// The webhook endpoints the provider can be sent back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Welcome announcement.
    Greeting,
    /// Speech interpretation.
    Interpret,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Greeting => "/voice",
            Endpoint::Interpret => "/handle-input",
        }
    }
}

/// Listen for speech and post the transcript to `action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gather {
    pub action: Endpoint,
    pub prompt: SpokenSegment,
    /// Silence before listening starts.
    pub pause_before: Option<Duration>,
}

/// What happens when a gather collects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SilenceFallback {
    /// Speak a notice, then send the provider back to `target`.
    Replay {
        notice: SpokenSegment,
        target: Endpoint,
    },
    /// Speak a farewell; with nothing left to do the provider ends the call.
    Farewell(SpokenSegment),
}

/// Instruction telling the provider what to do after the segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Listen again.
    Listen {
        gather: Gather,
        on_silence: SilenceFallback,
    },
    /// Fetch fresh instructions from another endpoint.
    Redirect(Endpoint),
}

/// The complete outbound artifact for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueResponse {
    pub segments: Vec<SpokenSegment>,
    pub directive: Directive,
    /// State the call is left in once the provider follows the directive.
    pub state: DialogueState,
}

impl DialogueResponse {
    /// Spoken text in delivery order, including gather prompts and fallbacks.
    pub fn spoken_lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = self.segments.iter().map(|s| s.text.as_str()).collect();
        if let Directive::Listen { gather, on_silence } = &self.directive {
            lines.push(&gather.prompt.text);
            match on_silence {
                SilenceFallback::Replay { notice, .. } => lines.push(&notice.text),
                SilenceFallback::Farewell(farewell) => lines.push(&farewell.text),
            }
        }
        lines
    }

    /// True if the provider will be sent back to the greeting.
    pub fn redirects_to_greeting(&self) -> bool {
        matches!(self.directive, Directive::Redirect(Endpoint::Greeting))
    }
}
