//! TwiML renderer - turns a `DialogueResponse` into the XML document the
//! telephony provider executes.
//!
//! Pauses of a whole number of seconds become `<Pause>` verbs. Shorter pauses
//! become an SSML `<break>` at the end of the segment's `<Say>`, since
//! `<Pause>` only accepts integer lengths.

use std::time::Duration;

use crate::domain::dialogue::{
    DialogueResponse, Directive, Gather, SilenceFallback, SpokenSegment, VoiceProfile,
};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Renders dialogue responses as TwiML.
#[derive(Debug, Clone)]
pub struct TwimlRenderer {
    voice: VoiceProfile,
    language: String,
    speech_timeout: String,
}

impl TwimlRenderer {
    pub fn new(
        voice: VoiceProfile,
        language: impl Into<String>,
        speech_timeout: impl Into<String>,
    ) -> Self {
        Self {
            voice,
            language: language.into(),
            speech_timeout: speech_timeout.into(),
        }
    }

    pub fn voice(&self) -> &VoiceProfile {
        &self.voice
    }

    /// Renders a full `<Response>` document.
    pub fn render(&self, response: &DialogueResponse) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str("<Response>");

        for segment in &response.segments {
            self.push_segment(&mut xml, segment);
        }

        match &response.directive {
            Directive::Listen { gather, on_silence } => {
                self.push_gather(&mut xml, gather);
                match on_silence {
                    SilenceFallback::Replay { notice, target } => {
                        self.push_segment(&mut xml, notice);
                        push_redirect(&mut xml, target.path());
                    }
                    SilenceFallback::Farewell(farewell) => self.push_segment(&mut xml, farewell),
                }
            }
            Directive::Redirect(target) => push_redirect(&mut xml, target.path()),
        }

        xml.push_str("</Response>");
        xml
    }

    fn push_gather(&self, xml: &mut String, gather: &Gather) {
        if let Some(pause) = gather.pause_before {
            push_pause(xml, pause);
        }
        xml.push_str(&format!(
            r#"<Gather input="speech" action="{}" method="POST" language="{}" speechTimeout="{}">"#,
            gather.action.path(),
            escape_xml(&self.language),
            escape_xml(&self.speech_timeout),
        ));
        self.push_segment(xml, &gather.prompt);
        xml.push_str("</Gather>");
    }

    fn push_segment(&self, xml: &mut String, segment: &SpokenSegment) {
        let voice = segment.voice.as_ref().unwrap_or(&self.voice);
        let (trailing_break, trailing_pause) = split_pause(segment.pause_after);

        let mut body = escape_xml(&segment.text);
        if let Some(ms) = trailing_break {
            body.push_str(&format!(r#"<break time="{}ms"/>"#, ms));
        }
        if let Some(prosody) = &voice.prosody {
            body = format!(
                r#"<prosody rate="{}" pitch="{}" volume="{}">{}</prosody>"#,
                escape_xml(&prosody.rate),
                escape_xml(&prosody.pitch),
                escape_xml(&prosody.volume),
                body
            );
        }

        xml.push_str(&format!(
            r#"<Say voice="{}">{}</Say>"#,
            escape_xml(&voice.voice),
            body
        ));
        if let Some(pause) = trailing_pause {
            push_pause(xml, pause);
        }
    }
}

/// Splits a pause into a sub-second SSML break or a whole-second `<Pause>`.
fn split_pause(pause: Option<Duration>) -> (Option<u128>, Option<Duration>) {
    match pause {
        None => (None, None),
        Some(p) if p.is_zero() => (None, None),
        Some(p) if p.subsec_nanos() == 0 => (None, Some(p)),
        Some(p) => (Some(p.as_millis()), None),
    }
}

fn push_pause(xml: &mut String, pause: Duration) {
    let secs = pause.as_secs().max(1);
    xml.push_str(&format!(r#"<Pause length="{}"/>"#, secs));
}

fn push_redirect(xml: &mut String, path: &str) {
    xml.push_str(&format!(r#"<Redirect method="POST">{}</Redirect>"#, path));
}

/// Escapes text for use in XML content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::{script, DialogueError};

    fn renderer() -> TwimlRenderer {
        TwimlRenderer::new(
            VoiceProfile::new("Polly.Amy-Neural").with_prosody("90%", "+2Hz", "loud"),
            "en-US",
            "auto",
        )
    }

    fn plain_renderer() -> TwimlRenderer {
        TwimlRenderer::new(VoiceProfile::new("Polly.Amy-Neural"), "en-US", "auto")
    }

    #[test]
    fn escape_xml_handles_markup_characters() {
        assert_eq!(
            escape_xml(r#"Tom & "Jerry" <3 it's"#),
            "Tom &amp; &quot;Jerry&quot; &lt;3 it&apos;s"
        );
        assert_eq!(escape_xml("plain"), "plain");
    }

    mod greeting {
        use super::*;

        #[test]
        fn starts_with_declaration_and_response() {
            let xml = renderer().render(&script::greeting());
            assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#));
            assert!(xml.ends_with("</Response>"));
        }

        #[test]
        fn splits_name_with_sub_second_break() {
            let xml = plain_renderer().render(&script::greeting());
            assert!(xml.contains(r#"<Say voice="Polly.Amy-Neural">Welcome to</Say>"#));
            assert!(xml.contains(r#"<Say voice="Polly.Amy-Neural">Triage<break time="300ms"/></Say>"#));
        }

        #[test]
        fn gathers_speech_then_replays() {
            let xml = plain_renderer().render(&script::greeting());
            let gather = xml
                .find(r#"<Gather input="speech" action="/handle-input" method="POST" language="en-US" speechTimeout="auto">"#)
                .unwrap();
            let notice = xml.find("I didn&apos;t hear anything. Please try again.").unwrap();
            let redirect = xml
                .find(r#"<Redirect method="POST">/voice</Redirect>"#)
                .unwrap();
            assert!(gather < notice && notice < redirect);
            assert!(xml.contains("Please speak now.</Say></Gather>"));
        }

        #[test]
        fn applies_prosody() {
            let xml = renderer().render(&script::greeting());
            assert!(xml.contains(
                r#"<Say voice="Polly.Amy-Neural"><prosody rate="90%" pitch="+2Hz" volume="loud">Welcome to</prosody></Say>"#
            ));
        }
    }

    mod reply {
        use super::*;

        #[test]
        fn escapes_caller_words_and_uses_whole_second_pauses() {
            let response = script::reply("fever & <chills>", &["Block one.".to_string()]);
            let xml = plain_renderer().render(&response);

            assert!(xml.contains("You said: fever &amp; &lt;chills&gt;</Say><Pause length=\"1\"/>"));
            assert!(xml.contains(r#"Block one.<break time="500ms"/></Say>"#));
            assert!(!xml.contains("<chills>"));
        }

        #[test]
        fn pauses_before_follow_up_then_says_farewell() {
            let xml = plain_renderer().render(&script::reply("cough", &[]));
            assert!(xml.contains(r#"<Pause length="1"/><Gather input="speech" action="/handle-input""#));
            assert!(xml.ends_with(
                r#"<Say voice="Polly.Amy-Neural">Thank you for using Triageflow Medical Information. Goodbye!</Say></Response>"#
            ));
            assert!(!xml.contains("<Redirect"));
        }
    }

    #[test]
    fn recovery_redirects_to_greeting() {
        let xml = plain_renderer().render(&script::recovery(&DialogueError::MalformedSpeechEvent));
        assert!(xml.contains("I&apos;m sorry, I didn&apos;t catch that."));
        assert!(xml.ends_with(r#"<Redirect method="POST">/voice</Redirect></Response>"#));
        assert!(!xml.contains("<Gather"));
    }

    #[test]
    fn segment_voice_overrides_default() {
        let response = DialogueResponse {
            segments: vec![SpokenSegment::new("Hi").with_voice(VoiceProfile::new("Polly.Joanna"))],
            directive: Directive::Redirect(crate::domain::dialogue::Endpoint::Greeting),
            state: crate::domain::dialogue::DialogueState::Greeting,
        };
        let xml = renderer().render(&response);
        assert!(xml.contains(r#"<Say voice="Polly.Joanna">Hi</Say>"#));
    }

    #[test]
    fn split_pause_classifies_durations() {
        assert_eq!(split_pause(None), (None, None));
        assert_eq!(split_pause(Some(Duration::ZERO)), (None, None));
        assert_eq!(split_pause(Some(Duration::from_millis(300))), (Some(300), None));
        assert_eq!(
            split_pause(Some(Duration::from_secs(2))),
            (None, Some(Duration::from_secs(2)))
        );
        assert_eq!(split_pause(Some(Duration::from_millis(1500))), (Some(1500), None));
    }
}
