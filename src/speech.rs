//! Single-slot speech channel shared by every announcement.
//!
//! There is one speech resource per process. A new request always cancels
//! whatever is playing: last request wins, nothing queues.

use crate::ports::speech::{SpeechOutput, Utterance, Voice};

/// Speaking rate used for every utterance.
pub const SPEECH_RATE: f32 = 0.9;
/// Pitch used for every utterance.
pub const SPEECH_PITCH: f32 = 1.0;

/// Texts that carry no information and are never spoken.
const UNSPEAKABLE: [&str; 2] = ["N/A", "-"];

/// Front end to the process-wide [`SpeechOutput`].
pub struct SpeechChannel<'a> {
    output: &'a dyn SpeechOutput,
    voice: Option<String>,
}

impl<'a> SpeechChannel<'a> {
    /// Creates a channel speaking with `voice`, or the engine default.
    #[must_use]
    pub fn new(output: &'a dyn SpeechOutput, voice: Option<String>) -> Self {
        Self { output, voice }
    }

    /// Creates a channel using `preferred` if given, otherwise the first
    /// voice the engine offers.
    #[must_use]
    pub fn with_default_voice(output: &'a dyn SpeechOutput, preferred: Option<String>) -> Self {
        let voice = preferred.or_else(|| output.voices().into_iter().next().map(|v| v.name));
        Self::new(output, voice)
    }

    /// The selected voice.
    #[must_use]
    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    /// Voices the engine offers.
    #[must_use]
    pub fn voices(&self) -> Vec<Voice> {
        self.output.voices()
    }

    /// Cancels the current utterance and speaks `text` in its place.
    ///
    /// Blank text and bare placeholders (`N/A`, `-`) are ignored and leave
    /// the current utterance playing.
    pub fn say(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() || UNSPEAKABLE.contains(&text) {
            return;
        }
        let utterance = Utterance {
            text: text.to_string(),
            voice: self.voice.clone(),
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
        };
        self.output.cancel();
        self.output.speak(&utterance);
    }

    /// Whether the last utterance is still playing.
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.output.is_speaking()
    }

    /// Stops the current utterance immediately.
    pub fn silence(&self) {
        self.output.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{RecordingSpeech, SpeechEvent};

    #[test]
    fn cancels_before_every_utterance() {
        let output = RecordingSpeech::new();
        let channel = SpeechChannel::new(&output, Some("en-gb".into()));

        channel.say("Callsign is BAW123");

        assert_eq!(
            output.events(),
            vec![
                SpeechEvent::Cancelled,
                SpeechEvent::Spoke(Utterance {
                    text: "Callsign is BAW123".into(),
                    voice: Some("en-gb".into()),
                    rate: 0.9,
                    pitch: 1.0,
                }),
            ]
        );
    }

    #[test]
    fn ignores_placeholder_text() {
        let output = RecordingSpeech::new();
        let channel = SpeechChannel::new(&output, None);

        channel.say("");
        channel.say("  N/A ");
        channel.say("-");

        assert!(output.events().is_empty());
    }

    #[test]
    fn picks_first_voice_unless_one_is_preferred() {
        let voices = vec![
            Voice { name: "Afrikaans".into(), lang: "af".into() },
            Voice { name: "English".into(), lang: "en".into() },
        ];
        let output = RecordingSpeech::with_voices(voices);

        assert_eq!(SpeechChannel::with_default_voice(&output, None).voice(), Some("Afrikaans"));
        assert_eq!(
            SpeechChannel::with_default_voice(&output, Some("English".into())).voice(),
            Some("English")
        );
        assert_eq!(SpeechChannel::with_default_voice(&RecordingSpeech::new(), None).voice(), None);
    }
}
