//! Speech output that records what it was asked to do.

use std::sync::Mutex;

use crate::ports::speech::{SpeechOutput, Utterance, Voice};

/// One call made against [`RecordingSpeech`].
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    /// `speak` was called.
    Spoke(Utterance),
    /// `cancel` was called.
    Cancelled,
}

/// Records speak and cancel calls in order.
#[derive(Default)]
pub struct RecordingSpeech {
    voices: Vec<Voice>,
    events: Mutex<Vec<SpeechEvent>>,
}

impl RecordingSpeech {
    /// Creates a recorder offering no voices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder offering `voices`.
    #[must_use]
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self { voices, events: Mutex::default() }
    }

    /// Every call so far.
    #[must_use]
    pub fn events(&self) -> Vec<SpeechEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Texts of the utterances spoken so far.
    #[must_use]
    pub fn spoken(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SpeechEvent::Spoke(utterance) => Some(utterance.text),
                SpeechEvent::Cancelled => None,
            })
            .collect()
    }

    fn push(&self, event: SpeechEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl SpeechOutput for RecordingSpeech {
    fn speak(&self, utterance: &Utterance) {
        self.push(SpeechEvent::Spoke(utterance.clone()));
    }

    fn cancel(&self) {
        self.push(SpeechEvent::Cancelled);
    }

    fn is_speaking(&self) -> bool {
        false
    }

    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }
}
