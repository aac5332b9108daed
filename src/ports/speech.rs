//! Speech output port for vocalising utterances.

/// A single unit of text submitted for vocalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// The text to speak.
    pub text: String,
    /// Voice name, or `None` for the engine default.
    pub voice: Option<String>,
    /// Speaking rate, 1.0 being the engine's normal speed.
    pub rate: f32,
    /// Pitch, 1.0 being the engine's normal pitch.
    pub pitch: f32,
}

/// A voice offered by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Name passed back in [`Utterance::voice`].
    pub name: String,
    /// Language tag, e.g. `en-gb`.
    pub lang: String,
}

/// The process-wide speech resource.
///
/// Implementations hold at most one active utterance. Failures are
/// absorbed: speech is a best-effort side channel.
pub trait SpeechOutput: Send + Sync {
    /// Starts speaking `utterance`.
    fn speak(&self, utterance: &Utterance);

    /// Stops the active utterance, if any, without waiting for it to finish.
    fn cancel(&self);

    /// Whether an utterance is still playing.
    fn is_speaking(&self) -> bool;

    /// Lists the voices the engine offers. Empty when none are available.
    fn voices(&self) -> Vec<Voice>;
}
