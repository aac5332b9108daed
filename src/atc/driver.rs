//! Real-time driver: waits out each tick on the tokio timer.

use std::future::Future;

use crate::ports::clock::Clock;

use super::sequencer::Sequencer;

/// How a real-time playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every line was played.
    Completed,
    /// The stop signal fired first.
    Stopped,
}

/// Starts `sequencer` and plays it until the script ends or `stop` resolves.
///
/// Waits are computed from `clock`, so a step that ran late does not push
/// the following steps back.
pub async fn play<F>(sequencer: &mut Sequencer<'_>, clock: &dyn Clock, stop: F) -> Outcome
where
    F: Future<Output = ()>,
{
    tokio::pin!(stop);
    let mut next = sequencer.start();
    while let Some(tick) = next {
        let wait = (tick.due - clock.now()).to_std().unwrap_or_default();
        tokio::select! {
            () = tokio::time::sleep(wait) => next = sequencer.fire(tick),
            () = &mut stop => {
                sequencer.stop();
                return Outcome::Stopped;
            }
        }
    }
    Outcome::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::clock::SystemClock;
    use crate::adapters::memory::{MemoryTranscript, RecordingSpeech};
    use crate::atc::script::{Role, ScriptLine};
    use crate::atc::sequencer::PlaybackState;
    use crate::speech::SpeechChannel;

    fn line(text: &str) -> ScriptLine {
        ScriptLine { role: Role::Atc, text: text.into() }
    }

    #[tokio::test]
    async fn single_line_script_completes_without_waiting() {
        let speech = RecordingSpeech::new();
        let transcript = MemoryTranscript::new();
        let mut seq = Sequencer::new(
            vec![line("EGLL Clearance, BAW123")],
            &SystemClock,
            SpeechChannel::new(&speech, None),
            &transcript,
        );

        let outcome = play(&mut seq, &SystemClock, std::future::pending()).await;

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(transcript.lines().len(), 1);
    }

    #[tokio::test]
    async fn stop_signal_interrupts_the_delay() {
        let speech = RecordingSpeech::new();
        let transcript = MemoryTranscript::new();
        let mut seq = Sequencer::new(
            vec![line("one"), line("two")],
            &SystemClock,
            SpeechChannel::new(&speech, None),
            &transcript,
        );

        let outcome = play(&mut seq, &SystemClock, async {}).await;

        assert_eq!(outcome, Outcome::Stopped);
        assert_eq!(seq.state(), PlaybackState::Idle);
        assert_eq!(transcript.lines().len(), 1);
    }
}
