//! ATC playback sequencer.
//!
//! A two-state machine (idle, running) that walks the script one line per
//! step. It never waits by itself: [`Sequencer::start`] and
//! [`Sequencer::fire`] return the next [`Tick`] and whoever drives the
//! sequencer decides how to wait for it. Pending ticks cannot be recalled,
//! so every step re-checks that it is still wanted before doing anything.

use chrono::{DateTime, Duration, Utc};

use crate::ports::clock::Clock;
use crate::ports::transcript::TranscriptSink;
use crate::speech::SpeechChannel;

use super::script::ScriptLine;

/// Delay between the start of one step and the start of the next.
pub const STEP_INTERVAL_MS: i64 = 3000;

/// The step interval as a `chrono` duration.
#[must_use]
pub fn step_interval() -> Duration {
    Duration::milliseconds(STEP_INTERVAL_MS)
}

/// A scheduled step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// The start-to-stop chain this tick belongs to.
    pub generation: u64,
    /// When the step should run.
    pub due: DateTime<Utc>,
}

/// Externally visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not playing; ticks are ignored.
    Idle,
    /// Playing; the next tick advances the script.
    Running,
}

/// Plays a script through a transcript and a speech channel.
pub struct Sequencer<'a> {
    script: Vec<ScriptLine>,
    running: bool,
    cursor: usize,
    generation: u64,
    clock: &'a dyn Clock,
    speech: SpeechChannel<'a>,
    transcript: &'a dyn TranscriptSink,
}

impl<'a> Sequencer<'a> {
    /// Creates an idle sequencer for `script`.
    #[must_use]
    pub fn new(
        script: Vec<ScriptLine>,
        clock: &'a dyn Clock,
        speech: SpeechChannel<'a>,
        transcript: &'a dyn TranscriptSink,
    ) -> Self {
        Self { script, running: false, cursor: 0, generation: 0, clock, speech, transcript }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        if self.running {
            PlaybackState::Running
        } else {
            PlaybackState::Idle
        }
    }

    /// Index of the next line to play, in `0..=script.len()`.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The script being played.
    #[must_use]
    pub fn script(&self) -> &[ScriptLine] {
        &self.script
    }

    /// Starts from the first line, emitting it immediately.
    ///
    /// Calling this while already running restarts cleanly: the previous
    /// chain's pending tick goes stale and is ignored when it fires.
    /// Returns the tick for the second line, or `None` if the script has
    /// at most one line.
    pub fn start(&mut self) -> Option<Tick> {
        if self.running {
            tracing::debug!(cursor = self.cursor, "restarting ATC playback");
        }
        self.generation = self.generation.wrapping_add(1);
        self.running = true;
        self.cursor = 0;
        tracing::info!(lines = self.script.len(), "ATC playback started");
        self.step()
    }

    /// Runs the step scheduled by `tick`.
    ///
    /// A tick that arrives after [`Sequencer::stop`], after natural
    /// completion or after a restart does nothing and returns `None`.
    pub fn fire(&mut self, tick: Tick) -> Option<Tick> {
        if !self.running || tick.generation != self.generation {
            tracing::trace!(generation = tick.generation, "ignoring stale tick");
            return None;
        }
        self.step()
    }

    /// Stops playback and cuts off the current utterance.
    ///
    /// Stopping an idle sequencer does nothing.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.speech.silence();
        tracing::info!(cursor = self.cursor, "ATC playback stopped");
    }

    fn step(&mut self) -> Option<Tick> {
        let began = self.clock.now();
        let Some(line) = self.script.get(self.cursor) else {
            self.finish();
            return None;
        };

        self.transcript.append(line.role, &line.text);
        self.speech.say(&line.text);
        self.cursor += 1;

        if self.cursor < self.script.len() {
            Some(Tick { generation: self.generation, due: began + step_interval() })
        } else {
            self.finish();
            None
        }
    }

    fn finish(&mut self) {
        self.running = false;
        tracing::info!(lines = self.cursor, "ATC playback complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{ManualClock, MemoryTranscript, RecordingSpeech, SpeechEvent};
    use crate::atc::script::{render, Placeholders, Role};

    fn start_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-15T14:30:00Z").unwrap().to_utc()
    }

    struct Rig {
        clock: ManualClock,
        speech: RecordingSpeech,
        transcript: MemoryTranscript,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                clock: ManualClock::new(start_time()),
                speech: RecordingSpeech::new(),
                transcript: MemoryTranscript::new(),
            }
        }

        fn sequencer(&self) -> Sequencer<'_> {
            Sequencer::new(
                render(&Placeholders::from_plan(None)),
                &self.clock,
                SpeechChannel::new(&self.speech, None),
                &self.transcript,
            )
        }
    }

    #[test]
    fn start_emits_first_line_and_schedules_second() {
        let rig = Rig::new();
        let mut seq = rig.sequencer();

        let tick = seq.start().unwrap();

        assert_eq!(seq.state(), PlaybackState::Running);
        assert_eq!(seq.cursor(), 1);
        assert_eq!(tick.due, start_time() + Duration::seconds(3));
        assert_eq!(rig.transcript.lines(), vec![(Role::Atc, "ORIGIN Clearance, CALLSIGN".into())]);
        assert_eq!(rig.speech.spoken(), vec!["ORIGIN Clearance, CALLSIGN"]);
    }

    #[test]
    fn delay_is_measured_from_step_start() {
        let rig = Rig::new();
        let mut seq = rig.sequencer();
        let first = seq.start().unwrap();

        rig.clock.advance(Duration::milliseconds(3250));
        let second = seq.fire(first).unwrap();

        assert_eq!(second.due, start_time() + Duration::milliseconds(6250));
    }

    #[test]
    fn runs_to_completion_then_idles() {
        let rig = Rig::new();
        let mut seq = rig.sequencer();
        let length = seq.script().len();

        let mut next = seq.start();
        while let Some(tick) = next {
            rig.clock.advance_to(tick.due);
            next = seq.fire(tick);
        }

        assert_eq!(seq.state(), PlaybackState::Idle);
        assert_eq!(seq.cursor(), length);
        assert_eq!(rig.transcript.lines().len(), length);
        assert_eq!(rig.speech.spoken().len(), length);
        assert_eq!(rig.speech.spoken().last().unwrap(), "Cleared for takeoff, CALLSIGN");
    }

    #[test]
    fn tick_after_stop_is_ignored() {
        let rig = Rig::new();
        let mut seq = rig.sequencer();
        let tick = seq.start().unwrap();

        seq.stop();

        assert_eq!(seq.fire(tick), None);
        assert_eq!(seq.cursor(), 1);
        assert_eq!(rig.transcript.lines().len(), 1);
        assert_eq!(rig.speech.events().last(), Some(&SpeechEvent::Cancelled));
    }

    #[test]
    fn stop_at_any_cursor_blocks_further_lines() {
        let length = render(&Placeholders::from_plan(None)).len();
        for k in 0..length {
            let rig = Rig::new();
            let mut seq = rig.sequencer();
            let mut pending = seq.start();
            for _ in 0..k {
                let tick = pending.unwrap();
                rig.clock.advance_to(tick.due);
                pending = seq.fire(tick);
            }

            seq.stop();
            if let Some(stale) = pending {
                rig.clock.advance_to(stale.due);
                assert_eq!(seq.fire(stale), None, "stopped at {k}");
            }

            assert_eq!(seq.state(), PlaybackState::Idle);
            assert_eq!(rig.transcript.lines().len(), k + 1, "stopped at {k}");
            assert_eq!(rig.speech.spoken().len(), k + 1, "stopped at {k}");
        }
    }

    #[test]
    fn stop_when_idle_is_a_no_op() {
        let rig = Rig::new();
        let mut seq = rig.sequencer();

        seq.stop();
        seq.stop();

        assert_eq!(seq.state(), PlaybackState::Idle);
        assert_eq!(seq.cursor(), 0);
        assert!(rig.speech.events().is_empty());
    }

    #[test]
    fn restart_while_running_does_not_stack_chains() {
        let rig = Rig::new();
        let mut seq = rig.sequencer();
        let old = seq.start().unwrap();
        rig.clock.advance(Duration::seconds(1));

        let new = seq.start().unwrap();

        assert_eq!(seq.cursor(), 1);
        assert_eq!(seq.fire(old), None);
        assert_eq!(seq.cursor(), 1);
        assert!(seq.fire(new).is_some());
        assert_eq!(seq.cursor(), 2);
        assert_eq!(rig.transcript.lines().len(), 3);
    }

    #[test]
    fn empty_script_finishes_immediately() {
        let rig = Rig::new();
        let mut seq = Sequencer::new(
            Vec::new(),
            &rig.clock,
            SpeechChannel::new(&rig.speech, None),
            &rig.transcript,
        );

        assert_eq!(seq.start(), None);
        assert_eq!(seq.state(), PlaybackState::Idle);
        assert!(rig.transcript.lines().is_empty());
    }
}
