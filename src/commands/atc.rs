//! `flightcall atc` command.

use std::future::Future;

use chrono::Utc;

use crate::adapters::memory::{ManualClock, RecordingSpeech};
use crate::atc::{play, Outcome, Role, VirtualTimeline, READY_NOTICE};
use crate::session::CompanionSession;
use crate::speech::SpeechChannel;

use super::wait_for_speech;

/// Execute the `atc` command in real time.
///
/// Lines are spoken and printed three seconds apart. `stop` ends playback
/// and cuts off the current utterance. After the last line the command
/// waits for it to finish speaking.
///
/// # Errors
///
/// This command does not currently fail.
pub async fn run<F>(session: &CompanionSession<'_>, stop: F) -> Result<(), String>
where
    F: Future<Output = ()>,
{
    let ctx = session.context();
    begin(session);

    tokio::pin!(stop);
    let mut sequencer = session.sequencer();
    match play(&mut sequencer, ctx.clock.as_ref(), &mut stop).await {
        Outcome::Completed => wait_for_speech(&session.speech(), &mut stop).await,
        Outcome::Stopped => ctx.transcript.append(Role::System, "ATC simulation stopped."),
    }
    Ok(())
}

/// Execute the `atc --instant` command.
///
/// Plays the whole exchange on a virtual clock with speech muted, so
/// nothing waits.
///
/// # Errors
///
/// This command does not currently fail.
pub fn run_instant(session: &CompanionSession<'_>) -> Result<(), String> {
    begin(session);

    let clock = ManualClock::new(Utc::now());
    let muted = RecordingSpeech::new();
    let mut sequencer = session.sequencer_with(&clock, SpeechChannel::new(&muted, None));
    let mut timeline = VirtualTimeline::new(&clock);
    timeline.schedule(sequencer.start());
    let steps = timeline.run_until_idle(&mut sequencer);
    tracing::debug!(steps, "instant ATC playback finished");
    Ok(())
}

fn begin(session: &CompanionSession<'_>) {
    let transcript = &session.context().transcript;
    transcript.clear();
    transcript.append(Role::System, READY_NOTICE);
}
