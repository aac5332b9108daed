//! `flightcall speak` command.

use std::future::Future;

use crate::cli::SpeakTarget;
use crate::flightplan::Briefing;
use crate::session::CompanionSession;

use super::{wait_for_speech, NO_FLIGHT_PLAN};

/// Execute the `speak` command.
///
/// Speaks the selected part of the briefing and waits for the utterance to
/// finish, or for `stop`.
///
/// # Errors
///
/// Returns an error string if no flight plan is loaded.
pub async fn run<F>(session: &CompanionSession<'_>, target: SpeakTarget, stop: F) -> Result<(), String>
where
    F: Future<Output = ()>,
{
    let briefing = session.briefing().ok_or_else(|| NO_FLIGHT_PLAN.to_string())?;
    let text = announcement(&briefing, target);
    println!("{text}");

    let speech = session.speech();
    speech.say(&text);
    wait_for_speech(&speech, stop).await;
    Ok(())
}

/// The text spoken for `target`.
#[must_use]
pub fn announcement(briefing: &Briefing, target: SpeakTarget) -> String {
    if let Some(field) = target.field() {
        return briefing.announcement(field);
    }
    match target {
        SpeakTarget::Route => briefing.route.clone(),
        SpeakTarget::Weather => briefing.weather.clone(),
        SpeakTarget::Atc => briefing.atc.clone(),
        _ => briefing.summary_announcement(),
    }
}
