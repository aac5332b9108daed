//! `flightcall voices` command.

use crate::session::CompanionSession;

/// Execute the `voices` command.
///
/// Lists the engine's voices, marking the one announcements will use.
///
/// # Errors
///
/// This command does not currently fail.
pub fn run(session: &CompanionSession<'_>) -> Result<(), String> {
    let speech = session.speech();
    let voices = speech.voices();
    if voices.is_empty() {
        println!("No voices available from `{}`.", session.config().tts_program);
        return Ok(());
    }
    for voice in &voices {
        let marker = if speech.voice() == Some(voice.name.as_str()) { '*' } else { ' ' };
        println!("{marker} {:<28} {}", voice.name, voice.lang);
    }
    Ok(())
}
