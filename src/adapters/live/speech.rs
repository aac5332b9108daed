//! Live speech adapter driving an external text-to-speech program.
//!
//! The program is expected to take `espeak`-style arguments:
//! `-v <voice> -s <words per minute> -p <pitch 0-99> <text>`, and to list
//! voices with `--voices`.

use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ports::speech::{SpeechOutput, Utterance, Voice};

/// Words per minute at rate 1.0.
const BASE_WPM: f32 = 175.0;
/// Pitch value at pitch 1.0.
const BASE_PITCH: f32 = 50.0;

/// Live speech output that spawns one TTS process per utterance.
///
/// The running child is the single active utterance; cancelling kills it.
pub struct CommandSpeech {
    program: String,
    active: Mutex<Option<Child>>,
}

impl CommandSpeech {
    /// Creates a speech output that runs `program` for every utterance.
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), active: Mutex::new(None) }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Child>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn args_for(utterance: &Utterance) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(voice) = &utterance.voice {
            args.push("-v".to_string());
            args.push(voice.clone());
        }
        #[allow(clippy::cast_possible_truncation)]
        let wpm = (BASE_WPM * utterance.rate).round() as i32;
        #[allow(clippy::cast_possible_truncation)]
        let pitch = (BASE_PITCH * utterance.pitch).round().clamp(0.0, 99.0) as i32;
        args.push("-s".to_string());
        args.push(wpm.to_string());
        args.push("-p".to_string());
        args.push(pitch.to_string());
        args.push(utterance.text.clone());
        args
    }
}

impl SpeechOutput for CommandSpeech {
    fn speak(&self, utterance: &Utterance) {
        let spawned = Command::new(&self.program)
            .args(Self::args_for(utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                if let Some(mut previous) = self.slot().replace(child) {
                    let _ = previous.kill();
                    let _ = previous.wait();
                }
            }
            Err(e) => tracing::warn!(program = %self.program, error = %e, "speech unavailable"),
        }
    }

    fn cancel(&self) {
        if let Some(mut child) = self.slot().take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn is_speaking(&self) -> bool {
        let mut active = self.slot();
        let finished = match active.as_mut() {
            Some(child) => !matches!(child.try_wait(), Ok(None)),
            None => return false,
        };
        if finished {
            *active = None;
        }
        !finished
    }

    fn voices(&self) -> Vec<Voice> {
        let output = match Command::new(&self.program).arg("--voices").output() {
            Ok(output) if output.status.success() => output,
            Ok(_) => return Vec::new(),
            Err(e) => {
                tracing::debug!(program = %self.program, error = %e, "cannot list voices");
                return Vec::new();
            }
        };
        parse_voice_table(&String::from_utf8_lossy(&output.stdout))
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Parses the `--voices` table: a header row, then
/// `Pty Language Age/Gender VoiceName File ...` per voice.
fn parse_voice_table(table: &str) -> Vec<Voice> {
    table
        .lines()
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            match columns.as_slice() {
                [_, lang, _, name, ..] => {
                    Some(Voice { name: (*name).to_string(), lang: (*lang).to_string() })
                }
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_espeak_voice_table() {
        let table = "Pty Language       Age/Gender VoiceName          File                 Other Languages\n \
                     5  af              --/M      Afrikaans          gmw/af\n \
                     5  en-gb           --/M      English_(Great_Britain) gmw/en\n";
        let voices = parse_voice_table(table);
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[1], Voice { name: "English_(Great_Britain)".into(), lang: "en-gb".into() });
    }

    #[test]
    fn maps_rate_and_pitch_to_program_arguments() {
        let utterance =
            Utterance { text: "BAW123".into(), voice: Some("en-gb".into()), rate: 0.9, pitch: 1.0 };
        let args = CommandSpeech::args_for(&utterance);
        assert_eq!(args, vec!["-v", "en-gb", "-s", "158", "-p", "50", "BAW123"]);
    }

    #[test]
    fn missing_program_is_absorbed() {
        let speech = CommandSpeech::new("flightcall-no-such-tts-program");
        speech.speak(&Utterance { text: "hello".into(), voice: None, rate: 1.0, pitch: 1.0 });
        speech.cancel();
        assert!(!speech.is_speaking());
        assert!(speech.voices().is_empty());
    }

    #[test]
    fn poisoned_slot_still_tracks_the_new_child() {
        let speech = CommandSpeech::new("true");
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _held = speech.active.lock().unwrap();
                    panic!("poison the slot");
                })
                .join();
        });
        assert!(speech.active.is_poisoned());

        speech.speak(&Utterance { text: "hello".into(), voice: None, rate: 1.0, pitch: 1.0 });

        assert!(speech.slot().is_some());
        speech.cancel();
        assert!(speech.slot().is_none());
    }
}
