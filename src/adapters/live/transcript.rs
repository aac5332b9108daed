//! Live transcript adapter printing radio calls to stdout.

use std::io::Write;

use crate::atc::script::Role;
use crate::ports::transcript::TranscriptSink;

/// Writes each radio call as `ROLE: text` on its own line.
pub struct ConsoleTranscript;

impl TranscriptSink for ConsoleTranscript {
    fn append(&self, role: Role, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}: {text}", role.label());
        let _ = stdout.flush();
    }

    fn clear(&self) {}
}
