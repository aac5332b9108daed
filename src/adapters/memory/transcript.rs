//! Transcript kept in memory.

use std::sync::Mutex;

use crate::atc::script::Role;
use crate::ports::transcript::TranscriptSink;

/// Collects `(role, text)` pairs.
#[derive(Default)]
pub struct MemoryTranscript {
    lines: Mutex<Vec<(Role, String)>>,
}

impl MemoryTranscript {
    /// Creates an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines appended so far.
    #[must_use]
    pub fn lines(&self) -> Vec<(Role, String)> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    /// Lines rendered the way the console shows them.
    #[must_use]
    pub fn rendered(&self) -> Vec<String> {
        self.lines().iter().map(|(role, text)| format!("{}: {text}", role.label())).collect()
    }
}

impl TranscriptSink for MemoryTranscript {
    fn append(&self, role: Role, text: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((role, text.to_string()));
        }
    }

    fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}
