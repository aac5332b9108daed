//! Transcript port for the ATC radio log.

use crate::atc::script::Role;

/// Append-only sink for rendered radio calls.
///
/// The sequencer never clears it; a new session clears it from outside.
pub trait TranscriptSink: Send + Sync {
    /// Appends one line spoken by `role`.
    fn append(&self, role: Role, text: &str);

    /// Discards everything appended so far.
    fn clear(&self);
}
