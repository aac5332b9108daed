//! Clock port for obtaining the current time.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// The ATC sequencer measures its step cadence against this clock, so
/// tests can substitute a manually advanced clock instead of waiting on
/// real delays.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
