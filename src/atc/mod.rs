//! Scripted ATC phraseology practice.
//!
//! [`script`] renders the radio calls, [`sequencer`] plays them one step
//! at a time, and [`driver`] / [`timeline`] supply real or virtual time.

pub mod driver;
pub mod script;
pub mod sequencer;
pub mod timeline;

pub use driver::{play, Outcome};
pub use script::{render, Placeholders, Role, ScriptLine, READY_NOTICE};
pub use sequencer::{step_interval, PlaybackState, Sequencer, Tick, STEP_INTERVAL_MS};
pub use timeline::VirtualTimeline;
