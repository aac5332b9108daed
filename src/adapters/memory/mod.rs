//! In-memory adapters for deterministic, offline runs.
//!
//! Every port has one here. They back the unit and integration tests and
//! the virtual-time playback of `atc --instant`.

pub mod clock;
pub mod filesystem;
pub mod http;
pub mod id_gen;
pub mod speech;
pub mod transcript;

pub use clock::ManualClock;
pub use filesystem::MemoryFileSystem;
pub use http::ScriptedHttpClient;
pub use id_gen::SequentialIds;
pub use speech::{RecordingSpeech, SpeechEvent};
pub use transcript::MemoryTranscript;
