//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the companion's core and the
//! outside world (time, files, network, speech, transcript, IDs).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod http;
pub mod id_gen;
pub mod speech;
pub mod transcript;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use http::{FetchFuture, HttpClient, HttpRequest, HttpResponse, Method};
pub use id_gen::IdGenerator;
pub use speech::{SpeechOutput, Utterance, Voice};
pub use transcript::TranscriptSink;
