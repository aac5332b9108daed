//! Service context bundling all port trait objects.

use std::sync::Arc;

use chrono::Utc;

use crate::adapters::live::clock::SystemClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::http::ReqwestClient;
use crate::adapters::live::id_gen::UuidGenerator;
use crate::adapters::live::speech::CommandSpeech;
use crate::adapters::live::transcript::ConsoleTranscript;
use crate::adapters::memory::{
    ManualClock, MemoryFileSystem, MemoryTranscript, RecordingSpeech, ScriptedHttpClient,
    SequentialIds,
};
use crate::config::AppConfig;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::http::HttpClient;
use crate::ports::id_gen::IdGenerator;
use crate::ports::speech::SpeechOutput;
use crate::ports::transcript::TranscriptSink;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Fields are shared
/// handles so a caller can keep its own reference to a concrete adapter
/// (typically an in-memory one) while the context uses it.
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Arc<dyn Clock>,
    /// Filesystem for the saved plan and cache buckets.
    pub fs: Arc<dyn FileSystem>,
    /// Network access.
    pub http: Arc<dyn HttpClient>,
    /// The process-wide speech resource.
    pub speech: Arc<dyn SpeechOutput>,
    /// Where radio calls are written.
    pub transcript: Arc<dyn TranscriptSink>,
    /// ID generator for cache body files.
    pub id_gen: Arc<dyn IdGenerator>,
}

impl ServiceContext {
    /// Creates a live context talking to the real clock, disk, network,
    /// speech engine and terminal.
    #[must_use]
    pub fn live(config: &AppConfig) -> Self {
        Self {
            clock: Arc::new(SystemClock),
            fs: Arc::new(LiveFileSystem),
            http: Arc::new(ReqwestClient::new()),
            speech: Arc::new(CommandSpeech::new(&config.tts_program)),
            transcript: Arc::new(ConsoleTranscript),
            id_gen: Arc::new(UuidGenerator),
        }
    }

    /// Creates a fully in-memory context: empty filesystem, a network with
    /// no canned responses, silent speech, and a clock frozen at "now".
    ///
    /// Swap individual fields to keep a typed handle on an adapter.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            clock: Arc::new(ManualClock::new(Utc::now())),
            fs: Arc::new(MemoryFileSystem::new()),
            http: Arc::new(ScriptedHttpClient::new()),
            speech: Arc::new(RecordingSpeech::new()),
            transcript: Arc::new(MemoryTranscript::new()),
            id_gen: Arc::new(SequentialIds::default()),
        }
    }
}
