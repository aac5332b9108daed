//! End-to-end behaviour of a companion session on in-memory ports.
//!
//! Covers the flight-plan fetch surviving a dropped connection, the
//! versioned cache lifecycle, and ATC playback on virtual time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Duration;

use flightcall::adapters::memory::{
    ManualClock, MemoryFileSystem, MemoryTranscript, RecordingSpeech, ScriptedHttpClient,
};
use flightcall::atc::{step_interval, PlaybackState, VirtualTimeline};
use flightcall::cache::{ASSET_MANIFEST, CACHE_VERSION};
use flightcall::config::AppConfig;
use flightcall::context::ServiceContext;
use flightcall::ports::filesystem::FileSystem;
use flightcall::ports::http::{HttpRequest, HttpResponse};
use flightcall::session::CompanionSession;

const PILOT_URL: &str = "https://www.simbrief.com/api/xml.fetcher.php?username=pilot&json=1";
const PLAN: &str = r#"{"callsign":"BAW123","origin":{"icao":"EGLL"},"destination":{"icao":"KJFK"},"cruise":{"altitude":"350"}}"#;
const ORIGIN: &str = "https://app.example/";

struct Rig {
    ctx: ServiceContext,
    fs: Arc<MemoryFileSystem>,
    http: Arc<ScriptedHttpClient>,
    clock: Arc<ManualClock>,
    speech: Arc<RecordingSpeech>,
    transcript: Arc<MemoryTranscript>,
    config: AppConfig,
}

fn rig() -> Rig {
    let fs = Arc::new(MemoryFileSystem::new());
    let http = Arc::new(ScriptedHttpClient::new());
    let clock = Arc::new(ManualClock::new(chrono::Utc::now()));
    let speech = Arc::new(RecordingSpeech::new());
    let transcript = Arc::new(MemoryTranscript::new());
    let mut ctx = ServiceContext::in_memory();
    ctx.fs = fs.clone();
    ctx.http = http.clone();
    ctx.clock = clock.clone();
    ctx.speech = speech.clone();
    ctx.transcript = transcript.clone();
    let config = AppConfig {
        home: PathBuf::from("/home"),
        asset_origin: Some(ORIGIN.to_string()),
        ..AppConfig::default()
    };
    Rig { ctx, fs, http, clock, speech, transcript, config }
}

#[tokio::test]
async fn flight_plan_is_served_from_cache_when_offline() {
    let rig = rig();
    rig.http.respond(PILOT_URL, HttpResponse::ok("application/json", PLAN));
    let mut session = CompanionSession::open(&rig.ctx, &rig.config);
    session.login("pilot").await.unwrap();

    rig.http.set_offline(true);
    rig.fs.remove(Path::new("/home/last_flight_plan.json")).unwrap();
    let mut session = CompanionSession::open(&rig.ctx, &rig.config);
    assert!(session.flight_plan().is_none());

    let plan = session.login("pilot").await.unwrap();

    assert_eq!(plan.as_json(), PLAN);
    assert_eq!(rig.http.calls().len(), 2);
}

#[tokio::test]
async fn offline_without_cached_copy_surfaces_connection_error() {
    let rig = rig();
    rig.http.set_offline(true);
    let mut session = CompanionSession::open(&rig.ctx, &rig.config);

    let err = session.login("pilot").await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to fetch flight plan. Check your internet connection.");
}

#[tokio::test]
async fn installed_assets_are_served_without_network() {
    let rig = rig();
    rig.http.respond("https://app.example/styles.css", HttpResponse::ok("text/css", "body{}"));
    let session = CompanionSession::open(&rig.ctx, &rig.config);
    let gateway = session.gateway();

    let cold = gateway.fetch(&HttpRequest::get("https://app.example/app.js")).await.unwrap();
    assert_eq!(cold.status, 404);

    let report = gateway.install(ORIGIN, &ASSET_MANIFEST).await.unwrap();
    assert_eq!(report.cached, vec!["https://app.example/styles.css"]);
    assert_eq!(report.failed.len(), ASSET_MANIFEST.len() - 1);

    let calls_before = rig.http.calls().len();
    let warm = gateway.fetch(&HttpRequest::get("https://app.example/styles.css")).await.unwrap();
    assert_eq!(warm.body, b"body{}");
    assert_eq!(rig.http.calls().len(), calls_before);
}

#[tokio::test]
async fn activation_keeps_only_current_bucket() {
    let rig = rig();
    rig.fs.write(Path::new("/home/cache/flight-assistant-v0/index.yaml"), b"{}\n").unwrap();
    rig.fs.write(Path::new("/home/cache/scratch/index.yaml"), b"{}\n").unwrap();
    let session = CompanionSession::open(&rig.ctx, &rig.config);
    let gateway = session.gateway();
    gateway.install(ORIGIN, &ASSET_MANIFEST).await.unwrap();

    assert_eq!(
        gateway.buckets().names().unwrap(),
        vec!["flight-assistant-v0", CACHE_VERSION, "scratch"]
    );
    let purged = gateway.activate().unwrap();

    assert_eq!(purged, vec!["flight-assistant-v0", "scratch"]);
    assert_eq!(gateway.buckets().names().unwrap(), vec![CACHE_VERSION]);
}

#[tokio::test]
async fn atc_playback_reflects_fetched_plan_and_stops_cleanly() {
    let rig = rig();
    rig.http.respond(PILOT_URL, HttpResponse::ok("application/json", PLAN));
    let mut session = CompanionSession::open(&rig.ctx, &rig.config);
    session.login("pilot").await.unwrap();

    let mut sequencer = session.sequencer();
    let mut timeline = VirtualTimeline::new(&rig.clock);
    timeline.schedule(sequencer.start());
    timeline.advance(step_interval() * 2, &mut sequencer);
    sequencer.stop();
    let late = timeline.run_until_idle(&mut sequencer);

    assert_eq!(late, 1);
    assert_eq!(sequencer.state(), PlaybackState::Idle);
    assert_eq!(
        rig.transcript.rendered(),
        vec![
            "ATC: EGLL Clearance, BAW123",
            "PILOT: BAW123, requesting IFR clearance to KJFK",
            "ATC: BAW123, cleared to KJFK as filed, climb and maintain 350 feet, squawk 1234",
        ]
    );
    assert_eq!(rig.speech.spoken().len(), 3);

    timeline.advance(Duration::seconds(30), &mut sequencer);
    assert_eq!(rig.transcript.lines().len(), 3);
}
