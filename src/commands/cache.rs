//! `flightcall cache` commands.

use std::io::Write as _;

use crate::cache::ASSET_MANIFEST;
use crate::cli::CacheAction;
use crate::ports::http::HttpRequest;
use crate::session::CompanionSession;

/// Execute a `cache` subcommand.
///
/// # Errors
///
/// Returns an error string if the cache cannot be read or written, or a
/// fetched URL is available from neither the network nor the cache.
pub async fn run(session: &CompanionSession<'_>, action: &CacheAction) -> Result<(), String> {
    match action {
        CacheAction::Install { origin } => install(session, origin.as_deref()).await,
        CacheAction::Activate => activate(session),
        CacheAction::List => list(session),
        CacheAction::Fetch { url } => fetch(session, url).await,
    }
}

async fn install(session: &CompanionSession<'_>, origin: Option<&str>) -> Result<(), String> {
    let origin = origin
        .map(str::to_string)
        .or_else(|| session.config().asset_origin.clone())
        .ok_or("No asset origin configured. Pass --origin or set FLIGHTCALL_ASSET_ORIGIN.")?;

    let gateway = session.gateway();
    let report = gateway.install(&origin, &ASSET_MANIFEST).await.map_err(|e| e.to_string())?;

    println!(
        "Cached {} of {} assets into {}",
        report.cached.len(),
        ASSET_MANIFEST.len(),
        gateway.version()
    );
    for (url, reason) in &report.failed {
        println!("  failed: {url} ({reason})");
    }

    // The new bucket takes over at once; nothing waits for a later run.
    report_purged(&gateway.activate().map_err(|e| e.to_string())?);
    Ok(())
}

fn activate(session: &CompanionSession<'_>) -> Result<(), String> {
    report_purged(&session.gateway().activate().map_err(|e| e.to_string())?);
    Ok(())
}

fn report_purged(purged: &[String]) {
    if purged.is_empty() {
        println!("No stale cache buckets.");
    }
    for name in purged {
        println!("Deleted {name}");
    }
}

fn list(session: &CompanionSession<'_>) -> Result<(), String> {
    let gateway = session.gateway();
    let names = gateway.buckets().names().map_err(|e| e.to_string())?;
    if names.is_empty() {
        println!("No cache buckets.");
        return Ok(());
    }
    for name in &names {
        let marker = if name == gateway.version() { '*' } else { ' ' };
        println!("{marker} {name} ({} entries)", gateway.buckets().entry_count(name));
    }
    Ok(())
}

async fn fetch(session: &CompanionSession<'_>, url: &str) -> Result<(), String> {
    let response = session
        .gateway()
        .fetch(&HttpRequest::get(url))
        .await
        .map_err(|e| e.to_string())?;

    eprintln!(
        "{} {}",
        response.status,
        response.content_type.as_deref().unwrap_or("application/octet-stream")
    );
    std::io::stdout()
        .write_all(&response.body)
        .map_err(|e| format!("Failed to write response: {e}"))
}
