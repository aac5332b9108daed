//! `flightcall fetch` command.

use crate::flightplan::Briefing;
use crate::session::CompanionSession;

/// Execute the `fetch` command.
///
/// Without a username, the one used for the last successful fetch is
/// reused.
///
/// # Errors
///
/// Returns the user-facing dispatch error; the previously loaded plan is
/// left in place.
pub async fn run(session: &mut CompanionSession<'_>, username: Option<&str>) -> Result<(), String> {
    let username = match username {
        Some(name) => name.to_string(),
        None => session.store().last_username().unwrap_or_default(),
    };

    let plan = session.login(&username).await.map_err(|e| e.to_string())?;
    let title = Briefing::from_plan(plan).title;
    println!("Loaded flight plan {title}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryFileSystem, ScriptedHttpClient};
    use crate::config::AppConfig;
    use crate::context::ServiceContext;
    use crate::ports::filesystem::FileSystem;
    use crate::ports::http::HttpResponse;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    const PLAN: &str = r#"{"callsign":"DAL9","origin":{"icao":"KATL"},"destination":{"icao":"KLAX"}}"#;

    fn config() -> AppConfig {
        AppConfig { home: PathBuf::from("/home"), ..AppConfig::default() }
    }

    #[tokio::test]
    async fn reuses_last_username() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.write(Path::new("/home/last_username"), b"delta\n").unwrap();
        let http = Arc::new(ScriptedHttpClient::new());
        http.respond(
            "https://www.simbrief.com/api/xml.fetcher.php?username=delta&json=1",
            HttpResponse::ok("application/json", PLAN),
        );
        let mut ctx = ServiceContext::in_memory();
        ctx.fs = fs;
        ctx.http = http;
        let config = config();
        let mut session = CompanionSession::open(&ctx, &config);

        run(&mut session, None).await.unwrap();

        assert_eq!(session.flight_plan().unwrap().callsign().as_deref(), Some("DAL9"));
    }

    #[tokio::test]
    async fn blank_username_is_rejected_before_any_request() {
        let http = Arc::new(ScriptedHttpClient::new());
        let mut ctx = ServiceContext::in_memory();
        ctx.http = http.clone();
        let config = config();
        let mut session = CompanionSession::open(&ctx, &config);

        let err = run(&mut session, Some("   ")).await.unwrap_err();

        assert_eq!(err, "Please enter a username or email");
        assert!(http.calls().is_empty());
    }

    #[tokio::test]
    async fn service_error_is_reported_verbatim() {
        let http = Arc::new(ScriptedHttpClient::new());
        http.respond(
            "https://www.simbrief.com/api/xml.fetcher.php?username=nobody&json=1",
            HttpResponse::ok("application/json", r#"{"error":"Unknown UserID"}"#),
        );
        let mut ctx = ServiceContext::in_memory();
        ctx.http = http;
        let config = config();
        let mut session = CompanionSession::open(&ctx, &config);

        let err = run(&mut session, Some("nobody")).await.unwrap_err();

        assert_eq!(err, "Error: Unknown UserID");
        assert!(session.flight_plan().is_none());
    }
}
