//! Command dispatch and handlers.

pub mod atc;
pub mod cache;
pub mod fetch;
pub mod logout;
pub mod show;
pub mod speak;
pub mod voices;

use std::future::Future;
use std::time::Duration;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::session::CompanionSession;
use crate::speech::SpeechChannel;

/// How often a finished command checks whether speech is still playing.
const SPEECH_POLL: Duration = Duration::from_millis(100);

/// Hint printed whenever a command needs a flight plan and there is none.
pub(crate) const NO_FLIGHT_PLAN: &str =
    "No flight plan loaded. Run `flightcall fetch <USERNAME>` first.";

/// Dispatch a parsed command to its handler.
///
/// Loads the configuration, builds the live context and runs the handler
/// on a current-thread runtime.
///
/// # Errors
///
/// Returns an error string if configuration fails or the selected command
/// handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = AppConfig::load()?;
    let ctx = ServiceContext::live(&config);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;

    runtime.block_on(dispatch_with_context(command, &ctx, &config, interrupted()))
}

/// Dispatch a command with the given service context.
///
/// `stop` ends long-running commands (ATC playback, speech) early.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub async fn dispatch_with_context<F>(
    command: &Command,
    ctx: &ServiceContext,
    config: &AppConfig,
    stop: F,
) -> Result<(), String>
where
    F: Future<Output = ()>,
{
    let mut session = CompanionSession::open(ctx, config);
    match command {
        Command::Fetch { username } => fetch::run(&mut session, username.as_deref()).await,
        Command::Show => show::run(&session),
        Command::Speak { target } => speak::run(&session, *target, stop).await,
        Command::Voices => voices::run(&session),
        Command::Atc { instant: true } => atc::run_instant(&session),
        Command::Atc { instant: false } => atc::run(&session, stop).await,
        Command::Logout => logout::run(&mut session),
        Command::Cache { action } => cache::run(&session, action).await,
    }
}

/// Resolves on Ctrl-C. Never resolves if the signal cannot be watched.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot watch for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Waits for the current utterance to finish, cutting it off if `stop`
/// resolves first.
pub(crate) async fn wait_for_speech<F>(speech: &SpeechChannel<'_>, stop: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(stop);
    while speech.is_speaking() {
        tokio::select! {
            () = tokio::time::sleep(SPEECH_POLL) => {}
            () = &mut stop => {
                speech.silence();
                return;
            }
        }
    }
}
