//! Core library entry for the `flightcall` CLI.
//!
//! A flight-simulation companion: fetches the latest flight plan, reads
//! the briefing aloud, plays a scripted ATC exchange, and keeps an offline
//! cache of everything it fetched.

pub mod adapters;
pub mod atc;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod flightplan;
pub mod ports;
pub mod session;
pub mod speech;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
