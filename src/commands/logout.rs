//! `flightcall logout` command.

use crate::session::CompanionSession;

/// Execute the `logout` command.
///
/// # Errors
///
/// Returns an error string if the saved plan cannot be removed.
pub fn run(session: &mut CompanionSession<'_>) -> Result<(), String> {
    session.logout().map_err(|e| e.to_string())?;
    println!("Flight plan cleared.");
    Ok(())
}
