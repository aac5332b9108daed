//! `flightcall show` command.

use std::fmt::Write as _;

use crate::flightplan::{Briefing, Field};
use crate::session::CompanionSession;

use super::NO_FLIGHT_PLAN;

const SUMMARY_FIELDS: [(&str, Field); 10] = [
    ("Callsign", Field::Callsign),
    ("Departure", Field::Departure),
    ("Destination", Field::Destination),
    ("Alternate", Field::Alternate),
    ("Cruise", Field::CruiseAltitude),
    ("Distance", Field::Distance),
    ("Flight time", Field::FlightTime),
    ("Trip fuel", Field::TripFuel),
    ("Reserve fuel", Field::ReserveFuel),
    ("Total fuel", Field::TotalFuel),
];

/// Execute the `show` command.
///
/// Prints the briefing for the loaded plan, or a hint when there is none.
///
/// # Errors
///
/// This command does not currently fail.
pub fn run(session: &CompanionSession<'_>) -> Result<(), String> {
    match session.briefing() {
        Some(briefing) => print!("{}", render(&briefing)),
        None => println!("{NO_FLIGHT_PLAN}"),
    }
    Ok(())
}

/// Formats the full briefing as plain text.
#[must_use]
pub fn render(briefing: &Briefing) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", briefing.title);
    let _ = writeln!(out);
    for (label, field) in SUMMARY_FIELDS {
        let _ = writeln!(out, "{:<13} {}", format!("{label}:"), briefing.value(field));
    }
    for (heading, body) in
        [("Route", &briefing.route), ("Weather", &briefing.weather), ("Airports", &briefing.atc)]
    {
        let _ = writeln!(out, "\n{heading}\n{body}");
    }
    out
}
