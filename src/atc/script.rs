//! The fixed clearance-to-takeoff radio script.

use std::fmt;

use crate::flightplan::FlightPlan;

/// Who speaks a radio call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The controller.
    Atc,
    /// The pilot.
    Pilot,
    /// Out-of-band notices from the companion itself.
    System,
}

impl Role {
    /// Transcript prefix, e.g. `ATC`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Atc => "ATC",
            Self::Pilot => "PILOT",
            Self::System => "SYSTEM",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// Speaker.
    pub role: Role,
    /// Rendered text.
    pub text: String,
}

impl ScriptLine {
    fn new(role: Role, text: String) -> Self {
        Self { role, text }
    }
}

/// Values substituted into the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    /// Flight callsign.
    pub callsign: String,
    /// Origin ICAO identifier.
    pub origin: String,
    /// Destination ICAO identifier.
    pub destination: String,
    /// Cruise altitude.
    pub cruise: String,
}

impl Placeholders {
    /// Reads the placeholders from `plan`, falling back to literal tokens
    /// for anything missing, including the whole plan.
    #[must_use]
    pub fn from_plan(plan: Option<&FlightPlan>) -> Self {
        let read = |get: fn(&FlightPlan) -> Option<String>, fallback: &str| {
            plan.and_then(get).unwrap_or_else(|| fallback.to_string())
        };
        Self {
            callsign: read(FlightPlan::callsign, "CALLSIGN"),
            origin: read(FlightPlan::origin_icao, "ORIGIN"),
            destination: read(FlightPlan::destination_icao, "DESTINATION"),
            cruise: read(FlightPlan::cruise_altitude, "10000"),
        }
    }
}

/// Notice shown when a fresh transcript is opened.
pub const READY_NOTICE: &str = "Ready for ATC simulation. Press Ctrl-C to stop.";

/// Renders the clearance, taxi, line-up and takeoff exchange.
#[must_use]
pub fn render(p: &Placeholders) -> Vec<ScriptLine> {
    let Placeholders { callsign, origin, destination, cruise } = p;
    vec![
        ScriptLine::new(Role::Atc, format!("{origin} Clearance, {callsign}")),
        ScriptLine::new(Role::Pilot, format!("{callsign}, requesting IFR clearance to {destination}")),
        ScriptLine::new(
            Role::Atc,
            format!(
                "{callsign}, cleared to {destination} as filed, climb and maintain {cruise} feet, squawk 1234"
            ),
        ),
        ScriptLine::new(
            Role::Pilot,
            format!("Cleared to {destination} as filed, climbing to {cruise}, squawk 1234, {callsign}"),
        ),
        ScriptLine::new(
            Role::Atc,
            format!("{callsign}, taxi runway one-seven left, wind zero-two-zero at 8 knots"),
        ),
        ScriptLine::new(Role::Pilot, format!("Taxi runway one-seven left, {callsign}")),
        ScriptLine::new(Role::Atc, format!("{callsign}, line up and wait runway one-seven left")),
        ScriptLine::new(Role::Pilot, format!("Lining up runway one-seven left, {callsign}")),
        ScriptLine::new(Role::Atc, format!("{callsign}, cleared for takeoff runway one-seven left")),
        ScriptLine::new(Role::Pilot, format!("Cleared for takeoff, {callsign}")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn substitutes_flight_plan_values() {
        let plan = FlightPlan::from_value(json!({
            "callsign": "BAW123",
            "origin": { "icao": "EGLL" },
            "destination": { "icao": "KJFK" },
            "cruise": { "altitude": "350" },
        }));
        let script = render(&Placeholders::from_plan(Some(&plan)));

        assert_eq!(script[0], ScriptLine::new(Role::Atc, "EGLL Clearance, BAW123".into()));
        assert_eq!(
            script[3].text,
            "Cleared to KJFK as filed, climbing to 350, squawk 1234, BAW123"
        );
    }

    #[test]
    fn falls_back_to_literal_tokens_without_a_plan() {
        let script = render(&Placeholders::from_plan(None));

        assert_eq!(script[0].text, "ORIGIN Clearance, CALLSIGN");
        assert!(script[2].text.contains("DESTINATION as filed, climb and maintain 10000 feet"));
    }

    #[test]
    fn alternates_controller_and_pilot() {
        let script = render(&Placeholders::from_plan(None));
        assert_eq!(script.len(), 10);
        for (index, line) in script.iter().enumerate() {
            let expected = if index % 2 == 0 { Role::Atc } else { Role::Pilot };
            assert_eq!(line.role, expected);
        }
    }

    #[test]
    fn partial_plan_falls_back_per_field() {
        let plan = FlightPlan::from_value(json!({ "callsign": "DLH4" }));
        let p = Placeholders::from_plan(Some(&plan));
        assert_eq!(p.callsign, "DLH4");
        assert_eq!(p.origin, "ORIGIN");
        assert_eq!(p.cruise, "10000");
    }
}
