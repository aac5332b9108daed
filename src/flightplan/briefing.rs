//! Human-readable briefing rendered from a flight plan.
//!
//! Every missing value renders as `N/A` rather than failing, so a partial
//! document still produces a complete briefing.

use std::fmt::Write as _;

use super::{text_of, FlightPlan};

const NOT_AVAILABLE: &str = "N/A";

/// A single briefing field that can be announced on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Flight callsign.
    Callsign,
    /// Departure airport.
    Departure,
    /// Destination airport.
    Destination,
    /// Alternate airport.
    Alternate,
    /// Cruise flight level.
    CruiseAltitude,
    /// Planned distance.
    Distance,
    /// Planned block time.
    FlightTime,
    /// Trip fuel.
    TripFuel,
    /// Reserve fuel.
    ReserveFuel,
    /// Trip plus reserve.
    TotalFuel,
}

/// The rendered briefing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Briefing {
    /// `"BAW123 - EGLL to KJFK"`.
    pub title: String,
    /// Callsign.
    pub callsign: String,
    /// `"EGLL - London Heathrow"`.
    pub departure: String,
    /// `"KJFK - John F Kennedy Intl"`.
    pub destination: String,
    /// `"KBOS - Boston Logan"`.
    pub alternate: String,
    /// `"FL350"`.
    pub cruise_altitude: String,
    /// `"3000 NM"`.
    pub distance: String,
    /// `"7h 5m"`.
    pub flight_time: String,
    /// Trip fuel in pounds.
    pub trip_fuel: String,
    /// Reserve fuel in pounds.
    pub reserve_fuel: String,
    /// Trip plus reserve in pounds.
    pub total_fuel: String,
    /// Numbered navlog, one fix per line.
    pub route: String,
    /// Departure and destination METARs.
    pub weather: String,
    /// Departure, destination and alternate airport block.
    pub atc: String,
}

impl Briefing {
    /// Renders the briefing for `plan`.
    #[must_use]
    pub fn from_plan(plan: &FlightPlan) -> Self {
        let or_na = |path: &[&str]| plan.text(path).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let airport = |section: &str| format!("{} - {}", or_na(&[section, "icao"]), or_na(&[section, "name"]));

        let contingency = plan.number(&["fuel", "contingency_fuel"]).unwrap_or(0.0);
        let reserve = plan.number(&["fuel", "reserve_fuel"]).unwrap_or(0.0);

        Self {
            title: format!(
                "{} - {} to {}",
                or_na(&["callsign"]),
                or_na(&["origin", "icao"]),
                or_na(&["destination", "icao"])
            ),
            callsign: or_na(&["callsign"]),
            departure: airport("origin"),
            destination: airport("destination"),
            alternate: airport("alternate"),
            cruise_altitude: format!("FL{}", or_na(&["cruise", "altitude"])),
            distance: format!("{} NM", or_na(&["distance"])),
            flight_time: flight_time(plan.number(&["flight_time"])),
            trip_fuel: pounds(contingency),
            reserve_fuel: pounds(reserve),
            total_fuel: pounds(contingency + reserve),
            route: route(plan),
            weather: weather(plan),
            atc: atc(plan),
        }
    }

    /// The displayed value of `field`.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Callsign => &self.callsign,
            Field::Departure => &self.departure,
            Field::Destination => &self.destination,
            Field::Alternate => &self.alternate,
            Field::CruiseAltitude => &self.cruise_altitude,
            Field::Distance => &self.distance,
            Field::FlightTime => &self.flight_time,
            Field::TripFuel => &self.trip_fuel,
            Field::ReserveFuel => &self.reserve_fuel,
            Field::TotalFuel => &self.total_fuel,
        }
    }

    /// The sentence spoken for a single field.
    #[must_use]
    pub fn announcement(&self, field: Field) -> String {
        let value = self.value(field);
        match field {
            Field::Callsign => format!("Callsign is {value}"),
            Field::Departure => format!("Departing from {value}"),
            Field::Destination => format!("Destination is {value}"),
            Field::Alternate => format!("Alternate airport {value}"),
            Field::CruiseAltitude => format!("Cruise altitude {value}"),
            Field::Distance => format!("Distance {value}"),
            Field::FlightTime => format!("Flight time {value}"),
            Field::TripFuel => format!("Trip fuel {value}"),
            Field::ReserveFuel => format!("Reserve fuel {value}"),
            Field::TotalFuel => format!("Total fuel {value}"),
        }
    }

    /// The whole-flight summary spoken by "speak all".
    #[must_use]
    pub fn summary_announcement(&self) -> String {
        [
            format!("Callsign {}.", self.callsign),
            format!("Departing {}.", self.departure),
            format!("Destination {}.", self.destination),
            format!("Alternate {}.", self.alternate),
            format!("Cruise altitude {}.", self.cruise_altitude),
            format!("Distance {}.", self.distance),
            format!("Flight time {}.", self.flight_time),
            format!("Trip fuel {}.", self.trip_fuel),
            format!("Reserve fuel {}.", self.reserve_fuel),
        ]
        .join(" ")
    }
}

fn flight_time(minutes: Option<f64>) -> String {
    match minutes {
        #[allow(clippy::cast_possible_truncation)]
        Some(m) if m > 0.0 => {
            let m = m.trunc() as i64;
            format!("{}h {}m", m / 60, m % 60)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn pounds(value: f64) -> String {
    format!("{:.0} LBS", value.round())
}

fn route(plan: &FlightPlan) -> String {
    let navlog = plan.list(&["navlog"]);
    if navlog.is_empty() {
        return "No route data available".to_string();
    }
    navlog
        .iter()
        .enumerate()
        .map(|(index, fix)| {
            format!(
                "{}. {} - Alt: {} ft",
                index + 1,
                text_of(fix, "ident").unwrap_or_else(|| "FIX".to_string()),
                text_of(fix, "altitude").unwrap_or_else(|| NOT_AVAILABLE.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn weather(plan: &FlightPlan) -> String {
    let departure = plan.has(&["weather", "departure"]);
    let destination = plan.has(&["weather", "destination"]);
    if !departure && !destination {
        return "No weather data available".to_string();
    }

    let or_na = |path: &[&str]| plan.text(path).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let mut text = String::new();
    if departure {
        let _ = writeln!(text, "DEPARTURE ({}):", or_na(&["origin", "icao"]));
        let _ = writeln!(text, "METAR: {}\n", or_na(&["weather", "departure", "metar"]));
    }
    if destination {
        let _ = writeln!(text, "DESTINATION ({}):", or_na(&["destination", "icao"]));
        let _ = writeln!(text, "METAR: {}", or_na(&["weather", "destination", "metar"]));
    }
    text
}

fn atc(plan: &FlightPlan) -> String {
    let or_na = |path: &[&str]| plan.text(path).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    format!(
        "DEPARTURE ATC:\nICAO: {}\nName: {}\nRunway: {}\n\n\
         DESTINATION ATC:\nICAO: {}\nName: {}\nRunway: {}\n\n\
         ALTERNATE:\nICAO: {}\nName: {}",
        or_na(&["origin", "icao"]),
        or_na(&["origin", "name"]),
        or_na(&["origin", "runway"]),
        or_na(&["destination", "icao"]),
        or_na(&["destination", "name"]),
        or_na(&["destination", "runway"]),
        or_na(&["alternate", "icao"]),
        or_na(&["alternate", "name"]),
    )
}
