//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::flightplan::Field;

/// Top-level CLI parser for `flightcall`.
#[derive(Debug, Parser)]
#[command(
    name = "flightcall",
    version,
    about = "Flight-plan briefings and ATC phraseology practice for flight simulation"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the latest flight plan from the dispatch service.
    Fetch {
        /// Dispatch username or email. Defaults to the last one used.
        username: Option<String>,
    },
    /// Print the briefing for the loaded flight plan.
    Show,
    /// Read part of the briefing aloud.
    Speak {
        /// What to read.
        #[arg(value_enum, default_value_t = SpeakTarget::All)]
        target: SpeakTarget,
    },
    /// List the voices the speech engine offers.
    Voices,
    /// Play the scripted ATC exchange for the loaded flight plan.
    Atc {
        /// Print the exchange without waiting between calls or speaking.
        #[arg(long)]
        instant: bool,
    },
    /// Forget the loaded flight plan.
    Logout,
    /// Manage the offline cache.
    Cache {
        /// The cache operation.
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Offline cache operations.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Pre-cache the asset manifest into the current bucket, then purge older buckets.
    Install {
        /// Base URL of the assets. Defaults to the configured asset origin.
        #[arg(long)]
        origin: Option<String>,
    },
    /// Delete every bucket except the current one.
    Activate,
    /// List buckets and their entry counts.
    List,
    /// Fetch a URL through the cache gateway.
    Fetch {
        /// The URL to fetch.
        url: String,
    },
}

/// Parts of the briefing that can be spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpeakTarget {
    /// The whole-flight summary.
    All,
    /// The navlog.
    Route,
    /// Departure and destination weather.
    Weather,
    /// The airport block.
    Atc,
    /// Flight callsign.
    Callsign,
    /// Departure airport.
    Departure,
    /// Destination airport.
    Destination,
    /// Alternate airport.
    Alternate,
    /// Cruise flight level.
    Cruise,
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

impl SpeakTarget {
    /// The single briefing field this target announces, if it is one.
    #[must_use]
    pub fn field(self) -> Option<Field> {
        match self {
            Self::All | Self::Route | Self::Weather | Self::Atc => None,
            Self::Callsign => Some(Field::Callsign),
            Self::Departure => Some(Field::Departure),
            Self::Destination => Some(Field::Destination),
            Self::Alternate => Some(Field::Alternate),
            Self::Cruise => Some(Field::CruiseAltitude),
            Self::Distance => Some(Field::Distance),
            Self::FlightTime => Some(Field::FlightTime),
            Self::TripFuel => Some(Field::TripFuel),
            Self::ReserveFuel => Some(Field::ReserveFuel),
            Self::TotalFuel => Some(Field::TotalFuel),
        }
    }
}
