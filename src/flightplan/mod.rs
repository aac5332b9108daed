//! Flight plans as delivered by the dispatch service.
//!
//! The document is kept exactly as received so it can be persisted and
//! reloaded verbatim. Accessors read the handful of fields the companion
//! uses and accept either strings or numbers, since the service is not
//! consistent about which it sends.

pub mod briefing;
pub mod store;

use serde_json::Value;

pub use briefing::{Briefing, Field};
pub use store::{FlightPlanStore, StoreError};

/// A dispatch-service flight plan.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightPlan {
    raw: Value,
    source: String,
}

impl FlightPlan {
    /// Wraps an already-parsed document.
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        let source = raw.to_string();
        Self { raw, source }
    }

    /// Parses a document from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not valid JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw = serde_json::from_str(json)?;
        Ok(Self { raw, source: json.to_string() })
    }

    /// The document exactly as received.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The JSON text the document was parsed from, byte for byte.
    #[must_use]
    pub fn as_json(&self) -> &str {
        &self.source
    }

    /// The logical error reported by the service, if any.
    #[must_use]
    pub fn service_error(&self) -> Option<String> {
        self.text(&["error"])
    }

    /// Flight callsign, e.g. `BAW123`.
    #[must_use]
    pub fn callsign(&self) -> Option<String> {
        self.text(&["callsign"])
    }

    /// Origin ICAO identifier.
    #[must_use]
    pub fn origin_icao(&self) -> Option<String> {
        self.text(&["origin", "icao"])
    }

    /// Destination ICAO identifier.
    #[must_use]
    pub fn destination_icao(&self) -> Option<String> {
        self.text(&["destination", "icao"])
    }

    /// Cruise altitude as filed (flight level or feet).
    #[must_use]
    pub fn cruise_altitude(&self) -> Option<String> {
        self.text(&["cruise", "altitude"])
    }

    /// Reads the value at `path` as display text.
    ///
    /// Strings are returned as-is, numbers and booleans formatted. Missing
    /// keys, nulls, empty strings, arrays and objects yield `None`.
    #[must_use]
    pub fn text(&self, path: &[&str]) -> Option<String> {
        match self.lookup(path)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Reads the value at `path` as a number, parsing numeric strings.
    #[must_use]
    pub fn number(&self, path: &[&str]) -> Option<f64> {
        match self.lookup(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Reads the array at `path`; anything else is treated as empty.
    #[must_use]
    pub fn list(&self, path: &[&str]) -> &[Value] {
        self.lookup(path).and_then(Value::as_array).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` when `path` holds a non-null value.
    #[must_use]
    pub fn has(&self, path: &[&str]) -> bool {
        self.lookup(path).is_some_and(|v| !v.is_null())
    }

    fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.raw, |value, key| value.get(key))
    }
}

/// Display text for `key` inside an arbitrary JSON object, with the same
/// leniency as [`FlightPlan::text`].
pub(crate) fn text_of(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
