//! Client for the flight-plan dispatch service.

use reqwest::Url;

use crate::cache::{CacheGateway, GatewayError};
use crate::flightplan::FlightPlan;
use crate::ports::http::HttpRequest;

/// The SimBrief "latest OFP" endpoint.
pub const DEFAULT_DISPATCH_URL: &str = "https://www.simbrief.com/api/xml.fetcher.php";

/// Why a flight plan could not be fetched.
///
/// The `Display` text is what the user sees.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No username was given.
    #[error("Please enter a username or email")]
    MissingUsername,
    /// The configured endpoint is not a URL.
    #[error("Invalid dispatch service URL {url}: {reason}")]
    InvalidEndpoint {
        /// The configured URL.
        url: String,
        /// Parser message.
        reason: String,
    },
    /// Network and cache both failed.
    #[error("Failed to fetch flight plan. Check your internet connection.")]
    Unavailable(#[source] GatewayError),
    /// The response was not JSON.
    #[error("Failed to fetch flight plan. The dispatch service sent an unreadable response.")]
    Malformed(#[source] serde_json::Error),
    /// The service answered with a logical error.
    #[error("Error: {0}")]
    Service(String),
}

/// Fetches flight plans through the cache gateway.
pub struct DispatchClient<'g, 'a> {
    gateway: &'g CacheGateway<'a>,
    endpoint: String,
}

impl<'g, 'a> DispatchClient<'g, 'a> {
    /// Creates a client for `endpoint`.
    pub fn new(gateway: &'g CacheGateway<'a>, endpoint: impl Into<String>) -> Self {
        Self { gateway, endpoint: endpoint.into() }
    }

    /// The request issued for `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is blank or the endpoint is not a URL.
    pub fn request_for(&self, username: &str) -> Result<HttpRequest, DispatchError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DispatchError::MissingUsername);
        }
        let url = Url::parse_with_params(&self.endpoint, &[("username", username), ("json", "1")])
            .map_err(|e| DispatchError::InvalidEndpoint {
                url: self.endpoint.clone(),
                reason: e.to_string(),
            })?;
        Ok(HttpRequest::get(url.to_string()))
    }

    /// Fetches the latest flight plan filed by `username`.
    ///
    /// # Errors
    ///
    /// See [`DispatchError`]; none of them are retried.
    pub async fn fetch(&self, username: &str) -> Result<FlightPlan, DispatchError> {
        let request = self.request_for(username)?;
        let response = self.gateway.fetch(&request).await.map_err(|e| {
            tracing::error!(error = %e, "flight plan fetch failed");
            DispatchError::Unavailable(e)
        })?;

        let body = String::from_utf8_lossy(&response.body);
        let plan = FlightPlan::from_json(&body).map_err(|e| {
            tracing::error!(error = %e, "flight plan response is not JSON");
            DispatchError::Malformed(e)
        })?;

        if let Some(message) = plan.service_error() {
            tracing::warn!(%message, "dispatch service reported an error");
            return Err(DispatchError::Service(message));
        }
        tracing::info!(callsign = ?plan.callsign(), "flight plan fetched");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{ManualClock, MemoryFileSystem, ScriptedHttpClient, SequentialIds};
    use crate::cache::{BucketStore, RoutingTable, CACHE_VERSION};
    use crate::ports::http::HttpResponse;
    use chrono::Utc;
    use std::path::Path;

    const PILOT_URL: &str = "https://www.simbrief.com/api/xml.fetcher.php?username=pilot+one&json=1";

    struct Rig {
        http: ScriptedHttpClient,
        fs: MemoryFileSystem,
        ids: SequentialIds,
        clock: ManualClock,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                http: ScriptedHttpClient::new(),
                fs: MemoryFileSystem::new(),
                ids: SequentialIds::default(),
                clock: ManualClock::new(Utc::now()),
            }
        }

        fn gateway(&self) -> CacheGateway<'_> {
            CacheGateway::new(
                &self.http,
                BucketStore::new(&self.fs, &self.ids, &self.clock, Path::new("/cache")),
                RoutingTable::standard("simbrief.com"),
                CACHE_VERSION,
            )
        }
    }

    #[test]
    fn encodes_username_into_request() {
        let rig = Rig::new();
        let gateway = rig.gateway();
        let client = DispatchClient::new(&gateway, DEFAULT_DISPATCH_URL);

        assert_eq!(client.request_for("  pilot one ").unwrap().url, PILOT_URL);
        assert!(matches!(client.request_for("   "), Err(DispatchError::MissingUsername)));
    }

    #[tokio::test]
    async fn returns_plan_on_success() {
        let rig = Rig::new();
        rig.http.respond(PILOT_URL, HttpResponse::ok("application/json", r#"{"callsign":"BAW123"}"#));
        let gateway = rig.gateway();

        let plan = DispatchClient::new(&gateway, DEFAULT_DISPATCH_URL).fetch("pilot one").await.unwrap();

        assert_eq!(plan.callsign().as_deref(), Some("BAW123"));
    }

    #[tokio::test]
    async fn surfaces_service_error_field() {
        let rig = Rig::new();
        rig.http.respond(
            PILOT_URL,
            HttpResponse::ok("application/json", r#"{"error":"No flight plan found"}"#),
        );
        let gateway = rig.gateway();

        let err = DispatchClient::new(&gateway, DEFAULT_DISPATCH_URL).fetch("pilot one").await.unwrap_err();

        assert_eq!(err.to_string(), "Error: No flight plan found");
    }

    #[tokio::test]
    async fn offline_without_cache_is_unavailable() {
        let rig = Rig::new();
        rig.http.set_offline(true);
        let gateway = rig.gateway();

        let err = DispatchClient::new(&gateway, DEFAULT_DISPATCH_URL).fetch("pilot one").await.unwrap_err();

        assert!(matches!(err, DispatchError::Unavailable(_)));
        assert_eq!(err.to_string(), "Failed to fetch flight plan. Check your internet connection.");
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let rig = Rig::new();
        rig.http.respond(PILOT_URL, HttpResponse::ok("text/html", "<html>maintenance</html>"));
        let gateway = rig.gateway();

        let err = DispatchClient::new(&gateway, DEFAULT_DISPATCH_URL).fetch("pilot one").await.unwrap_err();

        assert!(matches!(err, DispatchError::Malformed(_)));
    }
}
