//! The offline cache gateway.
//!
//! Every outbound request goes through [`CacheGateway::fetch`], which
//! consults the routing table and serves from the network, the current
//! bucket, or both. Cache trouble never fails a request on its own: a
//! broken read is a miss and a broken write is only logged.

use reqwest::Url;

use crate::ports::http::{HttpClient, HttpRequest, HttpResponse};

use super::bucket::{BucketStore, CacheError};
use super::routes::{Policy, RoutingTable};

/// Errors surfaced to callers of the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The network failed and no cached copy could stand in.
    #[error(transparent)]
    Network(Box<dyn std::error::Error + Send + Sync>),
    /// The network answered with a failure status and no cached copy
    /// could stand in.
    #[error("{url} answered with status {status}")]
    Status {
        /// Request URL.
        url: String,
        /// The status received.
        status: u16,
    },
    /// Bucket maintenance (install, activate) failed.
    #[error(transparent)]
    Cache(#[from] CacheError),
    /// The asset origin or a manifest path is not a valid URL.
    #[error("invalid asset URL {0}")]
    AssetUrl(String),
}

/// Result of pre-populating the current bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// URLs now cached.
    pub cached: Vec<String>,
    /// URLs that could not be cached, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Serves requests according to a [`RoutingTable`] over one versioned bucket.
pub struct CacheGateway<'a> {
    http: &'a dyn HttpClient,
    buckets: BucketStore<'a>,
    routes: RoutingTable,
    version: String,
}

impl<'a> CacheGateway<'a> {
    /// Creates a gateway whose current bucket is named `version`.
    pub fn new(
        http: &'a dyn HttpClient,
        buckets: BucketStore<'a>,
        routes: RoutingTable,
        version: impl Into<String>,
    ) -> Self {
        Self { http, buckets, routes, version: version.into() }
    }

    /// Name of the current bucket.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The routing table in use.
    #[must_use]
    pub fn routes(&self) -> &RoutingTable {
        &self.routes
    }

    /// The underlying bucket storage.
    #[must_use]
    pub fn buckets(&self) -> &BucketStore<'a> {
        &self.buckets
    }

    /// Serves `request` according to its route.
    ///
    /// # Errors
    ///
    /// Returns the network failure when neither the network nor the cache
    /// can answer. No placeholder response is ever made up.
    pub async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, GatewayError> {
        let policy = self.routes.policy_for(request);
        tracing::debug!(method = %request.method, url = %request.url, ?policy, "gateway fetch");
        match policy {
            Policy::Passthrough => self.http.fetch(request).await.map_err(GatewayError::Network),
            Policy::NetworkFirst => self.network_first(request).await,
            Policy::CacheFirst => self.cache_first(request).await,
        }
    }

    async fn network_first(&self, request: &HttpRequest) -> Result<HttpResponse, GatewayError> {
        let failure = match self.http.fetch(request).await {
            Ok(response) if response.is_success() => {
                if let Err(e) = self.buckets.put(&self.version, request, &response) {
                    tracing::warn!(url = %request.url, error = %e, "could not cache response");
                }
                return Ok(response);
            }
            Ok(response) => {
                GatewayError::Status { url: request.url.clone(), status: response.status }
            }
            Err(e) => GatewayError::Network(e),
        };

        match self.cached(request) {
            Some(response) => {
                tracing::info!(url = %request.url, reason = %failure, "serving cached copy");
                Ok(response)
            }
            None => Err(failure),
        }
    }

    async fn cache_first(&self, request: &HttpRequest) -> Result<HttpResponse, GatewayError> {
        if let Some(response) = self.cached(request) {
            return Ok(response);
        }
        self.http.fetch(request).await.map_err(GatewayError::Network)
    }

    fn cached(&self, request: &HttpRequest) -> Option<HttpResponse> {
        self.buckets.lookup(&self.version, request).unwrap_or_else(|e| {
            tracing::warn!(url = %request.url, error = %e, "cache read failed");
            None
        })
    }

    /// Pre-populates the current bucket with `manifest`, resolved against
    /// `origin`.
    ///
    /// Entries are best-effort: a failing entry is logged and reported,
    /// never fatal. The new bucket is usable as soon as this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if `origin` is not a URL or the bucket cannot be created.
    pub async fn install(
        &self,
        origin: &str,
        manifest: &[&str],
    ) -> Result<InstallReport, GatewayError> {
        let base = Url::parse(origin).map_err(|e| GatewayError::AssetUrl(format!("{origin}: {e}")))?;
        self.buckets.open(&self.version)?;

        let mut report = InstallReport::default();
        for path in manifest {
            let url = match base.join(path) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    tracing::warn!(path, error = %e, "skipping manifest entry");
                    report.failed.push(((*path).to_string(), e.to_string()));
                    continue;
                }
            };
            match self.install_one(&url).await {
                Ok(()) => report.cached.push(url),
                Err(reason) => {
                    tracing::warn!(%url, %reason, "manifest entry not cached");
                    report.failed.push((url, reason));
                }
            }
        }

        tracing::info!(
            bucket = %self.version,
            cached = report.cached.len(),
            failed = report.failed.len(),
            "cache installed"
        );
        Ok(report)
    }

    async fn install_one(&self, url: &str) -> Result<(), String> {
        let request = HttpRequest::get(url);
        let response = self.http.fetch(&request).await.map_err(|e| e.to_string())?;
        if !response.is_success() {
            return Err(format!("status {}", response.status));
        }
        self.buckets.put(&self.version, &request, &response).map_err(|e| e.to_string())
    }

    /// Deletes every bucket except the current one and returns the names
    /// deleted. The gateway serves from the current bucket immediately
    /// afterwards; nothing waits for a restart.
    ///
    /// # Errors
    ///
    /// Returns an error if the buckets cannot be listed, or the first
    /// deletion failure after attempting every stale bucket.
    pub fn activate(&self) -> Result<Vec<String>, GatewayError> {
        let mut purged = Vec::new();
        let mut first_error = None;
        for name in self.buckets.names()? {
            if name == self.version {
                continue;
            }
            match self.buckets.delete(&name) {
                Ok(()) => {
                    tracing::info!(bucket = %name, "purged stale cache bucket");
                    purged.push(name);
                }
                Err(e) => {
                    tracing::warn!(bucket = %name, error = %e, "could not purge cache bucket");
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(purged),
        }
    }
}
