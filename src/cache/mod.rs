//! Offline cache: versioned buckets and the gateway that serves from them.

pub mod bucket;
pub mod gateway;
pub mod routes;

pub use bucket::{BucketStore, CacheEntry, CacheError};
pub use gateway::{CacheGateway, GatewayError, InstallReport};
pub use routes::{Matcher, Policy, Route, RoutingTable};

/// Name of the current bucket. Bump it to supersede every cached copy.
pub const CACHE_VERSION: &str = "flight-assistant-v1";

/// Local assets pre-cached at install, relative to the asset origin.
pub const ASSET_MANIFEST: [&str; 5] =
    ["./", "./index.html", "./styles.css", "./app.js", "./manifest.json"];
