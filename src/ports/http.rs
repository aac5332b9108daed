//! HTTP client port for outbound requests.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type alias used by [`HttpClient`] to keep the trait dyn-compatible.
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Request method. Only the methods the companion issues are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// A cacheable read.
    Get,
    /// Any write; never cached.
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// An outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// The request method.
    pub method: Method,
    /// The absolute target URL.
    pub url: String,
}

impl HttpRequest {
    /// Builds a GET request for `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::Get, url: url.into() }
    }

    /// Identity used as the cache key: method plus URL.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

/// A captured response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// The `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// The exact body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Builds a `200 OK` response with the given body.
    pub fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self { status: 200, content_type: Some(content_type.to_string()), body: body.into() }
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests over the network.
pub trait HttpClient: Send + Sync {
    /// Issues `request` and resolves with the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure (unreachable host, reset, etc.).
    fn fetch(&self, request: &HttpRequest) -> FetchFuture<'_>;
}
