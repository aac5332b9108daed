//! Live adapter for the `HttpClient` port using `reqwest`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::ports::http::{FetchFuture, HttpClient, HttpRequest, HttpResponse, Method};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Live HTTP client backed by a shared `reqwest` connection pool.
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Creates a new live client.
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("flightcall/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    fn fetch(&self, request: &HttpRequest) -> FetchFuture<'_> {
        let method = request.method;
        let url = request.url.clone();

        Box::pin(async move {
            let builder = match method {
                Method::Get => self.client.get(&url),
                Method::Post => self.client.post(&url),
            };

            let response = builder.send().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("{method} {url} failed: {e}").into()
                },
            )?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(String::from);
            let body = response.bytes().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read response body from {url}: {e}").into()
                },
            )?;

            tracing::debug!(%method, %url, status, bytes = body.len(), "network response");
            Ok(HttpResponse { status, content_type, body: body.to_vec() })
        })
    }
}
