//! Scripted HTTP client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::ports::http::{FetchFuture, HttpClient, HttpRequest, HttpResponse};

/// Serves canned responses per URL and logs every request it sees.
///
/// Unknown URLs answer `404`. [`ScriptedHttpClient::set_offline`] makes
/// every request fail at the transport level.
#[derive(Default)]
pub struct ScriptedHttpClient {
    responses: Mutex<HashMap<String, HttpResponse>>,
    offline: AtomicBool,
    calls: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    /// Creates a client with no canned responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers requests for `url` with `response` from now on.
    pub fn respond(&self, url: impl Into<String>, response: HttpResponse) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(url.into(), response);
        }
    }

    /// Simulates the network being unreachable (or back).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Requests seen so far, in order, including failed ones.
    #[must_use]
    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn fetch(&self, request: &HttpRequest) -> FetchFuture<'_> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }
        let offline = self.offline.load(Ordering::SeqCst);
        let canned = self.responses.lock().ok().and_then(|r| r.get(&request.url).cloned());
        let url = request.url.clone();

        Box::pin(async move {
            if offline {
                return Err(format!("network unreachable: {url}").into());
            }
            Ok(canned.unwrap_or(HttpResponse {
                status: 404,
                content_type: None,
                body: Vec::new(),
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_canned_then_fails_offline() {
        let http = ScriptedHttpClient::new();
        http.respond("https://host/a", HttpResponse::ok("text/plain", "a"));

        let hit = http.fetch(&HttpRequest::get("https://host/a")).await.unwrap();
        assert_eq!(hit.body, b"a");
        let miss = http.fetch(&HttpRequest::get("https://host/b")).await.unwrap();
        assert_eq!(miss.status, 404);

        http.set_offline(true);
        assert!(http.fetch(&HttpRequest::get("https://host/a")).await.is_err());
        assert_eq!(http.calls().len(), 3);
    }
}
