//! Routing table deciding how each outbound request is served.

use reqwest::Url;

use crate::ports::http::{HttpRequest, Method};

/// How a request is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Straight to the network, never cached.
    Passthrough,
    /// Network, refreshing the cache on success and falling back to it on failure.
    NetworkFirst,
    /// Cache if present, otherwise the network (without storing).
    CacheFirst,
}

/// What a route matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Any request whose method is not GET.
    NonGet,
    /// URLs on `host` or any of its subdomains.
    Host(String),
    /// Every request.
    Any,
}

impl Matcher {
    /// Returns `true` if `request` matches.
    #[must_use]
    pub fn matches(&self, request: &HttpRequest) -> bool {
        match self {
            Self::NonGet => request.method != Method::Get,
            Self::Host(host) => host_of(&request.url).is_some_and(|actual| {
                actual == *host
                    || actual.strip_suffix(host.as_str()).is_some_and(|sub| sub.ends_with('.'))
            }),
            Self::Any => true,
        }
    }
}

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Name used in logs.
    pub name: &'static str,
    /// Which requests the row applies to.
    pub matcher: Matcher,
    /// How they are served.
    pub policy: Policy,
}

/// Ordered list of routes; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    routes: Vec<Route>,
}

impl RoutingTable {
    /// Builds a table from explicit rows.
    #[must_use]
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The companion's table: writes pass through, the dispatch service is
    /// network-first, everything else cache-first.
    #[must_use]
    pub fn standard(dispatch_host: &str) -> Self {
        Self::new(vec![
            Route { name: "non-get", matcher: Matcher::NonGet, policy: Policy::Passthrough },
            Route {
                name: "dispatch",
                matcher: Matcher::Host(dispatch_host.to_ascii_lowercase()),
                policy: Policy::NetworkFirst,
            },
            Route { name: "assets", matcher: Matcher::Any, policy: Policy::CacheFirst },
        ])
    }

    /// Every row, in evaluation order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The first row matching `request`, if any.
    #[must_use]
    pub fn route_for(&self, request: &HttpRequest) -> Option<&Route> {
        self.routes.iter().find(|route| route.matcher.matches(request))
    }

    /// The policy for `request`; unmatched requests pass through.
    #[must_use]
    pub fn policy_for(&self, request: &HttpRequest) -> Policy {
        self.route_for(request).map_or(Policy::Passthrough, |route| route.policy)
    }
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISPATCH: &str = "https://www.simbrief.com/api/xml.fetcher.php?username=pilot&json=1";

    #[test]
    fn standard_table_selects_policies() {
        let table = RoutingTable::standard("simbrief.com");

        assert_eq!(table.policy_for(&HttpRequest::get(DISPATCH)), Policy::NetworkFirst);
        assert_eq!(
            table.policy_for(&HttpRequest::get("https://app.example/styles.css")),
            Policy::CacheFirst
        );
        let post = HttpRequest { method: Method::Post, url: DISPATCH.into() };
        assert_eq!(table.policy_for(&post), Policy::Passthrough);
    }

    #[test]
    fn host_matcher_does_not_match_lookalikes() {
        let matcher = Matcher::Host("simbrief.com".into());

        assert!(matcher.matches(&HttpRequest::get("https://simbrief.com/")));
        assert!(matcher.matches(&HttpRequest::get("https://WWW.SimBrief.com/x")));
        assert!(!matcher.matches(&HttpRequest::get("https://notsimbrief.com/")));
        assert!(!matcher.matches(&HttpRequest::get("https://app.example/?q=simbrief.com")));
        assert!(!matcher.matches(&HttpRequest::get("not a url")));
    }

    #[test]
    fn empty_table_passes_everything_through() {
        let table = RoutingTable::new(Vec::new());
        assert_eq!(table.policy_for(&HttpRequest::get(DISPATCH)), Policy::Passthrough);
        assert!(table.route_for(&HttpRequest::get(DISPATCH)).is_none());
    }
}
