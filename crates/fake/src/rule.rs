//! Response rules registered on a fake server

use crate::pattern::UrlPattern;
use http::{Method, StatusCode};
use mock_api_server_common::{FakeRequest, FakeResponse};
use std::fmt;
use std::sync::Arc;

type Handler = dyn Fn(&FakeRequest) -> FakeResponse + Send + Sync;

/// Produces the response for a matched request
#[derive(Clone)]
pub enum Responder {
    /// The same canned response every time
    Static(FakeResponse),

    /// A response computed from the request
    Handler(Arc<Handler>),
}

impl Responder {
    pub fn handler<F>(handler: F) -> Self
    where
        F: Fn(&FakeRequest) -> FakeResponse + Send + Sync + 'static,
    {
        Self::Handler(Arc::new(handler))
    }

    pub fn respond(&self, request: &FakeRequest) -> FakeResponse {
        match self {
            Self::Static(response) => response.clone(),
            Self::Handler(handler) => handler(request),
        }
    }
}

impl From<FakeResponse> for Responder {
    fn from(response: FakeResponse) -> Self {
        Self::Static(response)
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(response) => f.debug_tuple("Static").field(response).finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// One registered rule; a `None` method matches any method
#[derive(Debug, Clone)]
pub(crate) struct Rule {
    pub method: Option<Method>,
    pub pattern: UrlPattern,
    pub responder: Responder,
}

impl Rule {
    pub fn matches(&self, request: &FakeRequest) -> bool {
        let method_matches = self
            .method
            .as_ref()
            .map_or(true, |method| *method == request.method);
        method_matches && self.pattern.matches(request)
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            method: self.method.clone(),
            pattern: self.pattern.to_string(),
            status: match &self.responder {
                Responder::Static(response) => Some(response.status),
                Responder::Handler(_) => None,
            },
        }
    }
}

/// Description of a registered rule, for listing routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    /// `None` for rules that accept any method
    pub method: Option<Method>,
    pub pattern: String,
    /// `None` when the response is computed by a handler
    pub status: Option<StatusCode>,
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.method {
            Some(method) => write!(f, "{} {}", method, self.pattern)?,
            None => write!(f, "* {}", self.pattern)?,
        }
        match self.status {
            Some(status) => write!(f, " -> {}", status.as_u16()),
            None => write!(f, " -> handler"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(method: Option<Method>, url: &str) -> Rule {
        Rule {
            method,
            pattern: UrlPattern::from(url),
            responder: FakeResponse::text(StatusCode::OK, "ok").into(),
        }
    }

    #[test]
    fn test_rule_method_filter() {
        let get_only = rule(Some(Method::GET), "test");
        assert!(get_only.matches(&FakeRequest::get("test")));
        assert!(!get_only.matches(&FakeRequest::post("test", "{}")));

        let any_method = rule(None, "test");
        assert!(any_method.matches(&FakeRequest::post("test", "{}")));
    }

    #[test]
    fn test_handler_sees_request() {
        let responder = Responder::handler(|request| {
            FakeResponse::text(StatusCode::OK, request.body.clone().unwrap_or_default())
        });
        let response = responder.respond(&FakeRequest::post("echo", "hello"));
        assert_eq!(response.body, "hello");
    }

    #[test]
    fn test_route_summary_display() {
        assert_eq!(
            rule(Some(Method::GET), "test-v1.json").summary().to_string(),
            "GET test-v1.json -> 200"
        );

        let handler_rule = Rule {
            method: None,
            pattern: UrlPattern::from("echo"),
            responder: Responder::handler(|_| FakeResponse::not_found()),
        };
        assert_eq!(handler_rule.summary().to_string(), "* echo -> handler");
    }
}
