//! Request and response values exchanged with a fake server

use crate::{FixtureError, Result};
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Parse an HTTP method name, case-insensitively
///
/// `"get"`, `"Get"` and `"GET"` all yield [`Method::GET`]; unknown
/// tokens are kept as extension methods in their uppercase form.
pub fn parse_method(name: &str) -> Result<Method> {
    Method::from_bytes(name.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| FixtureError::InvalidMethod(name.to_string()))
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| FixtureError::invalid_header(name, e.to_string()))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| FixtureError::invalid_header(name, e.to_string()))?;
    Ok((header_name, header_value))
}

/// An outbound request as seen by the fake server
#[derive(Debug, Clone, PartialEq)]
pub struct FakeRequest {
    /// HTTP method
    pub method: Method,

    /// Request URL, as given by the caller (relative or absolute)
    pub url: String,

    /// Request headers
    pub headers: HeaderMap,

    /// Request body
    pub body: Option<String>,
}

impl FakeRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Method::POST, url).with_body(body)
    }

    /// Add a header, failing on names or values that are not valid HTTP
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let (name, value) = header_pair(name, value)?;
        self.headers.append(name, value);
        Ok(self)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// URL with any query string and fragment removed
    pub fn path(&self) -> &str {
        let end = self.url.find(['?', '#']).unwrap_or(self.url.len());
        &self.url[..end]
    }
}

/// A canned response returned by the fake server
#[derive(Debug, Clone, PartialEq)]
pub struct FakeResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl FakeResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// JSON response with `Content-Type: application/json`
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<Self> {
        let body = serde_json::to_string(value)?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Self::new(status, headers, body))
    }

    /// Plain-text response with `Content-Type: text/plain`
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        Self::new(status, headers, body)
    }

    /// The response given to requests no rule matches: 404, no headers, empty body
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, HeaderMap::new(), String::new())
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let (name, value) = header_pair(name, value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Deserialize the body as JSON
    pub fn parse_json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

impl Default for FakeResponse {
    fn default() -> Self {
        Self::not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_is_case_insensitive() {
        assert_eq!(parse_method("get").unwrap(), Method::GET);
        assert_eq!(parse_method("Post").unwrap(), Method::POST);
        assert!(parse_method("GE T").is_err());
    }

    #[test]
    fn test_request_path_strips_query() {
        let request = FakeRequest::get("test-v1.json?alt=json#frag");
        assert_eq!(request.path(), "test-v1.json");

        let request = FakeRequest::get("test-v1.json");
        assert_eq!(request.path(), "test-v1.json");
    }

    #[test]
    fn test_request_rejects_bad_header() {
        let result = FakeRequest::get("x").with_header("bad header", "v");
        assert!(matches!(result, Err(FixtureError::InvalidHeader { .. })));
    }

    #[test]
    fn test_json_response() {
        let response =
            FakeResponse::json(StatusCode::OK, &serde_json::json!({"id": "test:v1"})).unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type(), Some("application/json"));

        let value: serde_json::Value = response.parse_json().unwrap();
        assert_eq!(value["id"], "test:v1");
    }

    #[test]
    fn test_not_found_is_empty() {
        let response = FakeResponse::default();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(response.headers.is_empty());
        assert!(response.body.is_empty());
        assert_eq!(response.content_type(), None);
    }
}
