//! Fake server fixture for discovery-document consumers
//!
//! [`create_mock_api_server`] returns a [`FakeServer`] that answers
//! `GET test-v1.json` with the synthetic `test:v1` discovery document.
//! It responds without a manual flush; the caller restores it when the
//! test is done.
//!
//! ## Usage
//! ```rust
//! use mock_api_server_fixture::create_mock_api_server;
//!
//! let server = create_mock_api_server();
//! let exchange = server.get("test-v1.json").unwrap();
//! assert_eq!(exchange.response().unwrap().status.as_u16(), 200);
//! server.restore();
//! ```

use http::header::{HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use mock_api_server_common::FakeResponse;
use mock_api_server_discovery::test_api_document;
use mock_api_server_fake::FakeServerConfig;
use tracing::{debug, error};

pub use mock_api_server_discovery::TEST_DOCUMENT_PATH;
pub use mock_api_server_fake::{FakeServer, Transport};

/// `Content-Type: application/json`
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// `Content-Type: text/plain`
pub fn plain_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    headers
}

/// The response served for `GET test-v1.json`
pub fn test_api_response() -> FakeResponse {
    match test_api_document().to_json() {
        Ok(body) => FakeResponse::new(StatusCode::OK, json_headers(), body),
        Err(e) => {
            error!(error = %e, "Failed to serialize test discovery document");
            FakeResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                plain_headers(),
                e.to_string(),
            )
        }
    }
}

/// Create a fake server that serves the `test:v1` discovery document
///
/// The server auto-responds and has exactly one rule, `GET test-v1.json`.
/// Call [`FakeServer::restore`] in teardown.
pub fn create_mock_api_server() -> FakeServer {
    let server = FakeServer::with_config(FakeServerConfig::default().with_auto_respond(true));
    server.respond_with(Method::GET, TEST_DOCUMENT_PATH, test_api_response());
    debug!(url = TEST_DOCUMENT_PATH, "Created mock API server");
    server
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_rule() {
        let server = create_mock_api_server();
        let routes = server.routes();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].to_string(), "GET test-v1.json -> 200");
        assert!(server.auto_respond());
    }

    #[test]
    fn test_response_headers() {
        let response = test_api_response();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.content_type(), Some("application/json"));
    }
}
