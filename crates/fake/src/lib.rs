//! In-memory fake HTTP server
//!
//! A [`FakeServer`] intercepts requests sent through the [`Transport`] seam
//! and answers them from registered rules instead of performing network I/O.
//!
//! ## Matching
//!
//! Rules pair an optional method with an optional [`UrlPattern`]:
//! - the most recently registered matching rule wins
//! - exact patterns match the full URL, or the URL without its query string
//! - regex patterns are tested against the full URL
//! - requests no rule matches get the default response (404), or are
//!   forwarded to the passthrough transport when one is configured
//!
//! ## Responding
//!
//! With `auto_respond` enabled, [`Transport::send`] returns an already
//! completed [`Exchange`]. Otherwise requests queue until
//! [`FakeServer::respond`] flushes them.
//!
//! ## Usage
//! ```rust
//! use mock_api_server_common::{FakeRequest, FakeResponse};
//! use mock_api_server_fake::{FakeServer, Transport};
//! use http::{Method, StatusCode};
//!
//! let server = FakeServer::new();
//! server.set_auto_respond(true);
//! server.respond_with(Method::GET, "ping", FakeResponse::text(StatusCode::OK, "pong"));
//!
//! let exchange = server.send(FakeRequest::get("ping")).unwrap();
//! assert_eq!(exchange.response().unwrap().body, "pong");
//! server.restore();
//! ```

mod exchange;
mod pattern;
mod rule;
mod server;
mod transport;

pub use exchange::Exchange;
pub use pattern::UrlPattern;
pub use rule::{Responder, RouteSummary};
pub use server::{FakeServer, FakeServerConfig};
pub use transport::Transport;
