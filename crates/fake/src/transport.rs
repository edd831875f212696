//! The seam code under test sends requests through

use crate::exchange::Exchange;
use mock_api_server_common::{FakeRequest, Result};
use std::sync::Arc;

/// Sends requests and hands back their exchanges
///
/// Code that fetches discovery documents takes a `Transport`; tests pass a
/// [`FakeServer`](crate::FakeServer) instead of a real client.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    fn send(&self, request: FakeRequest) -> Result<Exchange>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: FakeRequest) -> Result<Exchange> {
        (**self).send(request)
    }
}
