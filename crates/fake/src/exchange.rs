//! Recorded request/response pairs

use mock_api_server_common::{FakeRequest, FakeResponse};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

struct ExchangeInner {
    id: usize,
    request: FakeRequest,
    response: Mutex<Option<FakeResponse>>,
}

/// Handle to one request seen by a transport and its response, once answered
///
/// Clones share state: the copy kept in the server's history completes
/// together with the copy returned to the caller.
#[derive(Clone)]
pub struct Exchange {
    inner: Arc<ExchangeInner>,
}

impl Exchange {
    pub(crate) fn pending(id: usize, request: FakeRequest) -> Self {
        Self {
            inner: Arc::new(ExchangeInner {
                id,
                request,
                response: Mutex::new(None),
            }),
        }
    }

    /// An exchange that is already answered, for transports that respond inline
    pub fn completed(id: usize, request: FakeRequest, response: FakeResponse) -> Self {
        let exchange = Self::pending(id, request);
        exchange.complete(response);
        exchange
    }

    pub(crate) fn complete(&self, response: FakeResponse) {
        *self
            .inner
            .response
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(response);
    }

    pub fn id(&self) -> usize {
        self.inner.id
    }

    pub fn request(&self) -> &FakeRequest {
        &self.inner.request
    }

    pub fn is_complete(&self) -> bool {
        self.inner
            .response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The response, or `None` while the request is still queued
    pub fn response(&self) -> Option<FakeResponse> {
        self.inner
            .response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl fmt::Debug for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("id", &self.inner.id)
            .field("method", &self.inner.request.method)
            .field("url", &self.inner.request.url)
            .field("complete", &self.is_complete())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_clones_complete_together() {
        let exchange = Exchange::pending(1, FakeRequest::get("test-v1.json"));
        let recorded = exchange.clone();
        assert!(!recorded.is_complete());
        assert!(recorded.response().is_none());

        exchange.complete(FakeResponse::text(StatusCode::OK, "done"));
        assert!(recorded.is_complete());
        assert_eq!(recorded.response().unwrap().body, "done");
        assert_eq!(recorded.id(), 1);
    }
}
