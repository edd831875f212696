//! The fake server

use crate::exchange::Exchange;
use crate::pattern::UrlPattern;
use crate::rule::{Responder, Rule, RouteSummary};
use crate::transport::Transport;
use http::Method;
use mock_api_server_common::{FakeRequest, FakeResponse, FixtureError, Result};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, trace, warn};

/// Settings a fake server starts with
#[derive(Clone)]
pub struct FakeServerConfig {
    /// Answer requests as they are sent instead of waiting for [`FakeServer::respond`]
    pub auto_respond: bool,

    /// Response for requests no rule matches
    pub default_response: Responder,

    /// Transport unmatched requests are forwarded to, and every request once restored.
    /// Without `auto_respond`, unmatched requests are queued first and relayed on flush.
    pub passthrough: Option<Arc<dyn Transport>>,
}

impl FakeServerConfig {
    pub fn with_auto_respond(mut self, auto_respond: bool) -> Self {
        self.auto_respond = auto_respond;
        self
    }

    pub fn with_default_response(mut self, responder: impl Into<Responder>) -> Self {
        self.default_response = responder.into();
        self
    }

    pub fn with_passthrough(mut self, transport: Arc<dyn Transport>) -> Self {
        self.passthrough = Some(transport);
        self
    }
}

impl Default for FakeServerConfig {
    fn default() -> Self {
        Self {
            auto_respond: false,
            default_response: Responder::Static(FakeResponse::not_found()),
            passthrough: None,
        }
    }
}

impl fmt::Debug for FakeServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeServerConfig")
            .field("auto_respond", &self.auto_respond)
            .field("default_response", &self.default_response)
            .field("passthrough", &self.passthrough.is_some())
            .finish()
    }
}

struct ServerState {
    auto_respond: bool,
    default_response: Responder,
    rules: Vec<Rule>,
    history: Vec<Exchange>,
    queue: VecDeque<Exchange>,
    next_id: usize,
    restored: bool,
}

impl ServerState {
    // Later rules override earlier ones
    fn find_rule(&self, request: &FakeRequest) -> Option<&Rule> {
        self.rules.iter().rev().find(|rule| rule.matches(request))
    }

    fn record(&mut self, request: FakeRequest) -> Exchange {
        let exchange = Exchange::pending(self.next_id, request);
        self.next_id += 1;
        self.history.push(exchange.clone());
        exchange
    }
}

/// In-memory fake HTTP server
///
/// The server intercepts every request sent to it until [`restore`](Self::restore)
/// is called. Interception is scoped to this value; nothing global is patched.
pub struct FakeServer {
    state: Mutex<ServerState>,
    passthrough: Option<Arc<dyn Transport>>,
}

impl FakeServer {
    /// Create a server with the default configuration (manual responding, 404 default)
    pub fn new() -> Self {
        Self::with_config(FakeServerConfig::default())
    }

    pub fn with_config(config: FakeServerConfig) -> Self {
        Self {
            state: Mutex::new(ServerState {
                auto_respond: config.auto_respond,
                default_response: config.default_response,
                rules: Vec::new(),
                history: Vec::new(),
                queue: VecDeque::new(),
                next_id: 0,
                restored: false,
            }),
            passthrough: config.passthrough,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_auto_respond(&self, auto_respond: bool) {
        self.lock().auto_respond = auto_respond;
    }

    pub fn auto_respond(&self) -> bool {
        self.lock().auto_respond
    }

    /// Answer `method` requests whose URL matches `pattern`
    pub fn respond_with(
        &self,
        method: Method,
        pattern: impl Into<UrlPattern>,
        responder: impl Into<Responder>,
    ) {
        self.add_rule(Some(method), pattern.into(), responder.into());
    }

    /// Answer requests of any method whose URL matches `pattern`
    pub fn respond_with_any_method(
        &self,
        pattern: impl Into<UrlPattern>,
        responder: impl Into<Responder>,
    ) {
        self.add_rule(None, pattern.into(), responder.into());
    }

    /// Replace the response given to requests no rule matches
    pub fn respond_with_default(&self, responder: impl Into<Responder>) {
        self.lock().default_response = responder.into();
    }

    fn add_rule(&self, method: Option<Method>, pattern: UrlPattern, responder: Responder) {
        let rule = Rule {
            method,
            pattern,
            responder,
        };
        debug!(route = %rule.summary(), "Registered fake server rule");
        self.lock().rules.push(rule);
    }

    /// Answer every queued request, oldest first
    ///
    /// Rules are matched now, not when the request was sent. A request no
    /// rule matches is relayed to the passthrough transport when one is
    /// configured, otherwise it gets the default response.
    ///
    /// Returns the number of requests taken off the queue.
    pub fn respond(&self) -> usize {
        let queued: Vec<Exchange> = self.lock().queue.drain(..).collect();
        for exchange in &queued {
            let matched = self
                .lock()
                .find_rule(exchange.request())
                .map(|rule| rule.responder.clone());
            match (matched, &self.passthrough) {
                (Some(responder), _) => self.answer(exchange, &responder),
                (None, Some(transport)) => self.relay(exchange, transport.as_ref()),
                (None, None) => {
                    let responder = self.lock().default_response.clone();
                    self.answer(exchange, &responder);
                }
            }
        }
        trace!(count = queued.len(), "Flushed queued requests");
        queued.len()
    }

    // Completes a queued exchange with the passthrough's answer
    fn relay(&self, exchange: &Exchange, transport: &dyn Transport) {
        debug!(
            id = exchange.id(),
            url = %exchange.request().url,
            "Relaying queued request to passthrough"
        );
        match transport.send(exchange.request().clone()) {
            Ok(forwarded) => match forwarded.response() {
                Some(response) => exchange.complete(response),
                None => warn!(
                    id = exchange.id(),
                    "Passthrough left queued request unanswered"
                ),
            },
            Err(e) => {
                warn!(id = exchange.id(), error = %e, "Passthrough failed, using default response");
                let responder = self.lock().default_response.clone();
                self.answer(exchange, &responder);
            }
        }
    }

    fn answer(&self, exchange: &Exchange, responder: &Responder) {
        let response = responder.respond(exchange.request());
        debug!(
            id = exchange.id(),
            method = %exchange.request().method,
            url = %exchange.request().url,
            status = response.status.as_u16(),
            "Fake server answered request"
        );
        exchange.complete(response);
    }

    /// Shorthand for sending a GET request
    pub fn get(&self, url: &str) -> Result<Exchange> {
        self.send(FakeRequest::get(url))
    }

    /// Every intercepted request, in the order it was sent
    pub fn requests(&self) -> Vec<Exchange> {
        self.lock().history.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().history.len()
    }

    pub fn last_request(&self) -> Option<Exchange> {
        self.lock().history.last().cloned()
    }

    /// Look up a recorded request by id
    pub fn exchange(&self, id: usize) -> Result<Exchange> {
        self.lock()
            .history
            .iter()
            .find(|exchange| exchange.id() == id)
            .cloned()
            .ok_or(FixtureError::UnknownRequest(id))
    }

    /// Number of requests waiting for [`respond`](Self::respond)
    pub fn pending_count(&self) -> usize {
        self.lock().queue.len()
    }

    /// Forget recorded requests; queued requests stay queued
    pub fn clear_history(&self) {
        self.lock().history.clear();
    }

    /// Registered rules, in registration order
    pub fn routes(&self) -> Vec<RouteSummary> {
        self.lock().rules.iter().map(Rule::summary).collect()
    }

    /// Stop intercepting requests
    ///
    /// Afterwards requests go to the passthrough transport, or fail with
    /// [`FixtureError::Restored`] when there is none. Calling this again has
    /// no further effect.
    pub fn restore(&self) {
        let mut state = self.lock();
        if !state.restored {
            state.restored = true;
            info!(
                requests = state.history.len(),
                pending = state.queue.len(),
                "Fake server restored"
            );
        }
    }

    pub fn is_restored(&self) -> bool {
        self.lock().restored
    }

    fn forward(&self, request: FakeRequest) -> Result<Exchange> {
        match &self.passthrough {
            Some(transport) => {
                debug!(
                    method = %request.method,
                    url = %request.url,
                    "Forwarding request to passthrough"
                );
                transport.send(request)
            }
            None => Err(FixtureError::restored(request.url)),
        }
    }
}

impl Default for FakeServer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for FakeServer {
    fn send(&self, request: FakeRequest) -> Result<Exchange> {
        let mut state = self.lock();

        if state.restored {
            drop(state);
            return self.forward(request);
        }

        // Queued requests are matched, or relayed, at flush time
        if !state.auto_respond {
            let exchange = state.record(request);
            state.queue.push_back(exchange.clone());
            trace!(id = exchange.id(), url = %exchange.request().url, "Queued request");
            return Ok(exchange);
        }

        let matched = state
            .find_rule(&request)
            .map(|rule| rule.responder.clone());
        let responder = match matched {
            Some(responder) => responder,
            None if self.passthrough.is_some() => {
                drop(state);
                return self.forward(request);
            }
            None => state.default_response.clone(),
        };

        let exchange = state.record(request);

        // Handlers may call back into the server
        drop(state);
        self.answer(&exchange, &responder);
        Ok(exchange)
    }
}

impl fmt::Debug for FakeServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("FakeServer")
            .field("auto_respond", &state.auto_respond)
            .field("rules", &state.rules.len())
            .field("requests", &state.history.len())
            .field("pending", &state.queue.len())
            .field("restored", &state.restored)
            .finish()
    }
}
