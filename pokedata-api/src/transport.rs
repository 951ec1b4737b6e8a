//! The HTTP seam. Pipelines only ever see [`Transport`]; the real client and
//! the scripted in-memory one both implement it.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::ApiError;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Timed out waiting on an established connection.
    Timeout,
    /// Never connected, including connect timeouts.
    Connect,
    Other,
}

/// A request that never produced a response.
///
/// `message` holds the whole error source chain so retry classification can
/// match on causes buried below the top-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFault {
    pub kind: FaultKind,
    pub message: String,
}

impl TransportFault {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::Timeout,
            message: message.into(),
        }
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::Connect,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::Other,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TransportFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportFault>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportFault> {
        (**self).get(url)
    }
}

/// Blocking `reqwest` transport.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportFault> {
        let response = self.client.get(url).send().map_err(fault_from)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(fault_from)?;
        Ok(HttpResponse { status, body })
    }
}

fn fault_from(err: reqwest::Error) -> TransportFault {
    let message = error_chain(&err);
    if err.is_connect() {
        TransportFault::connect(message)
    } else if err.is_timeout() || chain_has_timeout(&err) {
        TransportFault::timeout(message)
    } else {
        TransportFault::other(message)
    }
}

fn chain_has_timeout(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                return true;
            }
        }
        current = e.source();
    }
    false
}

/// Render an error and all of its sources as one `": "`-joined line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

type Scripted = Result<HttpResponse, TransportFault>;

/// Scripted transport for tests and offline runs.
///
/// Each URL owns a queue of outcomes. Outcomes are consumed in order, and the
/// last one repeats once the queue is down to it. Unscripted URLs answer 404.
#[derive(Default)]
pub struct MemoryTransport {
    routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `url`.
    pub fn respond(&self, url: impl Into<String>, status: u16, body: impl Into<String>) -> &Self {
        self.push(url.into(), Ok(HttpResponse::new(status, body)))
    }

    /// Queue a `200` JSON response for `url`.
    pub fn respond_json(&self, url: impl Into<String>, value: &serde_json::Value) -> &Self {
        self.respond(url, 200, value.to_string())
    }

    /// Queue a fault for `url`.
    pub fn fail(&self, url: impl Into<String>, fault: TransportFault) -> &Self {
        self.push(url.into(), Err(fault))
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of times `url` was requested.
    pub fn hits(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| *u == url).count()
    }

    fn push(&self, url: String, outcome: Scripted) -> &Self {
        let mut routes = match self.routes.lock() {
            Ok(routes) => routes,
            Err(poisoned) => poisoned.into_inner(),
        };
        routes.entry(url).or_default().push_back(outcome);
        self
    }
}

impl Transport for MemoryTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportFault> {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(url.to_string()),
            Err(poisoned) => poisoned.into_inner().push(url.to_string()),
        }

        let mut routes = match self.routes.lock() {
            Ok(routes) => routes,
            Err(poisoned) => poisoned.into_inner(),
        };
        let Some(queue) = routes.get_mut(url) else {
            return Ok(HttpResponse::new(404, "Not Found"));
        };
        if queue.len() > 1 {
            if let Some(outcome) = queue.pop_front() {
                return outcome;
            }
        }
        queue
            .front()
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "Not Found")))
    }
}
