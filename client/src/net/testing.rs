//! Scripted transport and session builders for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::session::SessionClient;
use super::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
use crate::config::SessionConfig;
use crate::state::session::{SessionState, Token};
use crate::util::nav::HeadlessNavigator;

type Reply = Result<HttpResponse, TransportError>;

/// Replies per `(method, path)`. When several replies are queued for one
/// route they are served in order and the last one repeats. Unscripted
/// routes answer 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.push(method, path, Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn reply_json(&self, method: Method, path: &str, status: u16, body: &serde_json::Value) -> &Self {
        self.reply(method, path, status, &body.to_string())
    }

    pub fn fail(&self, method: Method, path: &str, error: TransportError) -> &Self {
        self.push(method, path, Err(error));
        self
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(reply);
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_paths(&self) -> Vec<String> {
        self.sent().into_iter().map(|r| r.path).collect()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let key = (request.method, request.path.clone());
        self.sent.lock().unwrap().push(request);
        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => Ok(HttpResponse::new(404, "not found")),
        }
    }
}

/// Session wired to in-memory stores, a scripted transport and a headless
/// navigator positioned at `current_path`.
pub struct Harness {
    pub session: SessionClient,
    pub state: SessionState,
    pub transport: Arc<MockTransport>,
    pub navigator: Arc<HeadlessNavigator>,
}

impl Harness {
    pub fn new(current_path: &str, token: Option<&str>) -> Self {
        let state = SessionState::in_memory();
        if let Some(raw) = token {
            state.set_token(&Token::new(raw).unwrap());
        }
        let transport = Arc::new(MockTransport::new());
        let navigator = Arc::new(HeadlessNavigator::at(current_path));
        let session = SessionClient::new(
            state.clone(),
            transport.clone(),
            navigator.clone(),
            SessionConfig::default(),
        );
        Self { session, state, transport, navigator }
    }

    pub fn signed_in(current_path: &str) -> Self {
        Self::new(current_path, Some("abc123"))
    }
}
