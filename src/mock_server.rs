//! Mock skill server
//!
//! An in-process webhook double for tests. Each server instance owns its own
//! configuration (reply handler and delay) and records every POSTed body in
//! arrival order.

mod handler;

pub use handler::{MockHandler, MockReply, MockRequest};

use axum::Router;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Reply behaviour of one server instance
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub handler: MockHandler,
    /// Applied before every reply
    pub delay: Duration,
}

#[derive(Default)]
pub(crate) struct MockState {
    config: Mutex<MockConfig>,
    requests: Mutex<Vec<Value>>,
}

impl MockState {
    fn config(&self) -> MockConfig {
        lock(&self.config).clone()
    }

    fn record(&self, body: Value) {
        lock(&self.requests).push(body);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct MockSkillServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockSkillServer {
    /// Start on an ephemeral localhost port
    ///
    /// # Errors
    ///
    /// Fails if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        Self::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await
    }

    /// # Errors
    ///
    /// Fails if the listener cannot be bound.
    pub async fn bind(addr: SocketAddr) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .fallback(handler::handle)
            .with_state(state.clone());

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock skill server stopped");
            }
        });

        tracing::info!(%addr, "mock skill server listening");
        Ok(Self { addr, state, task })
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    #[must_use]
    pub fn config(&self) -> MockConfig {
        self.state.config()
    }

    pub fn set_config(&self, config: MockConfig) {
        *lock(&self.state.config) = config;
    }

    pub fn set_handler(&self, handler: impl Fn(&MockRequest) -> MockReply + Send + Sync + 'static) {
        lock(&self.state.config).handler = MockHandler::Custom(Arc::new(handler));
    }

    /// Answer every request with `body` verbatim
    pub fn set_response_body(&self, body: Value) {
        lock(&self.state.config).handler = MockHandler::Body(body);
    }

    /// Answer with `response` as the `response` block, echoing session and version
    pub fn set_response(&self, response: Value) {
        lock(&self.state.config).handler = MockHandler::Response(response);
    }

    /// Answer `{method, url}` of each request
    pub fn set_echo_handler(&self) {
        lock(&self.state.config).handler = MockHandler::Echo;
    }

    pub fn set_delay(&self, delay: Duration) {
        lock(&self.state.config).delay = delay;
    }

    /// Forget recorded requests and restore the default handler and zero delay
    pub fn reset(&self) {
        lock(&self.state.requests).clear();
        *lock(&self.state.config) = MockConfig::default();
    }

    /// POST bodies received so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<Value> {
        lock(&self.state.requests).clone()
    }

    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for MockSkillServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
