//! Mock transport for testing
//!
//! Returns queued replies and records every call, so the user can be
//! exercised without a network.

use super::Transport;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One observed call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Post { url: String, body: Value },
    Get { url: String },
}

#[derive(Default)]
pub struct MockTransport {
    posts: Mutex<VecDeque<Result<String, TransportError>>>,
    gets: Mutex<VecDeque<Result<String, TransportError>>>,
    /// Record of all calls, in order
    pub calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON reply for the next POST
    pub fn queue_reply(&self, reply: Value) {
        self.queue_raw_reply(reply.to_string());
    }

    /// Queue a reply body for the next POST, sent as-is
    pub fn queue_raw_reply(&self, body: impl Into<String>) {
        self.posts.lock().unwrap().push_back(Ok(body.into()));
    }

    pub fn queue_post_error(&self, error: TransportError) {
        self.posts.lock().unwrap().push_back(Err(error));
    }

    /// Queue a body for the next GET
    pub fn queue_page(&self, body: impl Into<String>) {
        self.gets.lock().unwrap().push_back(Ok(body.into()));
    }

    pub fn queue_get_error(&self, error: TransportError) {
        self.gets.lock().unwrap().push_back(Err(error));
    }

    #[must_use]
    pub fn recorded_calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Bodies of every POST, in order
    #[must_use]
    pub fn posted_bodies(&self) -> Vec<Value> {
        self.recorded_calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Post { body, .. } => Some(body),
                Call::Get { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, url: &Url, body: &Value) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(Call::Post {
            url: url.to_string(),
            body: body.clone(),
        });
        self.posts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network(url.as_str(), "No mock reply queued")))
    }

    async fn get_text(&self, url: &Url) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(Call::Get {
            url: url.to_string(),
        });
        self.gets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network(url.as_str(), "No mock page queued")))
    }
}
