//! Request handling for the mock skill server

use super::MockState;
use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// What the mock server saw
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    pub method: String,
    /// Path and query, e.g. `/` or `/page?x=1`
    pub url: String,
    /// Parsed JSON body, only for POST
    pub body: Option<Value>,
}

impl MockRequest {
    fn echoed(&self, field: &str) -> Value {
        self.body
            .as_ref()
            .and_then(|body| body.get(field))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// What the mock server answers
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    Json(Value),
    Text(String),
    Status(u16, String),
}

impl From<Value> for MockReply {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl IntoResponse for MockReply {
    fn into_response(self) -> Response {
        match self {
            Self::Json(value) => Json(value).into_response(),
            Self::Text(text) => text.into_response(),
            Self::Status(code, body) => (
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body,
            )
                .into_response(),
        }
    }
}

pub type CustomHandler = Arc<dyn Fn(&MockRequest) -> MockReply + Send + Sync>;

/// Reply strategy of the mock server
#[derive(Clone, Default)]
pub enum MockHandler {
    /// Greets with "привет", echoing session and version
    #[default]
    Default,
    /// Answers `{method, url}`
    Echo,
    /// Fixed reply body
    Body(Value),
    /// Fixed `response` fragment, echoing session and version
    Response(Value),
    Custom(CustomHandler),
}

impl MockHandler {
    #[must_use]
    pub fn reply(&self, request: &MockRequest) -> MockReply {
        match self {
            Self::Default => MockReply::Json(json!({
                "response": {"text": "привет", "tts": "привет"},
                "session": request.echoed("session"),
                "version": request.echoed("version"),
            })),
            Self::Echo => MockReply::Json(json!({
                "method": request.method,
                "url": request.url,
            })),
            Self::Body(body) => MockReply::Json(body.clone()),
            Self::Response(response) => MockReply::Json(json!({
                "response": response,
                "session": request.echoed("session"),
                "version": request.echoed("version"),
            })),
            Self::Custom(handler) => handler(request),
        }
    }
}

impl fmt::Debug for MockHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Echo => f.write_str("Echo"),
            Self::Body(body) => f.debug_tuple("Body").field(body).finish(),
            Self::Response(response) => f.debug_tuple("Response").field(response).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Catch-all handler: record POST bodies, wait, reply
pub(super) async fn handle(State(state): State<Arc<MockState>>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    let body = if parts.method == Method::POST {
        let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        };
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => {
                state.record(value.clone());
                Some(value)
            }
            Err(e) => {
                return (StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}")).into_response()
            }
        }
    } else {
        None
    };

    let config = state.config();
    if !config.delay.is_zero() {
        tokio::time::sleep(config.delay).await;
    }

    let request = MockRequest {
        method: parts.method.to_string(),
        url: parts.uri.to_string(),
        body,
    };
    tracing::debug!(method = %request.method, url = %request.url, "mock skill request");
    config.handler.reply(&request).into_response()
}
