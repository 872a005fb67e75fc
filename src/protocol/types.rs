//! Wire types for the webhook protocol

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Discriminator of the user-side payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    SimpleUtterance,
    ButtonPressed,
}

/// Session block as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSession {
    #[serde(rename = "new")]
    pub is_new: bool,
    pub message_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// The `request` block: what the user said or pressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRequest {
    pub command: String,
    pub original_utterance: String,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Caller-supplied fields such as `markup`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRequest {
    /// Free-text utterance
    #[must_use]
    pub fn utterance(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            command: text.clone(),
            original_utterance: text,
            kind: RequestKind::SimpleUtterance,
            payload: None,
            extra: Map::new(),
        }
    }

    /// Request produced by pressing `button`
    #[must_use]
    pub fn button_press(button: &Button) -> Self {
        let kind = if button.payload.is_some() {
            RequestKind::ButtonPressed
        } else {
            RequestKind::SimpleUtterance
        };
        Self {
            command: button.title.clone(),
            original_utterance: button.title.clone(),
            kind,
            payload: button.payload.clone(),
            extra: Map::new(),
        }
    }
}

/// Full request body for one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRequest {
    pub session: WireSession,
    pub request: UserRequest,
    pub version: String,
}

/// Button offered by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hide: bool,
}

impl Button {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            payload: None,
            url: None,
            hide: false,
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// The `response` block: what the skill said
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SkillResponse {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<Button>>,
    #[serde(default)]
    pub end_session: bool,
}

impl SkillResponse {
    /// Offered buttons, empty when the backend sent none
    #[must_use]
    pub fn buttons(&self) -> &[Button] {
        self.buttons.as_deref().unwrap_or_default()
    }
}

/// Full backend reply for one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResponse {
    pub response: SkillResponse,
    /// Echoed by the backend, not interpreted
    #[serde(default)]
    pub session: Value,
    #[serde(default)]
    pub version: Value,
}
