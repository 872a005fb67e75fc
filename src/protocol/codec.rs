//! Building requests and validating responses

use super::types::{TurnRequest, TurnResponse, UserRequest};
use crate::error::{Error, Result};
use crate::session::Session;
use reqwest::Url;
use serde_json::Value;

/// Assemble the request body for one turn
#[must_use]
pub fn build_request(session: &Session, request: UserRequest, version: &str) -> TurnRequest {
    TurnRequest {
        session: session.to_wire(),
        request,
        version: version.to_string(),
    }
}

/// Validate and decode a backend reply
///
/// # Errors
///
/// Returns [`Error::Protocol`] if `response` is absent or malformed, or if a
/// button carries a URL that is not absolute.
pub fn parse_response(raw: Value) -> Result<TurnResponse> {
    match raw.get("response") {
        Some(Value::Object(_)) => {}
        Some(other) => {
            return Err(Error::Protocol(format!(
                "`response` must be an object, got {}",
                json_type(other)
            )))
        }
        None => return Err(Error::Protocol("reply has no `response` field".to_string())),
    }

    let parsed: TurnResponse = serde_json::from_value(raw)
        .map_err(|e| Error::Protocol(format!("malformed `response`: {e}")))?;

    for button in parsed.response.buttons() {
        if let Some(url) = &button.url {
            Url::parse(url).map_err(|e| {
                Error::Protocol(format!(
                    "button \"{}\" has invalid url {url:?}: {e}",
                    button.title
                ))
            })?;
        }
    }

    Ok(parsed)
}

/// Decode a raw reply body and validate it
///
/// # Errors
///
/// Returns [`Error::Protocol`] if `body` is not JSON, and everything
/// [`parse_response`] rejects.
pub fn parse_reply(body: &str) -> Result<TurnResponse> {
    let raw: Value = serde_json::from_str(body)
        .map_err(|e| Error::Protocol(format!("reply is not JSON: {e}")))?;
    parse_response(raw)
}

/// Deep-merge `patch` into `target`
///
/// Objects are merged key by key; any other patch value replaces the target.
pub fn merge_json(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
