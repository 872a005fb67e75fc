//! Caller-supplied changes to a tap request

use crate::error::{Error, Result};
use crate::protocol::{merge_json, TurnRequest};
use serde_json::Value;
use std::fmt;

pub type Mutator = Box<dyn FnOnce(&mut Value) + Send>;

/// Extra changes applied to a tap request before it is sent
pub enum TapExtra {
    /// JSON object deep-merged into the whole request body
    Merge(Value),
    /// Called once with the serialized request body before it is sent
    Mutate(Mutator),
}

impl TapExtra {
    #[must_use]
    pub fn mutate(f: impl FnOnce(&mut Value) + Send + 'static) -> Self {
        Self::Mutate(Box::new(f))
    }

    /// Apply to `turn` and produce the body to send
    pub(crate) fn apply(self, turn: &TurnRequest) -> Result<Value> {
        match self {
            Self::Merge(patch) => {
                if !patch.is_object() {
                    return Err(Error::InvalidPatch(format!(
                        "expected a JSON object, got {patch}"
                    )));
                }
                let mut body = to_body(turn)?;
                merge_json(&mut body, patch);
                Ok(body)
            }
            Self::Mutate(f) => {
                let mut body = to_body(turn)?;
                f(&mut body);
                Ok(body)
            }
        }
    }
}

impl From<Value> for TapExtra {
    fn from(patch: Value) -> Self {
        Self::Merge(patch)
    }
}

impl fmt::Debug for TapExtra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge(patch) => f.debug_tuple("Merge").field(patch).finish(),
            Self::Mutate(_) => f.write_str("Mutate(..)"),
        }
    }
}

pub(crate) fn to_body(turn: &TurnRequest) -> Result<Value> {
    serde_json::to_value(turn).map_err(|e| Error::Protocol(format!("failed to encode request: {e}")))
}
